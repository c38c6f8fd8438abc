use thiserror::Error;

use crate::xml::EncodeError;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort an RSS render.
///
/// Rendering is best-effort: missing or partially populated fields are
/// omitted rather than reported. Only the cases below stop the render, and
/// when they do no partial document is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A media reference (enclosure, image, audio or video) is not an absolute URL.
    ///
    /// The enclosure MIME type is derived from the URL path, so a URL that
    /// cannot be parsed leaves nothing to derive it from.
    #[error("Malformed media URL in `{field}`: {url:?} ({source})")]
    MalformedMediaUrl {
        field: &'static str,
        url: String,
        source: url::ParseError,
    },

    /// A podcast duration was negative.
    #[error("Invalid duration: {0} seconds (must be non-negative)")]
    InvalidDuration(i64),

    /// The finished tree could not be written out as XML.
    #[error("Failed to encode XML: {0}")]
    Encode(#[from] EncodeError),
}
