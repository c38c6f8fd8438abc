use url::Url;

use super::text::strip_invalid_xml_chars;
use crate::error::RenderError;

/// Sanitizes an outward-facing URL before it enters the document tree.
///
/// Trims surrounding whitespace and strips characters that XML cannot carry.
/// The URL is otherwise passed through untouched: relative links, unusual
/// schemes and unencoded query strings are the publisher's business, and
/// markup characters are escaped later by the XML writer.
///
/// # Returns
///
/// `None` when the input is absent or sanitizes to an empty string, so the
/// caller omits the element instead of emitting an empty one.
///
/// # Examples
///
/// ```
/// use feedcraft::util::sanitize_url;
///
/// assert_eq!(
///     sanitize_url(Some("  https://example.com/?a=1&b=2 ")).as_deref(),
///     Some("https://example.com/?a=1&b=2")
/// );
/// assert_eq!(sanitize_url(Some("   ")), None);
/// assert_eq!(sanitize_url(None), None);
/// ```
pub fn sanitize_url(url: Option<&str>) -> Option<String> {
    let cleaned = strip_invalid_xml_chars(url?.trim());
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parses a media URL as an absolute URL.
///
/// Media references are the only URLs whose structure the renderer needs
/// (the enclosure MIME type is derived from the path), so they are the only
/// ones held to a syntax check.
///
/// # Errors
///
/// Returns [`RenderError::MalformedMediaUrl`] naming `field` when `raw` does not
/// parse as an absolute URL.
pub fn parse_media_url(raw: &str, field: &'static str) -> Result<Url, RenderError> {
    let sanitized = sanitize_url(Some(raw)).unwrap_or_default();
    Url::parse(&sanitized).map_err(|source| RenderError::MalformedMediaUrl {
        field,
        url: raw.to_string(),
        source,
    })
}
