use std::fmt;

use crate::error::RenderError;
use crate::model::MediaRef;
use crate::util::{non_empty, parse_media_url, sanitize_url};
use crate::xml::Element;

/// Top-level MIME category for a media reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Image,
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of an `<enclosure>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosureRecord {
    pub url: String,
    pub length: u64,
    pub mime_type: String,
}

impl EnclosureRecord {
    pub fn to_element(&self) -> Element {
        Element::new("enclosure")
            .attr("url", self.url.as_str())
            .attr("length", self.length.to_string())
            .attr("type", self.mime_type.as_str())
    }
}

/// Normalizes a media reference into an enclosure record.
///
/// - `url` is the sanitized reference URL
/// - `length` is the caller's value, or 0 (the resource is never fetched)
/// - `type` is the caller's value, or `<kind>/<ext>` where `ext` is the final
///   dot-delimited segment of the URL path, taken as-is
///
/// Structured `title` and `duration` are not enclosure attributes and are
/// ignored here.
///
/// # Errors
///
/// Returns [`RenderError::MalformedMediaUrl`] naming `field` if the URL is not
/// absolute.
///
/// # Examples
///
/// ```
/// use feedcraft::rss2::{format_enclosure, MediaKind};
/// use feedcraft::MediaRef;
///
/// let record = format_enclosure(
///     &MediaRef::from("https://x.test/a/file.mp3"),
///     MediaKind::Audio,
///     "audio",
/// )
/// .unwrap();
/// assert_eq!(record.url, "https://x.test/a/file.mp3");
/// assert_eq!(record.length, 0);
/// assert_eq!(record.mime_type, "audio/mp3");
/// ```
pub fn format_enclosure(
    media: &MediaRef,
    kind: MediaKind,
    field: &'static str,
) -> Result<EnclosureRecord, RenderError> {
    let url = parse_media_url(media.url(), field)?;
    let extension = url.path().rsplit('.').next().unwrap_or_default();
    let derived_type = format!("{kind}/{extension}");
    // Emit the publisher's spelling, not the parser's normalized form
    let sanitized = sanitize_url(Some(media.url())).unwrap_or_default();

    let record = match media {
        MediaRef::Url(_) => EnclosureRecord {
            url: sanitized,
            length: 0,
            mime_type: derived_type,
        },
        MediaRef::Structured(enclosure) => EnclosureRecord {
            url: sanitized,
            length: enclosure.length.unwrap_or(0),
            mime_type: non_empty(&enclosure.mime_type)
                .map(str::to_string)
                .unwrap_or(derived_type),
        },
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Enclosure;
    use pretty_assertions::assert_eq;

    fn structured(url: &str) -> Enclosure {
        Enclosure {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bare_url_defaults() {
        let record = format_enclosure(
            &MediaRef::from("https://x.test/a/file.mp3"),
            MediaKind::Audio,
            "audio",
        )
        .unwrap();
        assert_eq!(
            record,
            EnclosureRecord {
                url: "https://x.test/a/file.mp3".to_string(),
                length: 0,
                mime_type: "audio/mp3".to_string(),
            }
        );
    }

    #[test]
    fn test_default_kind_is_image() {
        let record = format_enclosure(
            &MediaRef::from("https://x.test/cover.png"),
            MediaKind::default(),
            "enclosure",
        )
        .unwrap();
        assert_eq!(record.mime_type, "image/png");
    }

    #[test]
    fn test_extension_is_case_sensitive_and_ignores_query() {
        let record = format_enclosure(
            &MediaRef::from("https://x.test/clip.MP4?token=a.b"),
            MediaKind::Video,
            "video",
        )
        .unwrap();
        assert_eq!(record.mime_type, "video/MP4");
        assert_eq!(record.url, "https://x.test/clip.MP4?token=a.b");
    }

    #[test]
    fn test_structured_overrides_win() {
        let media = MediaRef::Structured(Enclosure {
            mime_type: Some("audio/mpeg".to_string()),
            length: Some(12_345),
            ..structured("https://x.test/ep1.mp3")
        });
        let record = format_enclosure(&media, MediaKind::Audio, "audio").unwrap();
        assert_eq!(record.mime_type, "audio/mpeg");
        assert_eq!(record.length, 12_345);
    }

    #[test]
    fn test_structured_without_overrides_uses_defaults() {
        let media = MediaRef::Structured(Enclosure {
            title: Some("Episode".to_string()),
            duration: Some(90),
            ..structured("https://x.test/ep1.ogg")
        });
        let record = format_enclosure(&media, MediaKind::Audio, "audio").unwrap();
        assert_eq!(record.mime_type, "audio/ogg");
        assert_eq!(record.length, 0);

        let element = record.to_element();
        let keys: Vec<_> = element.attributes().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["url", "length", "type"]);
    }

    #[test]
    fn test_url_is_sanitized() {
        let record = format_enclosure(
            &MediaRef::from("  https://x.test/a.jpg  "),
            MediaKind::Image,
            "image",
        )
        .unwrap();
        assert_eq!(record.url, "https://x.test/a.jpg");
    }

    #[test]
    fn test_malformed_url_names_field() {
        let err = format_enclosure(&MediaRef::from("file.mp3"), MediaKind::Audio, "audio")
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MalformedMediaUrl { field: "audio", .. }
        ));
        assert!(err.to_string().contains("`audio`"));
    }
}
