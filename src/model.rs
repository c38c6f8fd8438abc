//! Format-agnostic feed description consumed by the renderers.
//!
//! Every type deserializes from the camelCase JSON shape publishers already
//! produce (`feedLinks`, `podcast`, `extensions`, ...), so a feed can be
//! described in a JSON or TOML file as well as built in code.
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::RenderError;

// ============================================================================
// Channel Metadata
// ============================================================================

/// Site-level metadata for a feed.
///
/// `title`, `link` and `description` are always emitted, even when empty.
/// Everything else is emitted only when present and non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOptions {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Last build time. Defaults to the time of rendering.
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub updated: Option<DateTime<Utc>>,
    pub language: Option<String>,
    /// Minutes a consumer may cache the feed. Zero is treated as unset.
    pub ttl: Option<u32>,
    /// Channel image URL.
    pub image: Option<String>,
    pub copyright: Option<String>,
    pub docs: Option<String>,
    pub generator: Option<String>,
    /// URL of this feed document; takes precedence over `feed_links.rss`.
    pub feed: Option<String>,
    #[serde(default)]
    pub feed_links: FeedLinks,
    /// PubSubHubbub hub URL.
    pub hub: Option<String>,
    /// Emit the iTunes and Google Play podcast vocabularies.
    #[serde(default)]
    pub podcast: bool,
    /// Podcast category. Ignored unless `podcast` is set.
    pub category: Option<String>,
    pub author: Option<Author>,
}

/// Per-format self links.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedLinks {
    pub rss: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ============================================================================
// Multi-shape Inputs
// ============================================================================

/// A channel or item category.
///
/// Deserializes from either a bare string or a `{name, domain}` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Named(String),
    Scoped {
        name: String,
        /// Classification scheme URI, emitted as the `domain` attribute.
        #[serde(default)]
        domain: Option<String>,
    },
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::Named(name.to_string())
    }
}

/// A structured media reference with optional overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Enclosure {
    pub url: String,
    /// MIME type override. Derived from the URL extension when absent.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
    /// Size in bytes. Emitted as 0 when absent.
    pub length: Option<u64>,
    pub title: Option<String>,
    /// Playback length in seconds. Only used by podcast feeds.
    pub duration: Option<i64>,
}

/// A media reference: a bare URL or a structured [`Enclosure`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Url(String),
    Structured(Enclosure),
}

impl MediaRef {
    pub fn url(&self) -> &str {
        match self {
            MediaRef::Url(url) => url,
            MediaRef::Structured(enclosure) => &enclosure.url,
        }
    }

    /// Duration in seconds, when the reference is structured and carries a non-zero one.
    pub fn duration(&self) -> Option<i64> {
        match self {
            MediaRef::Url(_) => None,
            MediaRef::Structured(enclosure) => enclosure.duration.filter(|&d| d != 0),
        }
    }
}

impl From<&str> for MediaRef {
    fn from(url: &str) -> Self {
        MediaRef::Url(url.to_string())
    }
}

/// A caller-built fragment injected verbatim under the element `name`.
///
/// `objects` uses the compact object convention understood by
/// [`crate::xml::from_compact`]: `_attributes`, `_text` and `_cdata` keys,
/// arrays for repeated siblings, and scalars for plain text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Extension {
    pub name: String,
    pub objects: serde_json::Value,
}

// ============================================================================
// Entries
// ============================================================================

/// One entry of the feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Item {
    pub title: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub id: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date: Option<DateTime<Utc>>,
    /// Publication time; wins over `date` when both are set.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub published: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// Full body, emitted as `content:encoded`.
    pub content: Option<String>,
    pub author: Vec<Author>,
    pub category: Vec<Category>,
    pub enclosure: Option<MediaRef>,
    pub image: Option<MediaRef>,
    pub audio: Option<MediaRef>,
    pub video: Option<MediaRef>,
    pub extensions: Vec<Extension>,
}

// ============================================================================
// Feed
// ============================================================================

/// A complete feed: channel metadata, categories, entries and extensions.
///
/// # Example
///
/// ```
/// use feedcraft::{Feed, FeedOptions, Item};
///
/// let mut feed = Feed::new(FeedOptions {
///     title: "Release notes".to_string(),
///     link: "https://example.com/".to_string(),
///     description: "What shipped".to_string(),
///     ..Default::default()
/// });
/// feed.add_category("Software");
/// feed.add_item(Item {
///     title: Some("v1.0".to_string()),
///     link: Some("https://example.com/v1".to_string()),
///     ..Default::default()
/// });
///
/// let xml = feed.rss2().unwrap();
/// assert!(xml.contains("<rss version=\"2.0\">"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    pub options: FeedOptions,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl Feed {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_category(&mut self, category: impl Into<Category>) {
        self.categories.push(category.into());
    }

    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Renders the feed as a pretty-printed RSS 2.0 document.
    pub fn rss2(&self) -> Result<String, RenderError> {
        crate::rss2::render_rss2(self)
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Timestamps written as RFC 3339 strings (JSON, quoted TOML) or as native
/// TOML datetimes. A value without an offset is read as UTC, and a bare date
/// as midnight UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Toml(toml::value::Datetime),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(RawTimestamp::Text(text)) => text,
            Some(RawTimestamp::Toml(datetime)) => datetime.to_string(),
            None => return Ok(None),
        };
        parse(&raw).map(Some).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid timestamp {raw:?}: expected an RFC 3339 date and time"
            ))
        })
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
            return Some(datetime.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
