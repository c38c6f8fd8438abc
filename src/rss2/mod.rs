//! RSS 2.0 rendering.
//!
//! The renderer decides, for every optional piece of feed data, whether and
//! how it appears in the document, then hands the finished tree to the XML
//! writer. Rendering never mutates the feed.
//!
//! # Architecture
//!
//! - `item` - per-entry `<item>` construction
//! - `enclosure`, `category`, `duration` - normalization of multi-shape inputs
//! - `podcast` - the mirrored iTunes / Google Play channel block
//! - `namespaces` - `xmlns:*` declarations derived from the finished channel
//!
//! # Example
//!
//! ```
//! use feedcraft::rss2::render_rss2;
//! use feedcraft::{Feed, FeedOptions};
//!
//! let feed = Feed::new(FeedOptions {
//!     title: "Example".to_string(),
//!     link: "https://example.com/".to_string(),
//!     description: "An example feed".to_string(),
//!     ..Default::default()
//! });
//! let xml = render_rss2(&feed).unwrap();
//! assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
//! ```

mod category;
mod duration;
mod enclosure;
mod item;
mod namespaces;
mod podcast;

pub use category::{format_category, CategoryRecord};
pub use duration::format_duration;
pub use enclosure::{format_enclosure, EnclosureRecord, MediaKind};
pub use namespaces::Namespaces;

use chrono::{DateTime, Utc};

use crate::error::RenderError;
use crate::model::{Feed, FeedOptions};
use crate::util::{non_empty, sanitize_url};
use crate::xml::{encode, from_compact, Element, EncodeOptions};

/// `docs` value when the feed does not set one.
pub const DEFAULT_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

/// `generator` value when the feed does not set one.
pub const DEFAULT_GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

const RSS_MEDIA_TYPE: &str = "application/rss+xml";

/// Renders `feed` as a pretty-printed RSS 2.0 document.
///
/// # Errors
///
/// See [`render_rss2_with`].
pub fn render_rss2(feed: &Feed) -> Result<String, RenderError> {
    render_rss2_with(feed, &EncodeOptions::default())
}

/// Renders `feed` as an RSS 2.0 document using the given output formatting.
///
/// # Errors
///
/// Returns an error, and no document, if:
/// - a media reference is not an absolute URL ([`RenderError::MalformedMediaUrl`])
/// - a podcast audio duration is negative ([`RenderError::InvalidDuration`])
/// - the XML writer fails ([`RenderError::Encode`])
pub fn render_rss2_with(feed: &Feed, options: &EncodeOptions) -> Result<String, RenderError> {
    let document = build_document(feed)?;
    Ok(encode(&document, options)?)
}

/// Builds the `<rss>` element tree for `feed` without serializing it.
pub fn build_document(feed: &Feed) -> Result<Element, RenderError> {
    let options = &feed.options;
    let mut channel = channel_header(options);

    for category in &feed.categories {
        channel.push(format_category(category).to_element());
    }

    // A blank `feed` counts as unset and yields to `feed_links.rss`
    let self_link = sanitize_url(options.feed.as_deref())
        .or_else(|| sanitize_url(options.feed_links.rss.as_deref()));
    if let Some(href) = self_link {
        channel.push(
            Element::new("atom:link")
                .attr("href", href)
                .attr("rel", "self")
                .attr("type", RSS_MEDIA_TYPE),
        );
    }

    // The hub link takes the place of the self link rather than joining it
    if let Some(hub) = sanitize_url(options.hub.as_deref()) {
        channel.remove_all("atom:link");
        channel.push(Element::new("atom:link").attr("href", hub).attr("rel", "hub"));
    }

    for entry in &feed.items {
        channel.push(item::build_item(entry, options.podcast)?);
    }

    for extension in &feed.extensions {
        for element in from_compact(&extension.name, &extension.objects) {
            channel.push(element);
        }
    }

    if options.podcast {
        for element in podcast::channel_elements(options) {
            channel.push(element);
        }
    }

    let namespaces = Namespaces::detect(&channel, options.podcast);
    tracing::debug!(
        items = feed.items.len(),
        categories = feed.categories.len(),
        extensions = feed.extensions.len(),
        content = namespaces.content,
        atom = namespaces.atom,
        podcast = namespaces.podcast,
        "Built RSS 2.0 document"
    );

    let mut rss = Element::new("rss").attr("version", "2.0");
    for (key, uri) in namespaces.declarations() {
        rss.set_attr(key, uri);
    }
    Ok(rss.child(channel))
}

/// The always-present channel elements followed by the optional simple ones.
fn channel_header(options: &FeedOptions) -> Element {
    let link = sanitize_url(Some(options.link.as_str())).unwrap_or_default();
    let updated = options.updated.unwrap_or_else(Utc::now);

    let mut channel = Element::new("channel")
        .child(Element::with_text("title", options.title.as_str()))
        .child(Element::with_text("link", link.as_str()))
        .child(Element::with_text("description", options.description.as_str()))
        .child(Element::with_text("lastBuildDate", rfc1123(&updated)))
        .child(Element::with_text(
            "docs",
            non_empty(&options.docs).unwrap_or(DEFAULT_DOCS),
        ))
        .child(Element::with_text(
            "generator",
            non_empty(&options.generator).unwrap_or(DEFAULT_GENERATOR),
        ));

    if let Some(language) = non_empty(&options.language) {
        channel.push(Element::with_text("language", language));
    }

    if let Some(ttl) = options.ttl.filter(|&ttl| ttl > 0) {
        channel.push(Element::with_text("ttl", ttl.to_string()));
    }

    if let Some(image) = sanitize_url(options.image.as_deref()) {
        channel.push(
            Element::new("image")
                .child(Element::with_text("title", options.title.as_str()))
                .child(Element::with_text("url", image.as_str()))
                .child(Element::with_text("link", link.as_str())),
        );
    }

    if let Some(copyright) = non_empty(&options.copyright) {
        channel.push(Element::with_text("copyright", copyright));
    }

    channel
}

/// Formats a timestamp the way RSS dates are written: `Tue, 15 Nov 1994 08:12:31 GMT`.
pub(crate) fn rfc1123(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
