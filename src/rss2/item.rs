use chrono::{DateTime, Utc};

use super::category::format_category;
use super::duration::format_duration;
use super::enclosure::{format_enclosure, MediaKind};
use super::rfc1123;
use crate::error::RenderError;
use crate::model::{Author, Item, MediaRef};
use crate::util::{non_empty, sanitize_url};
use crate::xml::{from_compact, Element};

/// Builds the `<item>` element for one entry.
///
/// Every child is optional and emitted only when its source field is set.
/// `podcast` enables `itunes:duration` for structured audio references.
pub(crate) fn build_item(entry: &Item, podcast: bool) -> Result<Element, RenderError> {
    let mut item = Element::new("item");

    if let Some(title) = non_empty(&entry.title) {
        item.push(Element::with_cdata("title", title));
    }

    let link = sanitize_url(entry.link.as_deref());
    if let Some(link) = &link {
        item.push(Element::with_text("link", link.as_str()));
    }

    if let Some(guid) = resolve_guid(entry, link.as_deref()) {
        item.push(Element::with_text("guid", guid));
    }

    if let Some(date) = publication_date(entry) {
        item.push(Element::with_text("pubDate", rfc1123(date)));
    }

    if let Some(description) = non_empty(&entry.description) {
        item.push(Element::with_cdata("description", description));
    }

    if let Some(content) = non_empty(&entry.content) {
        item.push(Element::with_cdata("content:encoded", content));
    }

    for author in entry.author.iter().filter_map(format_author) {
        item.push(Element::with_text("author", author));
    }

    for category in &entry.category {
        item.push(format_category(category).to_element());
    }

    let (enclosure, duration) = resolve_media(entry, podcast)?;
    if let Some(enclosure) = enclosure {
        item.push(enclosure);
    }
    if let Some(duration) = duration {
        item.push(Element::with_text("itunes:duration", duration));
    }

    for extension in &entry.extensions {
        for element in from_compact(&extension.name, &extension.objects) {
            item.push(element);
        }
    }

    Ok(item)
}

/// guid priority: explicit guid, then id, then the sanitized link.
fn resolve_guid<'a>(entry: &'a Item, sanitized_link: Option<&'a str>) -> Option<&'a str> {
    non_empty(&entry.guid)
        .or_else(|| non_empty(&entry.id))
        .or(sanitized_link)
}

/// `published` wins over `date` when both are set.
fn publication_date(entry: &Item) -> Option<&DateTime<Utc>> {
    entry.published.as_ref().or(entry.date.as_ref())
}

/// `email (name)`; authors missing either half are dropped.
fn format_author(author: &Author) -> Option<String> {
    let name = non_empty(&author.name)?;
    let email = non_empty(&author.email)?;
    Some(format!("{email} ({name})"))
}

/// Resolves the single enclosure slot and the optional podcast duration.
///
/// All four media fields are formatted (so a malformed URL in any of them
/// fails the render), but an item carries one enclosure. Precedence is
/// video > audio > image > enclosure.
///
/// The duration comes from structured audio in podcast mode and is kept even
/// when a video reference takes the enclosure slot.
fn resolve_media(
    entry: &Item,
    podcast: bool,
) -> Result<(Option<Element>, Option<String>), RenderError> {
    let candidates: [(&'static str, &Option<MediaRef>, MediaKind); 4] = [
        ("enclosure", &entry.enclosure, MediaKind::Image),
        ("image", &entry.image, MediaKind::Image),
        ("audio", &entry.audio, MediaKind::Audio),
        ("video", &entry.video, MediaKind::Video),
    ];

    let mut winner: Option<(&'static str, Element)> = None;
    let mut shadowed = Vec::new();
    for (field, media, kind) in candidates {
        let Some(media) = media else { continue };
        let record = format_enclosure(media, kind, field)?;
        if let Some((previous, _)) = winner.replace((field, record.to_element())) {
            shadowed.push(previous);
        }
    }

    if let Some((field, _)) = &winner {
        if !shadowed.is_empty() {
            tracing::debug!(
                guid = ?entry.guid.as_deref().or(entry.id.as_deref()),
                winner = *field,
                shadowed = ?shadowed,
                "Item sets several media fields, keeping one enclosure"
            );
        }
    }

    let duration = match entry.audio.as_ref().and_then(MediaRef::duration) {
        Some(seconds) if podcast => Some(format_duration(seconds)?),
        _ => None,
    };

    Ok((winner.map(|(_, element)| element), duration))
}
