use crate::model::FeedOptions;
use crate::util::{non_empty, sanitize_url};
use crate::xml::Element;

/// Channel-level podcast elements.
///
/// Google Play and iTunes each define their own vocabulary for the same
/// metadata. Every value is written to both, and a value missing from the
/// options is missing from both.
pub(crate) fn channel_elements(options: &FeedOptions) -> Vec<Element> {
    let mut elements = Vec::new();

    if let Some(category) = non_empty(&options.category) {
        elements.push(Element::with_text("googleplay:category", category));
        elements.push(Element::with_text("itunes:category", category));
    }

    let author = options.author.as_ref();
    if let Some(email) = author.and_then(|a| non_empty(&a.email)) {
        elements.push(Element::with_text("googleplay:owner", email));
        elements.push(
            Element::new("itunes:owner").child(Element::with_text("itunes:email", email)),
        );
    }
    if let Some(name) = author.and_then(|a| non_empty(&a.name)) {
        elements.push(Element::with_text("googleplay:author", name));
        elements.push(Element::with_text("itunes:author", name));
    }

    if let Some(image) = sanitize_url(options.image.as_deref()) {
        elements.push(Element::new("googleplay:image").attr("href", image.as_str()));
        elements.push(Element::new("itunes:image").attr("href", image));
    }

    elements
}
