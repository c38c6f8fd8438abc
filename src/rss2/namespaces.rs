use crate::xml::Element;

pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const GOOGLEPLAY_NS: &str = "http://www.google.com/schemas/play-podcasts/1.0";
pub const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// Optional vocabularies used by a finished channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Namespaces {
    /// Some item carries `content:encoded`.
    pub content: bool,
    /// The channel carries an `atom:link` (self or hub).
    pub atom: bool,
    /// Podcast mode is on.
    pub podcast: bool,
}

impl Namespaces {
    /// Derives namespace usage from a fully built `<channel>`.
    ///
    /// Podcast vocabularies are declared whenever podcast mode is on, whether
    /// or not any podcast element ended up in the tree.
    pub fn detect(channel: &Element, podcast: bool) -> Self {
        Self {
            content: channel
                .find_all("item")
                .any(|item| item.has_child("content:encoded")),
            atom: channel.has_child("atom:link"),
            podcast,
        }
    }

    /// `xmlns:*` declarations for the `<rss>` root, in a fixed order.
    pub fn declarations(&self) -> Vec<(&'static str, &'static str)> {
        let mut declarations = Vec::new();
        if self.content {
            declarations.push(("xmlns:dc", DC_NS));
            declarations.push(("xmlns:content", CONTENT_NS));
        }
        if self.atom {
            declarations.push(("xmlns:atom", ATOM_NS));
        }
        if self.podcast {
            declarations.push(("xmlns:googleplay", GOOGLEPLAY_NS));
            declarations.push(("xmlns:itunes", ITUNES_NS));
        }
        declarations
    }
}
