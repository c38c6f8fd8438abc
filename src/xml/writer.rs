use std::io::{Cursor, Write};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use super::node::{Element, Node};
use crate::util::strip_invalid_xml_chars;

/// Indentation width used when no options are given.
pub const DEFAULT_INDENT: usize = 4;

/// Errors that can occur while writing a tree out as XML text.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Writing to the output buffer failed.
    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),

    /// The writer produced bytes that are not UTF-8.
    #[error("Generated XML contains invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Output formatting for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level. `None` (or zero) writes the document on one line.
    pub indent: Option<usize>,
}

impl EncodeOptions {
    pub fn compact() -> Self {
        Self { indent: None }
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::pretty(DEFAULT_INDENT)
    }
}

/// Writes `root` as a complete XML document.
///
/// The output always starts with `<?xml version="1.0" encoding="utf-8"?>`.
/// Text and attribute values are escaped by `quick-xml`; CDATA content is
/// written verbatim, split across sections where it contains `]]>`.
/// Characters XML 1.0 cannot carry are stripped from all character data.
///
/// Elements without children are written in self-closing form.
pub fn encode(root: &Element, options: &EncodeOptions) -> Result<String, EncodeError> {
    let buffer = Cursor::new(Vec::new());
    let mut writer = match options.indent {
        Some(width) if width > 0 => Writer::new_with_indent(buffer, b' ', width),
        _ => Writer::new(buffer),
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        let value = strip_invalid_xml_chars(value);
        start.push_attribute((key.as_str(), value.as_ref()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(nested) => write_element(writer, nested)?,
            Node::Text(text) => {
                let text = strip_invalid_xml_chars(text);
                writer.write_event(Event::Text(BytesText::new(&text)))?;
            }
            Node::CData(text) => write_cdata(writer, &strip_invalid_xml_chars(text))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

/// Writes `text` as one or more CDATA sections.
///
/// A CDATA section cannot contain `]]>`, so each occurrence is split between
/// two adjacent sections: `a]]>b` becomes `<![CDATA[a]]]]><![CDATA[>b]]>`.
fn write_cdata<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<(), EncodeError> {
    let parts: Vec<&str> = text.split("]]>").collect();
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        let mut section = String::with_capacity(part.len() + 3);
        if i > 0 {
            section.push('>');
        }
        section.push_str(part);
        if i < last {
            section.push_str("]]");
        }
        writer.write_event(Event::CData(BytesCData::new(section)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DECL: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

    fn sample() -> Element {
        Element::new("rss")
            .attr("version", "2.0")
            .child(Element::new("channel").child(Element::with_text("title", "Hi")))
    }

    #[test]
    fn test_compact_output() {
        let xml = encode(&sample(), &EncodeOptions::compact()).unwrap();
        assert_eq!(
            xml,
            format!(r#"{DECL}<rss version="2.0"><channel><title>Hi</title></channel></rss>"#)
        );
    }

    #[test]
    fn test_pretty_output_indents_nested_elements() {
        let xml = encode(&sample(), &EncodeOptions::pretty(2)).unwrap();
        assert_eq!(
            xml,
            format!(
                "{DECL}\n<rss version=\"2.0\">\n  <channel>\n    <title>Hi</title>\n  </channel>\n</rss>"
            )
        );
    }

    #[test]
    fn test_zero_indent_is_compact() {
        let xml = encode(&sample(), &EncodeOptions::pretty(0)).unwrap();
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let root = Element::new("a")
            .attr("href", "https://x.test/?a=1&b=2")
            .child(Element::with_text("t", "1 < 2 & 3"));
        let xml = encode(&root, &EncodeOptions::compact()).unwrap();
        assert!(xml.contains(r#"href="https://x.test/?a=1&amp;b=2""#));
        assert!(xml.contains("<t>1 &lt; 2 &amp; 3</t>"));
    }

    #[test]
    fn test_cdata_is_not_escaped() {
        let root = Element::with_cdata("description", "<p>Hello & bye</p>");
        let xml = encode(&root, &EncodeOptions::compact()).unwrap();
        assert!(xml.ends_with("<description><![CDATA[<p>Hello & bye</p>]]></description>"));
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        let root = Element::with_cdata("d", "a]]>b]]>c");
        let xml = encode(&root, &EncodeOptions::compact()).unwrap();
        assert!(xml.ends_with(
            "<d><![CDATA[a]]]]><![CDATA[>b]]]]><![CDATA[>c]]></d>"
        ));
    }

    #[test]
    fn test_empty_element_self_closes() {
        let root = Element::new("atom:link").attr("rel", "self");
        let xml = encode(&root, &EncodeOptions::compact()).unwrap();
        assert!(xml.ends_with(r#"<atom:link rel="self"/>"#));
    }

    #[test]
    fn test_invalid_xml_chars_are_stripped() {
        let root = Element::with_text("t", "a\x00b").attr("x", "c\x0bd");
        let xml = encode(&root, &EncodeOptions::compact()).unwrap();
        assert!(xml.ends_with(r#"<t x="cd">ab</t>"#));
    }
}
