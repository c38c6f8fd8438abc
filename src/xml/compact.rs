use serde_json::Value;

use super::node::Element;

/// Converts a compact-convention JSON payload into elements named `name`.
///
/// The compact convention maps an element to a JSON value:
///
/// - an object's `_attributes` key holds the attribute map
/// - `_text` and `_cdata` hold character data (CDATA is written unescaped)
/// - `_comment`, `_instruction`, `_doctype` and `_declaration` are dropped
/// - every other key is a child element; an array under a key is a run of
///   repeated siblings with that name
/// - a scalar (string, number, bool) is the element's text
/// - `null` produces nothing
///
/// An array at the top level yields one element per entry.
///
/// # Example
///
/// ```
/// use feedcraft::xml::from_compact;
/// use serde_json::json;
///
/// let elements = from_compact(
///     "media:content",
///     &json!({"_attributes": {"url": "https://x.test/a.jpg"}, "media:title": "A"}),
/// );
/// assert_eq!(elements.len(), 1);
/// assert_eq!(elements[0].attribute("url"), Some("https://x.test/a.jpg"));
/// assert_eq!(elements[0].find("media:title").unwrap().text(), "A");
/// ```
pub fn from_compact(name: &str, value: &Value) -> Vec<Element> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(values) => values.iter().flat_map(|v| from_compact(name, v)).collect(),
        other => vec![element_from_compact(name, other)],
    }
}

fn element_from_compact(name: &str, value: &Value) -> Element {
    let mut element = Element::new(name);

    let Value::Object(map) = value else {
        if let Some(text) = scalar_text(value) {
            element.push_text(text);
        }
        return element;
    };

    for (key, child) in map {
        match key.as_str() {
            "_attributes" => {
                if let Value::Object(attributes) = child {
                    for (attr, attr_value) in attributes {
                        if let Some(text) = scalar_text(attr_value) {
                            element.set_attr(attr.as_str(), text);
                        }
                    }
                }
            }
            "_text" => {
                for text in scalar_texts(child) {
                    element.push_text(text);
                }
            }
            "_cdata" => {
                for text in scalar_texts(child) {
                    element.push_cdata(text);
                }
            }
            "_comment" | "_instruction" | "_doctype" | "_declaration" => {}
            _ => {
                for nested in from_compact(key, child) {
                    element.push(nested);
                }
            }
        }
    }

    element
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_texts(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}
