use std::borrow::Cow;

/// Returns true when `c` may not appear anywhere in an XML 1.0 document.
///
/// XML 1.0 `Char` excludes the C0 controls other than tab, newline and
/// carriage return, the surrogate block (unrepresentable in a Rust `char`),
/// and the two noncharacters U+FFFE / U+FFFF.
fn is_forbidden_xml_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Strip characters that cannot be represented in XML 1.0 text or attribute values.
///
/// Feed text usually comes from CMS exports and databases, where stray control
/// bytes (NUL, form feeds, vertical tabs) are common. `quick-xml` escapes
/// markup characters but will happily write these bytes, producing a document
/// most feed readers reject outright.
///
/// Preserves: tab (0x09), newline (0x0A), carriage return (0x0D).
///
/// Returns `Cow::Borrowed` when the input contains nothing to strip (common case).
pub fn strip_invalid_xml_chars(s: &str) -> Cow<'_, str> {
    // Fast path: the forbidden set is either ASCII control or starts with 0xEF in UTF-8
    let needs_strip = s
        .bytes()
        .any(|b| (b < 0x20 && b != 0x09 && b != 0x0a && b != 0x0d) || b == 0xef);
    if !needs_strip || !s.chars().any(is_forbidden_xml_char) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(s.chars().filter(|&c| !is_forbidden_xml_char(c)).collect())
}

/// Returns `Some(s)` when the optional string is present and not empty.
///
/// Feed inputs use empty strings and missing values interchangeably; every
/// optional element in the output is gated on this check.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
