//! Utility functions shared by the renderer and the XML writer.
//!
//! This module provides reusable utilities for:
//!
//! - **URL sanitization**: the single choke point every outward-facing link passes through
//! - **Text processing**: stripping characters XML 1.0 cannot carry
//!
//! # Examples
//!
//! ```
//! use feedcraft::util::{sanitize_url, strip_invalid_xml_chars};
//!
//! let link = sanitize_url(Some(" https://example.com/ ")).unwrap();
//! assert_eq!(link, "https://example.com/");
//!
//! assert_eq!(strip_invalid_xml_chars("a\x00b"), "ab");
//! ```

mod text;
mod url_sanitizer;

pub use text::{non_empty, strip_invalid_xml_chars};
pub use url_sanitizer::{parse_media_url, sanitize_url};
