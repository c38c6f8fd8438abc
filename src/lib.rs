//! Render format-agnostic feed descriptions as RSS 2.0 documents.
//!
//! - [`model`] - feed metadata, entries, categories, media references and extensions
//! - [`rss2`] - the RSS 2.0 renderer and its formatters
//! - [`xml`] - the element tree and the `quick-xml` backed writer
//! - [`config`] - optional TOML configuration for the `feedcraft` binary
//! - [`util`] - URL sanitization and XML text hygiene

pub mod config;
pub mod error;
pub mod model;
pub mod rss2;
pub mod util;
pub mod xml;

pub use error::RenderError;
pub use model::{Author, Category, Enclosure, Extension, Feed, FeedLinks, FeedOptions, Item, MediaRef};
pub use rss2::{render_rss2, render_rss2_with};
pub use xml::EncodeOptions;
