//! In-memory XML tree and its text encoder.
//!
//! Renderers build an [`Element`] tree and hand it to [`encode`]; nothing in
//! this module knows about any particular feed format.
//!
//! - `node` - the ordered element tree
//! - `compact` - conversion of caller-supplied JSON fragments into tree nodes
//! - `writer` - serialization through `quick-xml`

mod compact;
mod node;
mod writer;

pub use compact::from_compact;
pub use node::{Element, Node};
pub use writer::{encode, EncodeError, EncodeOptions, DEFAULT_INDENT};
