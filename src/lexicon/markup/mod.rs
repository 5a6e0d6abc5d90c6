//! Markup parsing layer shared by both export dialects.
//!
//! - [`tree`]: builds a lenient, read-only [`Document`] from markup text
//! - [`query`]: the [`TreeQuery`] interface extractors use to navigate it

pub mod query;
pub mod tree;

pub use query::{Selector, TreeQuery};
pub use tree::{Document, Element, NodeId};
