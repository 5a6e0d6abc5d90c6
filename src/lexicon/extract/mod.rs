//! Record extraction layer.
//!
//! - [`tagged`]: configured HTML export (letter headings, entries, variants)
//! - [`lift`]: LIFT interchange XML (senses, domains, verb data)
//! - [`fallback`]: ordered-attempt helper used for optional fields
//!
//! Extractors never fail: a record missing a required field is reported to
//! the caller's [`Diagnostics`](crate::lexicon::types::diagnostics::Diagnostics)
//! and left out.

pub mod fallback;
pub mod lift;
pub mod tagged;

pub use lift::LiftExtractor;
pub use tagged::{DivisionKind, TaggedExtractor};
