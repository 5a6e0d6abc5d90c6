//! Output layer: turns grouped records into LaTeX source.

pub mod escape;
pub mod latex;

pub use escape::escape_latex;
