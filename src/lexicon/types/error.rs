//! Custom error types for the lexitex crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fatal conditions in this crate.
///
/// Records that are merely incomplete never surface here; they are reported
/// as [`Skip`](super::diagnostics::Skip) diagnostics instead.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened or read.
    #[error("Cannot read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file exists but its bytes are not valid text in the detected encoding.
    #[error("{path} is not valid {encoding} text")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The markup could not be tokenized at all.
    #[error("Malformed markup near byte {position}: {message}")]
    Markup { position: u64, message: String },

    /// A pipeline name given on the command line is not one we know.
    #[error("Unknown pipeline '{0}'. Expected one of: dictionary, wordlists, domains, verbs")]
    UnknownPipeline(String),

    /// A command line argument is malformed or missing its value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A convenience `Result` type alias using the crate's `LexiconError` type.
pub type Result<T> = std::result::Result<T, LexiconError>;
