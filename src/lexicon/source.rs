//! Loading export files into memory as text.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use super::types::error::{LexiconError, Result};

/// Reads the whole file at `path` and decodes it.
///
/// # Errors
/// - [`LexiconError::ReadInput`] if the file cannot be read
/// - [`LexiconError::Decode`] if its bytes are not valid text
pub fn read_source(path: &Path) -> Result<String> {
    info!("Reading {}", path.display());
    let bytes = fs::read(path).map_err(|source| LexiconError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    decode_source(&bytes, path)
}

/// Decodes export bytes.
///
/// A byte-order mark selects UTF-8 or UTF-16 and is dropped; without one the
/// bytes must be strict UTF-8. Malformed sequences are an error, never replaced.
pub fn decode_source(bytes: &[u8], path: &Path) -> Result<String> {
    let decoded = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => {
            debug!("Byte-order mark found: {}", encoding.name());
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            if had_errors {
                None
            } else {
                Some(text)
            }
        }
        None => UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes),
    };

    match decoded {
        Some(text) => Ok(Cow::into_owned(text)),
        None => Err(LexiconError::Decode {
            path: path.to_path_buf(),
            encoding: Encoding::for_bom(bytes)
                .map(|(encoding, _)| encoding.name())
                .unwrap_or(UTF_8.name()),
        }),
    }
}
