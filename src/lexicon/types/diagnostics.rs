//! Record-level diagnostics for entries that had to be skipped.

use std::fmt;
use log::warn;

/// The kind of record a [`Skip`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Entry,
    Subentry,
    Variant,
    Sense,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecordKind::Entry => write!(f, "entry"),
            RecordKind::Subentry => write!(f, "subentry"),
            RecordKind::Variant => write!(f, "minor entry variant"),
            RecordKind::Sense => write!(f, "sense"),
        }
    }
}

/// A record that was dropped because a required field was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub kind: RecordKind,
    /// 1-based position of the record among its siblings.
    pub index: usize,
    /// Headword of the record itself, when it got far enough to have one.
    pub headword: Option<String>,
    /// Headword of the enclosing entry for nested records.
    pub parent: Option<String>,
    /// Name of the missing field.
    pub field: &'static str,
}

impl Skip {
    pub fn new(kind: RecordKind, index: usize, field: &'static str) -> Self {
        Self {
            kind,
            index,
            headword: None,
            parent: None,
            field,
        }
    }

    pub fn headword(mut self, headword: impl Into<String>) -> Self {
        self.headword = Some(headword.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Skipping {} {}", self.kind, self.index)?;
        if let Some(headword) = &self.headword {
            write!(f, " '{}'", headword)?;
        }
        if let Some(parent) = &self.parent {
            write!(f, " under '{}'", parent)?;
        }
        write!(f, ": missing {}", self.field)
    }
}

/// Caller-owned accumulator for skip diagnostics.
///
/// Every pushed diagnostic is logged once at `warn` level.
#[derive(Debug, Default)]
pub struct Diagnostics {
    skipped: Vec<Skip>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, skip: Skip) {
        warn!("{}", skip);
        self.skipped.push(skip);
    }

    pub fn skipped(&self) -> &[Skip] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_vec(self) -> Vec<Skip> {
        self.skipped
    }
}
