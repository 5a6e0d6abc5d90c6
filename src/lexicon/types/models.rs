//! Data structures representing extracted dictionary records

use std::collections::BTreeSet;
use std::fmt;

/// Label used when neither the sense nor its entry states a part of speech.
pub const UNKNOWN_POS: &str = "unknown";

/// Definition text used when a sense has neither a definition nor a gloss.
pub const NO_DEFINITION: &str = "no definition provided";

/// Display marker for a verb with no analytic plural variant.
pub const EMPTY_PLURAL_MARKER: &str = "[]";

/// One dictionary headword unit.
///
/// Cross-reference records are entries with no senses whose `variant_of` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub headword: String,
    pub part_of_speech: Option<String>,
    pub etymology: Option<Etymology>,
    pub allomorphs: Vec<String>,
    pub senses: Vec<Sense>,
    pub subentries: Vec<Entry>,
    pub variant_of: Option<VariantRef>,
}

impl Entry {
    pub fn new(headword: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            part_of_speech: None,
            etymology: None,
            allomorphs: Vec::new(),
            senses: Vec::new(),
            subentries: Vec::new(),
            variant_of: None,
        }
    }

    /// The entry-level part of speech, or [`UNKNOWN_POS`].
    pub fn pos_label(&self) -> &str {
        self.part_of_speech.as_deref().unwrap_or(UNKNOWN_POS)
    }

    /// Part of speech in effect for `sense`: its own value, else the entry's.
    pub fn effective_pos<'a>(&'a self, sense: &'a Sense) -> &'a str {
        sense
            .part_of_speech
            .as_deref()
            .unwrap_or_else(|| self.pos_label())
    }
}

/// Etymology of an entry.
///
/// Either all of comment, language and form were found, or comment and form;
/// a partial etymology is never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etymology {
    /// Precursor comment, e.g. "From" or "Borrowed from".
    pub comment: String,
    /// Name of the source language, only present in the three-part shape.
    pub language: Option<String>,
    /// The precursor surface form.
    pub form: String,
}

/// Back-reference from a minor entry to the entry it is a variant of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRef {
    /// Variant type label, e.g. "pl. of" or "var. of".
    pub variant_type: String,
    pub headword: String,
}

/// One meaning within an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    /// 1-based position within the entry; always derived from enumeration order.
    pub number: usize,
    /// Text of an explicit sense-number tag, shown instead of `number` when present.
    pub display_number: Option<String>,
    pub part_of_speech: Option<String>,
    pub definition: String,
    pub domains: BTreeSet<String>,
    pub examples: Vec<Example>,
}

impl Sense {
    pub fn new(number: usize, definition: impl Into<String>) -> Self {
        Self {
            number,
            display_number: None,
            part_of_speech: None,
            definition: definition.into(),
            domains: BTreeSet::new(),
            examples: Vec::new(),
        }
    }

    /// Whether the definition came from the source rather than the fallback sentinel.
    pub fn is_defined(&self) -> bool {
        self.definition != NO_DEFINITION
    }
}

/// An example sentence with its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub source_text: String,
    pub translation: String,
}

/// A row in one of the verb-class tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbRecord {
    pub headword: String,
    pub analytic_plurals: Vec<String>,
    /// All sense definitions joined with `", "`.
    pub definition: String,
    pub inflection_class: InflectionClass,
    pub examples: Vec<Example>,
}

impl VerbRecord {
    /// Plural forms joined for display, or [`EMPTY_PLURAL_MARKER`] when there are none.
    pub fn plural_display(&self) -> String {
        if self.analytic_plurals.is_empty() {
            EMPTY_PLURAL_MARKER.to_string()
        } else {
            self.analytic_plurals.join(", ")
        }
    }
}

/// Verb conjugation class.
///
/// Declaration order is the order in which the class tables are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InflectionClass {
    I,
    II,
    III,
    IV,
    Irregular,
}

impl InflectionClass {
    pub const ALL: [InflectionClass; 5] = [
        InflectionClass::I,
        InflectionClass::II,
        InflectionClass::III,
        InflectionClass::IV,
        InflectionClass::Irregular,
    ];
}

impl fmt::Display for InflectionClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InflectionClass::I => write!(f, "I"),
            InflectionClass::II => write!(f, "II"),
            InflectionClass::III => write!(f, "III"),
            InflectionClass::IV => write!(f, "IV"),
            InflectionClass::Irregular => write!(f, "Irregular"),
        }
    }
}

/// Anything that is not one of the four regular classes is `Irregular`.
impl From<&str> for InflectionClass {
    fn from(value: &str) -> Self {
        match value.trim() {
            "I" => Self::I,
            "II" => Self::II,
            "III" => Self::III,
            "IV" => Self::IV,
            _ => Self::Irregular,
        }
    }
}

/// One classified top-level division of a tagged export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivisionRecord {
    LetterHeading(String),
    Entry(Entry),
}
