//! Conversion settings: which pipeline runs, on which files, for which languages.

use std::fmt;
use std::str::FromStr;

use super::types::error::LexiconError;

/// Language codes used to pick the right spans and forms out of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Code of the language being documented (headwords, examples).
    pub object_lang: String,
    /// Code of the language definitions and translations are written in.
    pub analysis_lang: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            object_lang: "kit".to_string(),
            analysis_lang: "en".to_string(),
        }
    }
}

/// One of the output documents that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Main dictionary, in export order.
    Dictionary,
    /// Word lists grouped by part of speech.
    WordLists,
    /// Entries grouped by semantic domain.
    Domains,
    /// Verb tables grouped by inflection class.
    Verbs,
}

impl Pipeline {
    pub const ALL: [Pipeline; 4] = [
        Pipeline::Dictionary,
        Pipeline::WordLists,
        Pipeline::Domains,
        Pipeline::Verbs,
    ];

    pub fn default_input(&self) -> &'static str {
        match self {
            Pipeline::Dictionary | Pipeline::WordLists => "dictionary-configured.xhtml",
            Pipeline::Domains => "dictionary.lift",
            Pipeline::Verbs => "dictionary-verb.lift",
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            Pipeline::Dictionary => "dictionary.tex",
            Pipeline::WordLists => "word_lists.tex",
            Pipeline::Domains => "dictionary_by_domain.tex",
            Pipeline::Verbs => "verb-dictionary.tex",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Pipeline::Dictionary => write!(f, "dictionary"),
            Pipeline::WordLists => write!(f, "wordlists"),
            Pipeline::Domains => write!(f, "domains"),
            Pipeline::Verbs => write!(f, "verbs"),
        }
    }
}

impl FromStr for Pipeline {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dictionary" | "dict" => Ok(Pipeline::Dictionary),
            "wordlists" | "pos" => Ok(Pipeline::WordLists),
            "domains" | "semantic" => Ok(Pipeline::Domains),
            "verbs" | "verb" => Ok(Pipeline::Verbs),
            _ => Err(LexiconError::UnknownPipeline(s.to_string())),
        }
    }
}
