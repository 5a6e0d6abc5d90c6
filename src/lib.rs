//! # lexitex
//!
//! Turns dictionary exports into LaTeX sources.
//! Reads the configured HTML export of a dictionary-authoring tool and LIFT
//! interchange XML, and produces the main dictionary, part-of-speech word
//! lists, semantic-domain lists and verb-class tables.
pub mod lexicon;

// Re-export the main types for convenience
pub use lexicon::{
    convert,
    render,
    ConvertOptions,
    LexiconError,
    Pipeline,
    Rendered,
    Report,
    Result,
    Skip,
    types::models::{
        DivisionRecord,
        Entry,
        Etymology,
        Example,
        InflectionClass,
        Sense,
        VariantRef,
        VerbRecord,
    },
};
