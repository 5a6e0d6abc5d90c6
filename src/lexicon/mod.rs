//! Core conversion module
//!
//! Every pipeline runs the same stages:
//!
//! ```text
//! source::read_source  →  markup::Document::parse  →  extract::*Extractor
//!        →  group::by_*  →  emit::latex::render_*
//! ```

pub mod config;
pub mod emit;
pub mod extract;
pub mod group;
pub mod markup;
pub mod source;
pub mod types;
mod utils;

use std::fs;
use std::path::Path;
use log::info;

pub use config::{ConvertOptions, Pipeline};
pub use types::diagnostics::{Diagnostics, RecordKind, Skip};
pub use types::error::{LexiconError, Result};

use emit::latex;
use extract::{LiftExtractor, TaggedExtractor};
use markup::Document;

/// Outcome of one conversion run.
#[derive(Debug)]
pub struct Report {
    pub pipeline: Pipeline,
    /// Number of records that made it into the output.
    pub records: usize,
    /// Records left out because a required field was missing.
    pub skipped: Vec<Skip>,
}

/// Rendered document plus what went into it.
#[derive(Debug)]
pub struct Rendered {
    pub latex: String,
    pub report: Report,
}

/// Runs `pipeline` over export text already in memory.
///
/// # Errors
/// Returns [`LexiconError::Markup`] if the text cannot be tokenized.
pub fn render(pipeline: Pipeline, source: &str, options: &ConvertOptions) -> Result<Rendered> {
    let doc = Document::parse(source)?;
    let mut diagnostics = Diagnostics::new();

    let (latex, records) = match pipeline {
        Pipeline::Dictionary => {
            let records = TaggedExtractor::new(&doc, options).extract_all(&mut diagnostics);
            (latex::render_dictionary(&records), records.len())
        }
        Pipeline::WordLists => {
            let entries = TaggedExtractor::new(&doc, options).extract_entries(&mut diagnostics);
            let groups = group::by_part_of_speech(&entries, &mut diagnostics);
            let rows = groups.iter().map(|g| g.items.len()).sum();
            (latex::render_word_lists(&groups), rows)
        }
        Pipeline::Domains => {
            let entries = LiftExtractor::new(&doc, options).extract_entries(&mut diagnostics);
            let groups = group::by_domain(&entries);
            let rows = groups.iter().map(|g| g.items.len()).sum();
            (latex::render_domains(&groups), rows)
        }
        Pipeline::Verbs => {
            let verbs = LiftExtractor::new(&doc, options).extract_verbs(&mut diagnostics);
            let groups = group::by_verb_class(&verbs);
            (latex::render_verbs(&groups), verbs.len())
        }
    };

    Ok(Rendered {
        latex,
        report: Report {
            pipeline,
            records,
            skipped: diagnostics.into_vec(),
        },
    })
}

/// Reads `input`, runs `pipeline`, and writes the result to `output`.
///
/// Nothing is written unless the whole document rendered.
pub fn convert(
    pipeline: Pipeline,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Report> {
    let input = input.as_ref();
    let output = output.as_ref();
    info!("Running {} pipeline on {}", pipeline, input.display());

    let text = source::read_source(input)?;
    let rendered = render(pipeline, &text, options)?;
    fs::write(output, rendered.latex.as_bytes())?;

    info!(
        "Wrote {}: {} records, {} skipped",
        output.display(),
        rendered.report.records,
        rendered.report.skipped.len()
    );
    Ok(rendered.report)
}
