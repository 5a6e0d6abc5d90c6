//! Record extraction for LIFT lexicon interchange documents.
//!
//! The paths read here:
//!
//! ```text
//! entry/lexical-unit/form[@lang]/text                          headword
//! entry/sense/grammatical-info/@value                          part of speech
//! entry/sense/definition/form[@lang='en']/text                 definition
//! entry/sense/gloss[@lang='en']/text                           gloss
//! entry/sense/trait[@name='semantic-domain-ddp4']/@value       domains
//! entry/variant[trait environment = analytic plural]/form      plurals
//! entry/sense[1]/grammatical-info/trait[@name='Verb-infl-class'] verb class
//! entry/sense/example/form + translation[@type='Free translation']
//! ```
//!
//! All text passes through [`clean_text`].

use std::collections::BTreeSet;
use log::{debug, trace};

use crate::lexicon::config::ConvertOptions;
use crate::lexicon::markup::{NodeId, Selector, TreeQuery};
use crate::lexicon::types::diagnostics::{Diagnostics, RecordKind, Skip};
use crate::lexicon::types::models::{
    Entry, Example, InflectionClass, Sense, VerbRecord, NO_DEFINITION,
};
use crate::lexicon::utils::{clean_text, non_empty};

use super::fallback::Fallback;

const DOMAIN_TRAIT: &str = "semantic-domain-ddp4";
const VERB_CLASS_TRAIT: &str = "Verb-infl-class";
const ENVIRONMENT_TRAIT: &str = "environment";
const ANALYTIC_PLURAL: &str = "analytic plural";
const FREE_TRANSLATION: &str = "Free translation";

/// Extracts records from a LIFT tree.
pub struct LiftExtractor<'a, Q: TreeQuery> {
    doc: &'a Q,
    options: &'a ConvertOptions,
}

impl<'a, Q: TreeQuery> LiftExtractor<'a, Q> {
    pub fn new(doc: &'a Q, options: &'a ConvertOptions) -> Self {
        Self { doc, options }
    }

    /// `entry` elements directly under the `lift` root (or the document root).
    pub fn entry_nodes(&self) -> Vec<NodeId> {
        let root = self.doc.root();
        let scope = self
            .doc
            .find_child(root, &Selector::tag("lift"))
            .unwrap_or(root);
        let entries = self.doc.find_children(scope, &Selector::tag("entry"));
        debug!("Found {} LIFT entries", entries.len());
        entries
    }

    /// Every entry with a headword, as a general-purpose [`Entry`].
    pub fn extract_entries(&self, diagnostics: &mut Diagnostics) -> Vec<Entry> {
        self.entry_nodes()
            .into_iter()
            .enumerate()
            .filter_map(|(i, node)| self.extract_entry(node, i + 1, diagnostics))
            .collect()
    }

    /// Every entry with a headword and at least one definition, as a verb table row.
    pub fn extract_verbs(&self, diagnostics: &mut Diagnostics) -> Vec<VerbRecord> {
        self.entry_nodes()
            .into_iter()
            .enumerate()
            .filter_map(|(i, node)| self.extract_verb(node, i + 1, diagnostics))
            .collect()
    }

    pub fn extract_entry(
        &self,
        node: NodeId,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<Entry> {
        let Some(headword) = non_empty(self.headword(node)) else {
            diagnostics.push(Skip::new(RecordKind::Entry, index, "headword"));
            return None;
        };
        let mut entry = Entry::new(headword);
        entry.senses = self.senses(node);
        Some(entry)
    }

    pub fn extract_verb(
        &self,
        node: NodeId,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<VerbRecord> {
        let Some(headword) = non_empty(self.headword(node)) else {
            diagnostics.push(Skip::new(RecordKind::Entry, index, "headword"));
            return None;
        };
        let Some(definition) = self.rolled_up_definition(node) else {
            diagnostics.push(Skip::new(RecordKind::Entry, index, "definition").headword(headword));
            return None;
        };

        let examples = self
            .doc
            .find_children(node, &Selector::tag("sense"))
            .into_iter()
            .flat_map(|sense| self.examples(sense))
            .collect();

        Some(VerbRecord {
            headword,
            analytic_plurals: self.analytic_plurals(node),
            definition,
            inflection_class: self.inflection_class(node),
            examples,
        })
    }

    /// Object-language form of the lexical unit, or an empty string.
    pub fn headword(&self, entry: NodeId) -> String {
        self.doc
            .find_path(
                entry,
                &[
                    Selector::tag("lexical-unit"),
                    self.form(&self.options.object_lang),
                    Selector::tag("text"),
                ],
            )
            .map(|text| clean_text(&self.doc.text(text)))
            .unwrap_or_default()
    }

    /// One sense per `sense` element, numbered in document order.
    pub fn senses(&self, entry: NodeId) -> Vec<Sense> {
        self.doc
            .find_children(entry, &Selector::tag("sense"))
            .into_iter()
            .enumerate()
            .map(|(i, node)| {
                let definition = self
                    .definition(node)
                    .unwrap_or_else(|| NO_DEFINITION.to_string());
                let mut sense = Sense::new(i + 1, definition);
                sense.part_of_speech = self
                    .doc
                    .find_child(node, &Selector::tag("grammatical-info"))
                    .and_then(|info| self.doc.attr(info, "value"))
                    .and_then(|value| non_empty(clean_text(value)));
                sense.domains = self.domains(node);
                sense.examples = self.examples(node);
                sense
            })
            .collect()
    }

    /// Definition, else gloss, in the analysis language.
    pub fn definition(&self, sense: NodeId) -> Option<String> {
        let lang = self.options.analysis_lang.as_str();
        Fallback::new("definition")
            .attempt("definition form", || {
                self.text_at(
                    sense,
                    &[Selector::tag("definition"), self.form(lang), Selector::tag("text")],
                )
            })
            .attempt("gloss", || {
                self.text_at(
                    sense,
                    &[Selector::tag("gloss").attr("lang", lang), Selector::tag("text")],
                )
            })
            .attempt("gloss form", || {
                self.text_at(
                    sense,
                    &[Selector::tag("gloss"), self.form(lang), Selector::tag("text")],
                )
            })
            .resolve()
    }

    /// Semantic-domain trait values on a sense; empty values are ignored.
    pub fn domains(&self, sense: NodeId) -> BTreeSet<String> {
        self.doc
            .find_children(sense, &Selector::tag("trait").attr("name", DOMAIN_TRAIT))
            .into_iter()
            .filter_map(|t| self.doc.attr(t, "value"))
            .filter_map(|value| non_empty(clean_text(value)))
            .collect()
    }

    /// Forms of every variant marked as an analytic plural, in document order.
    pub fn analytic_plurals(&self, entry: NodeId) -> Vec<String> {
        let marker = Selector::tag("trait")
            .attr("name", ENVIRONMENT_TRAIT)
            .attr("value", ANALYTIC_PLURAL);
        self.doc
            .find_children(entry, &Selector::tag("variant"))
            .into_iter()
            .filter(|variant| self.doc.find_child(*variant, &marker).is_some())
            .filter_map(|variant| {
                self.text_at(
                    variant,
                    &[self.form(&self.options.object_lang), Selector::tag("text")],
                )
            })
            .collect()
    }

    /// Every sense's definition (gloss fallback) joined with `", "`, or `None`
    /// when no sense has either.
    pub fn rolled_up_definition(&self, entry: NodeId) -> Option<String> {
        let definitions: Vec<String> = self
            .doc
            .find_children(entry, &Selector::tag("sense"))
            .into_iter()
            .filter_map(|sense| self.definition(sense))
            .collect();
        if definitions.is_empty() {
            None
        } else {
            Some(definitions.join(", "))
        }
    }

    /// Class from the first sense's grammatical info only; `Irregular` unless
    /// it names one of the four regular classes.
    pub fn inflection_class(&self, entry: NodeId) -> InflectionClass {
        let value = self
            .doc
            .find_child(entry, &Selector::tag("sense"))
            .and_then(|sense| self.doc.find_child(sense, &Selector::tag("grammatical-info")))
            .and_then(|info| {
                self.doc
                    .find_child(info, &Selector::tag("trait").attr("name", VERB_CLASS_TRAIT))
            })
            .and_then(|t| self.doc.attr(t, "value"))
            .map(clean_text);
        match value {
            Some(value) => InflectionClass::from(value.as_str()),
            None => {
                trace!("No verb class trait, defaulting to Irregular");
                InflectionClass::Irregular
            }
        }
    }

    /// Object-language sentence paired with its free translation.
    pub fn examples(&self, sense: NodeId) -> Vec<Example> {
        let object = self.options.object_lang.as_str();
        let analysis = self.options.analysis_lang.as_str();
        self.doc
            .find_children(sense, &Selector::tag("example"))
            .into_iter()
            .filter_map(|example| {
                let source_text =
                    self.text_at(example, &[self.form(object), Selector::tag("text")])?;
                let translation = self.text_at(
                    example,
                    &[
                        Selector::tag("translation").attr("type", FREE_TRANSLATION),
                        self.form(analysis),
                        Selector::tag("text"),
                    ],
                )?;
                Some(Example {
                    source_text,
                    translation,
                })
            })
            .collect()
    }

    fn form(&self, lang: &str) -> Selector {
        Selector::tag("form").attr("lang", lang)
    }

    fn text_at(&self, scope: NodeId, steps: &[Selector]) -> Option<String> {
        let node = self.doc.find_path(scope, steps)?;
        non_empty(clean_text(&self.doc.text(node)))
    }
}
