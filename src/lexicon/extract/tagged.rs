//! Record extraction for the tagged (configured HTML) export.
//!
//! The export is a flat sequence of top-level `div`s under `body`. Each one is
//! a letter heading (`letHead`), a full entry (`entry`), a minor entry that
//! points at another entry (`minorentryvariant`), or something we ignore.
//! Everything inside them is nested `span`s identified by class tokens and
//! `lang` attributes.

use log::{debug, trace, warn};

use crate::lexicon::config::ConvertOptions;
use crate::lexicon::markup::{NodeId, Selector, TreeQuery};
use crate::lexicon::types::diagnostics::{Diagnostics, RecordKind, Skip};
use crate::lexicon::types::models::{
    DivisionRecord, Entry, Etymology, Example, Sense, VariantRef, NO_DEFINITION,
};
use crate::lexicon::utils::{non_empty, squash};

use super::fallback::Fallback;

/// Structural role of a top-level division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionKind {
    LetterHeading,
    Entry,
    Variant,
    Ignored,
}

/// Extracts records from a tagged export tree.
pub struct TaggedExtractor<'a, Q: TreeQuery> {
    doc: &'a Q,
    options: &'a ConvertOptions,
}

impl<'a, Q: TreeQuery> TaggedExtractor<'a, Q> {
    pub fn new(doc: &'a Q, options: &'a ConvertOptions) -> Self {
        Self { doc, options }
    }

    /// Walks every top-level division and collects the records that could be built.
    pub fn extract_all(&self, diagnostics: &mut Diagnostics) -> Vec<DivisionRecord> {
        let divisions = self.divisions();
        debug!("Found {} top-level divisions", divisions.len());
        divisions
            .into_iter()
            .enumerate()
            .filter_map(|(i, div)| self.extract_division(div, i + 1, diagnostics))
            .collect()
    }

    /// Convenience: only the full entries (variants included), in document order.
    pub fn extract_entries(&self, diagnostics: &mut Diagnostics) -> Vec<Entry> {
        self.extract_all(diagnostics)
            .into_iter()
            .filter_map(|record| match record {
                DivisionRecord::Entry(entry) => Some(entry),
                DivisionRecord::LetterHeading(_) => None,
            })
            .collect()
    }

    /// Top-level `div`s: the children of `body`, or of the document root for fragments.
    pub fn divisions(&self) -> Vec<NodeId> {
        let root = self.doc.root();
        let scope = self
            .doc
            .find_first(root, &Selector::tag("body"))
            .unwrap_or(root);
        self.doc.find_children(scope, &Selector::tag("div"))
    }

    pub fn classify(&self, div: NodeId) -> DivisionKind {
        if self.doc.matches(div, &Selector::tag("div").class("letHead")) {
            DivisionKind::LetterHeading
        } else if self.doc.matches(div, &Selector::tag("div").class("entry")) {
            DivisionKind::Entry
        } else if self.doc.matches(div, &Selector::tag("div").class("minorentryvariant")) {
            DivisionKind::Variant
        } else {
            DivisionKind::Ignored
        }
    }

    /// Produces zero or one record for a division. `index` is its 1-based position.
    pub fn extract_division(
        &self,
        div: NodeId,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<DivisionRecord> {
        match self.classify(div) {
            DivisionKind::LetterHeading => {
                self.extract_letter_heading(div).map(DivisionRecord::LetterHeading)
            }
            DivisionKind::Entry => self
                .extract_entry(div, index, diagnostics)
                .map(DivisionRecord::Entry),
            DivisionKind::Variant => self
                .extract_variant(div, index, diagnostics)
                .map(DivisionRecord::Entry),
            DivisionKind::Ignored => {
                trace!("Ignoring division {}", index);
                None
            }
        }
    }

    pub fn extract_letter_heading(&self, div: NodeId) -> Option<String> {
        let letter = self.doc.find_first(div, &Selector::span("letter"))?;
        non_empty(squash(&self.doc.text(letter)))
    }

    /// Builds a full entry, or records a skip if it has no headword.
    pub fn extract_entry(
        &self,
        div: NodeId,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<Entry> {
        let Some(headword) = self.main_headword(div) else {
            diagnostics.push(Skip::new(RecordKind::Entry, index, "headword"));
            return None;
        };

        let subentry_nodes = self.doc.find_all(div, &Selector::span("subentry"));
        let sense_nodes: Vec<NodeId> = self
            .doc
            .find_all(div, &Selector::span("sense"))
            .into_iter()
            .filter(|sense| !self.inside_any(*sense, &subentry_nodes))
            .collect();

        let mut entry = Entry::new(headword);
        entry.part_of_speech = self.entry_pos(div, &sense_nodes, &subentry_nodes);
        entry.etymology = self.etymology(div, &subentry_nodes);
        entry.senses = self.senses(div, &sense_nodes, &subentry_nodes, &entry.headword);
        entry.allomorphs = self.allomorphs(div, &subentry_nodes);
        entry.subentries = subentry_nodes
            .iter()
            .enumerate()
            .filter_map(|(i, sub)| self.extract_subentry(*sub, i + 1, &entry.headword, diagnostics))
            .collect();

        trace!(
            "Entry '{}': {} senses, {} subentries",
            entry.headword,
            entry.senses.len(),
            entry.subentries.len()
        );
        Some(entry)
    }

    /// Builds a cross-reference record pointing at another entry.
    pub fn extract_variant(
        &self,
        div: NodeId,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<Entry> {
        let headword = self
            .doc
            .find_first(div, &Selector::span("headword"))
            .and_then(|node| non_empty(squash(&self.doc.text(node))));
        let Some(headword) = headword else {
            diagnostics.push(Skip::new(RecordKind::Variant, index, "headword"));
            return None;
        };

        let skip = |field: &'static str| Skip::new(RecordKind::Variant, index, field).headword(headword.as_str());

        let Some(variant_type) = self
            .doc
            .find_first(div, &Selector::span("reverseabbr"))
            .and_then(|node| non_empty(squash(&self.doc.text(node))))
        else {
            diagnostics.push(skip("reverse abbreviation"));
            return None;
        };
        let Some(referenced) = self.doc.find_first(div, &Selector::span("referencedentry")) else {
            diagnostics.push(skip("referenced entry"));
            return None;
        };
        let Some(target) = self.object_text(referenced) else {
            diagnostics.push(skip("referenced headword"));
            return None;
        };

        let mut entry = Entry::new(headword);
        entry.variant_of = Some(VariantRef {
            variant_type,
            headword: target,
        });
        Some(entry)
    }

    /// A subentry needs both a headword and a definition-or-gloss container.
    fn extract_subentry(
        &self,
        sub: NodeId,
        index: usize,
        parent: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Entry> {
        let headword = self
            .doc
            .find_first(sub, &Selector::span("headword"))
            .and_then(|node| non_empty(squash(&self.doc.text(node))));
        let Some(headword) = headword else {
            diagnostics.push(Skip::new(RecordKind::Subentry, index, "headword").parent(parent));
            return None;
        };
        let Some(container) = self.doc.find_first(sub, &Selector::span("definitionorgloss")) else {
            diagnostics.push(
                Skip::new(RecordKind::Subentry, index, "definition or gloss")
                    .headword(headword)
                    .parent(parent),
            );
            return None;
        };

        let mut sense = Sense::new(
            1,
            self.definition_text(container)
                .unwrap_or_else(|| NO_DEFINITION.to_string()),
        );
        sense.examples = self.examples(sub, sub, &[]);

        let mut entry = Entry::new(headword);
        entry.part_of_speech = self
            .doc
            .find_first(sub, &Selector::span("partofspeech"))
            .and_then(|pos| self.pos_text(pos));
        entry.senses = vec![sense];
        Some(entry)
    }

    fn main_headword(&self, div: NodeId) -> Option<String> {
        let container = self.doc.find_first(div, &Selector::span("mainheadword"))?;
        self.object_text(container)
    }

    /// Entry-level part of speech.
    ///
    /// 1. the shared grammatical info block
    /// 2. the first part-of-speech span outside every sense and subentry
    fn entry_pos(&self, div: NodeId, senses: &[NodeId], subentries: &[NodeId]) -> Option<String> {
        Fallback::new("part of speech")
            .attempt("shared grammatical info", || {
                let shared = self
                    .doc
                    .find_first(div, &Selector::span("sharedgrammaticalinfo"))?;
                let pos = self.doc.find_first(shared, &Selector::span("partofspeech"))?;
                self.pos_text(pos)
            })
            .attempt("entry-level span", || {
                self.doc
                    .find_all(div, &Selector::span("partofspeech"))
                    .into_iter()
                    .filter(|pos| !self.inside_any(*pos, senses) && !self.inside_any(*pos, subentries))
                    .find_map(|pos| self.pos_text(pos))
            })
            .resolve()
    }

    /// Prefers the analysis-language sub-span, else the whole span.
    fn pos_text(&self, pos: NodeId) -> Option<String> {
        let lang = Selector::tag("span").attr("lang", self.options.analysis_lang.as_str());
        Fallback::new("part of speech label")
            .attempt("analysis language span", || {
                let span = self.doc.find_first(pos, &lang)?;
                non_empty(squash(&self.doc.text(span)))
            })
            .attempt("span text", || non_empty(squash(&self.doc.text(pos))))
            .resolve()
    }

    /// Three-part etymology, else two-part, else none. Never partial.
    fn etymology(&self, div: NodeId, subentries: &[NodeId]) -> Option<Etymology> {
        let etym = self
            .doc
            .find_all(div, &Selector::span("etymology"))
            .into_iter()
            .find(|node| !self.inside_any(*node, subentries))?;
        let part = |class: &str| {
            self.doc
                .find_first(etym, &Selector::span(class))
                .and_then(|node| non_empty(squash(&self.doc.text(node))))
        };

        Fallback::new("etymology")
            .attempt("comment, language and form", || {
                Some(Etymology {
                    comment: part("preccomment")?,
                    language: Some(part("name")?),
                    form: part("form")?,
                })
            })
            .attempt("comment and form", || {
                Some(Etymology {
                    comment: part("preccomment")?,
                    language: None,
                    form: part("form")?,
                })
            })
            .resolve()
    }

    fn senses(
        &self,
        div: NodeId,
        sense_nodes: &[NodeId],
        subentries: &[NodeId],
        headword: &str,
    ) -> Vec<Sense> {
        let mut previous: Option<NodeId> = None;
        let mut senses = Vec::with_capacity(sense_nodes.len());

        for (i, &node) in sense_nodes.iter().enumerate() {
            let number = i + 1;
            let definition = self
                .doc
                .find_first(node, &Selector::span("definitionorgloss"))
                .and_then(|container| self.definition_text(container))
                .unwrap_or_else(|| NO_DEFINITION.to_string());

            let mut sense = Sense::new(number, definition);
            sense.display_number = self.sense_number(div, node, previous);
            sense.part_of_speech = self
                .doc
                .find_first(node, &Selector::span("partofspeech"))
                .and_then(|pos| self.pos_text(pos));
            sense.examples = self.examples(node, div, subentries);

            if let Some(shown) = &sense.display_number {
                if shown.parse::<usize>().map(|n| n != number).unwrap_or(false) {
                    warn!(
                        "Entry '{}': sense {} is labelled '{}' in the export",
                        headword, number, shown
                    );
                }
            }

            previous = Some(node);
            senses.push(sense);
        }
        senses
    }

    /// Display number: a sense-number tag inside the sense, else the nearest
    /// one before it that comes after the previous sense.
    fn sense_number(&self, div: NodeId, sense: NodeId, previous: Option<NodeId>) -> Option<String> {
        let selector = Selector::span("sensenumber");
        Fallback::new("sense number")
            .attempt("inside sense", || {
                let node = self.doc.find_first(sense, &selector)?;
                non_empty(squash(&self.doc.text(node)))
            })
            .attempt("preceding tag", || {
                let node = self.doc.find_previous(sense, &selector, div)?;
                if let Some(prev) = previous {
                    if node < prev || self.doc.is_descendant(node, prev) {
                        return None;
                    }
                }
                non_empty(squash(&self.doc.text(node)))
            })
            .resolve()
    }

    /// Leaf spans of a definition-or-gloss container, space-joined.
    fn definition_text(&self, container: NodeId) -> Option<String> {
        let span = Selector::tag("span");
        let leaves: Vec<String> = self
            .doc
            .find_all(container, &span)
            .into_iter()
            .filter(|node| self.doc.find_first(*node, &span).is_none())
            .map(|node| squash(&self.doc.text(node)))
            .filter(|text| !text.is_empty())
            .collect();
        if leaves.is_empty() {
            non_empty(squash(&self.doc.text(container)))
        } else {
            Some(leaves.join(" "))
        }
    }

    /// Examples under `scope`, leaving out those inside `exclude`; each is
    /// paired with the next translation inside `bound` in document order.
    fn examples(&self, scope: NodeId, bound: NodeId, exclude: &[NodeId]) -> Vec<Example> {
        let translation = Selector::span("translation");
        self.doc
            .find_all(scope, &Selector::span("example"))
            .into_iter()
            .filter(|ex| !self.inside_any(*ex, exclude))
            .filter_map(|ex| {
                let source_text = non_empty(squash(&self.doc.text(ex)))?;
                let Some(trans) = self.doc.find_next(ex, &translation, bound) else {
                    trace!("Dropping example without translation: {}", source_text);
                    return None;
                };
                let translation = non_empty(squash(&self.doc.text(trans)))?;
                Some(Example {
                    source_text,
                    translation,
                })
            })
            .collect()
    }

    fn allomorphs(&self, div: NodeId, subentries: &[NodeId]) -> Vec<String> {
        self.doc
            .find_all(div, &Selector::span("allomorph"))
            .into_iter()
            .filter(|node| !self.inside_any(*node, subentries))
            .filter_map(|node| self.object_text(node))
            .collect()
    }

    /// Text of the first object-language span under `node`.
    fn object_text(&self, node: NodeId) -> Option<String> {
        let lang = Selector::tag("span").attr("lang", self.options.object_lang.as_str());
        let span = self.doc.find_first(node, &lang)?;
        non_empty(squash(&self.doc.text(span)))
    }

    fn inside_any(&self, node: NodeId, containers: &[NodeId]) -> bool {
        containers.iter().any(|c| self.doc.is_descendant(node, *c))
    }
}
