//! Grouping and sort-key derivation for the grouped output documents.
//!
//! Every function here is pure: it reads a record slice and returns a new,
//! fully ordered structure. Ordering never depends on hash iteration, so the
//! same records always produce the same groups in the same order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use log::debug;
use regex::Regex;

use super::types::diagnostics::{Diagnostics, RecordKind, Skip};
use super::types::models::{Entry, InflectionClass, VerbRecord, UNKNOWN_POS};

/// A word list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosItem {
    pub headword: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosGroup {
    pub label: String,
    pub items: Vec<PosItem>,
}

/// A semantic-domain list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainItem {
    pub headword: String,
    pub part_of_speech: Option<String>,
    pub sense_number: usize,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup {
    pub domain: String,
    pub items: Vec<DomainItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbGroup {
    pub class: InflectionClass,
    pub items: Vec<VerbRecord>,
}

/// Groups sense definitions by part of speech.
///
/// Labels sort alphabetically; rows keep first-seen order. A sense's own part
/// of speech wins over its entry's, and senses that end up `unknown` are left
/// out. Entries without senses and senses without a definition are reported.
pub fn by_part_of_speech(entries: &[Entry], diagnostics: &mut Diagnostics) -> Vec<PosGroup> {
    let mut groups: BTreeMap<String, Vec<PosItem>> = BTreeMap::new();

    for (i, entry) in entries.iter().enumerate() {
        if entry.variant_of.is_some() {
            continue;
        }
        if entry.senses.is_empty() {
            diagnostics.push(Skip::new(RecordKind::Entry, i + 1, "senses").headword(entry.headword.as_str()));
            continue;
        }
        for sense in &entry.senses {
            if !sense.is_defined() {
                diagnostics.push(
                    Skip::new(RecordKind::Sense, sense.number, "definition")
                        .parent(entry.headword.as_str()),
                );
                continue;
            }
            let label = entry.effective_pos(sense);
            if label == UNKNOWN_POS {
                continue;
            }
            groups.entry(label.to_string()).or_default().push(PosItem {
                headword: entry.headword.clone(),
                definition: sense.definition.clone(),
            });
        }
    }

    debug!("Grouped word lists into {} parts of speech", groups.len());
    groups
        .into_iter()
        .map(|(label, items)| PosGroup { label, items })
        .collect()
}

/// Groups senses by semantic domain.
///
/// Domains are ordered by [`DomainKey`]; rows by headword, then sense number.
/// Senses with no domain do not appear.
pub fn by_domain(entries: &[Entry]) -> Vec<DomainGroup> {
    let mut groups: BTreeMap<DomainKey, Vec<DomainItem>> = BTreeMap::new();

    for entry in entries {
        for sense in &entry.senses {
            for domain in &sense.domains {
                groups
                    .entry(DomainKey::new(domain))
                    .or_default()
                    .push(DomainItem {
                        headword: entry.headword.clone(),
                        part_of_speech: sense
                            .part_of_speech
                            .clone()
                            .or_else(|| entry.part_of_speech.clone()),
                        sense_number: sense.number,
                        definition: sense.definition.clone(),
                    });
            }
        }
    }

    debug!("Grouped senses into {} semantic domains", groups.len());
    groups
        .into_iter()
        .map(|(key, mut items)| {
            items.sort_by(|a, b| {
                a.headword
                    .cmp(&b.headword)
                    .then(a.sense_number.cmp(&b.sense_number))
                    .then_with(|| a.definition.cmp(&b.definition))
            });
            DomainGroup {
                domain: key.label,
                items,
            }
        })
        .collect()
}

/// Groups verbs into the fixed class order, omitting empty classes.
pub fn by_verb_class(verbs: &[VerbRecord]) -> Vec<VerbGroup> {
    InflectionClass::ALL
        .iter()
        .filter_map(|&class| {
            let mut items: Vec<VerbRecord> = verbs
                .iter()
                .filter(|v| v.inflection_class == class)
                .cloned()
                .collect();
            if items.is_empty() {
                return None;
            }
            items.sort_by(|a, b| {
                a.headword
                    .cmp(&b.headword)
                    .then_with(|| a.definition.cmp(&b.definition))
            });
            Some(VerbGroup { class, items })
        })
        .collect()
}

static NUMERIC_DOMAIN: OnceLock<Regex> = OnceLock::new();

fn numeric_domain_regex() -> &'static Regex {
    NUMERIC_DOMAIN.get_or_init(|| Regex::new(r"^\d+\.\d+").expect("Invalid domain code regex pattern"))
}

/// One dot-separated component of a domain code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CodePart {
    Number(u64),
    Text(String),
}

/// Sort key for a semantic-domain label.
///
/// Labels that start with a dotted numeric code (`"6.6.5.1 Fish"`) compare
/// component by component and come before every other label. The rest compare
/// alphabetically. Equal codes fall back to the full label, so the order is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainKey {
    code: Option<Vec<CodePart>>,
    label: String,
}

impl DomainKey {
    pub fn new(label: &str) -> Self {
        let code = if numeric_domain_regex().is_match(label) {
            let code = label.split(' ').next().unwrap_or(label);
            Some(
                code.split('.')
                    .map(|part| match part.parse::<u64>() {
                        Ok(n) => CodePart::Number(n),
                        Err(_) => CodePart::Text(part.to_string()),
                    })
                    .collect(),
            )
        } else {
            None
        };
        Self {
            code,
            label: label.to_string(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.code.is_some()
    }
}

impl Ord for DomainKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.code, &other.code) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.label.cmp(&other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

impl PartialOrd for DomainKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
