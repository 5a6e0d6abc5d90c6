//! LaTeX source emission for each output document.
//!
//! The macros emitted here (`\entry`, `\headword`, `\definition`, ...) are
//! defined by the typesetting templates that `\input` these files; only the
//! verb tables are written as a standalone document.

use crate::lexicon::group::{DomainGroup, PosGroup, VerbGroup};
use crate::lexicon::types::models::{DivisionRecord, Entry, Etymology, Example, Sense};

use super::escape::escape_latex;

const VERB_PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{lmodern}
\usepackage{enumitem}
\usepackage{xcolor}

% Custom commands for dictionary entries
\newcommand{\anpl}[1]{\textbf{#1}} % Analytic non-plural (headword)
\newcommand{\apl}[1]{\textit{#1}} % Analytic plural
\newcommand{\defi}[1]{#1} % Definition
\newcommand{\vex}[2]{\par\hspace*{1em}\textit{#1} --- #2} % Example and translation

\begin{document}

";

/// Main dictionary body: letter sections and entries in export order.
pub fn render_dictionary(records: &[DivisionRecord]) -> String {
    let lines: Vec<String> = records
        .iter()
        .map(|record| match record {
            DivisionRecord::LetterHeading(letter) => {
                format!("\\lettersection{{{}}}", escape_latex(letter))
            }
            DivisionRecord::Entry(entry) => render_entry(entry),
        })
        .collect();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_entry(entry: &Entry) -> String {
    let headword = escape_latex(&entry.headword);
    let mut body = format!("\\headword{{{}}}", headword);

    if let Some(variant) = &entry.variant_of {
        body.push_str(&format!(
            "\\variant{{{}}}{{{}}}",
            escape_latex(&variant.variant_type),
            escape_latex(&variant.headword)
        ));
        return format!("\\entry{{{}}}{{{}}}", headword, body);
    }

    let shown_pos = entry
        .part_of_speech
        .as_deref()
        .or_else(|| entry.senses.iter().find_map(|s| s.part_of_speech.as_deref()));
    if let Some(pos) = shown_pos {
        body.push_str(&format!("\\pos{{{}}}", escape_latex(pos)));
    }
    if let Some(etymology) = &entry.etymology {
        body.push_str(&render_etymology(etymology));
    }

    let numbered = entry.senses.len() > 1;
    for sense in &entry.senses {
        body.push_str(&render_sense(sense, numbered));
    }
    for allomorph in &entry.allomorphs {
        body.push_str(&format!("\\allomorph{{{}}}", escape_latex(allomorph)));
    }
    for sub in &entry.subentries {
        body.push_str(&format!("\\subentry{{{}}}", render_subentry(sub)));
    }

    format!("\\entry{{{}}}{{{}}}", headword, body)
}

fn render_etymology(etymology: &Etymology) -> String {
    match &etymology.language {
        Some(language) => format!(
            "\\etymologyfrom{{{}}}{{{}}}{{{}}}",
            escape_latex(&etymology.comment),
            escape_latex(language),
            escape_latex(&etymology.form)
        ),
        None => format!(
            "\\etymology{{{}}}{{{}}}",
            escape_latex(&etymology.comment),
            escape_latex(&etymology.form)
        ),
    }
}

fn render_sense(sense: &Sense, numbered: bool) -> String {
    let mut out = String::new();
    match &sense.display_number {
        Some(shown) => out.push_str(&format!("\\sensenumber{{{}}}", escape_latex(shown))),
        None if numbered => out.push_str(&format!("\\sensenumber{{{}}}", sense.number)),
        None => {}
    }
    out.push_str(&format!("\\definition{{{}}}", escape_latex(&sense.definition)));
    for example in &sense.examples {
        out.push_str(&render_example(example));
    }
    out
}

fn render_subentry(sub: &Entry) -> String {
    let mut out = format!("\\headword{{{}}}", escape_latex(&sub.headword));
    if let Some(pos) = &sub.part_of_speech {
        out.push_str(&format!("\\pos{{{}}}", escape_latex(pos)));
    }
    for sense in &sub.senses {
        out.push_str(&render_sense(sense, false));
    }
    out
}

fn render_example(example: &Example) -> String {
    format!(
        "\\example{{{}}}{{{}}}",
        escape_latex(&example.source_text),
        escape_latex(&example.translation)
    )
}

/// Word lists: one numbered list per part of speech.
pub fn render_word_lists(groups: &[PosGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let label = escape_latex(&group.label);
        out.push_str(&format!("\\section{{{}}}\n\\begin{{enumerate}}\n", label));
        for item in &group.items {
            out.push_str(&format!(
                "\\item \\entry{{{}}}{{\\headword{{{}}} \\definition{{1. {}}}}}\n",
                label,
                escape_latex(&item.headword),
                escape_latex(&item.definition)
            ));
        }
        out.push_str("\\end{enumerate}\n\n");
    }
    out
}

/// Semantic-domain lists.
pub fn render_domains(groups: &[DomainGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "\\section*{{{}}}\n\\begin{{entrylist}}\n",
            escape_latex(&group.domain)
        ));
        for item in &group.items {
            let headword = escape_latex(&item.headword);
            out.push_str(&format!(
                "\\entry{{{}}}\\headword{{{}}}{{\\pos{{{}}}}} {{\\definition{{{}}}}}\n",
                headword,
                headword,
                escape_latex(item.part_of_speech.as_deref().unwrap_or_default()),
                escape_latex(&item.definition)
            ));
        }
        out.push_str("\\end{entrylist}\n\n");
    }
    out
}

/// Standalone document with one itemized table per verb class.
pub fn render_verbs(groups: &[VerbGroup]) -> String {
    let mut out = String::from(VERB_PREAMBLE);
    for group in groups {
        out.push_str(&format!(
            "\\section*{{Class {} Verbs}}\n\\begin{{itemize}}\n",
            group.class
        ));
        for verb in &group.items {
            out.push_str(&format!(
                "\\item \\anpl{{{}}} \\apl{{{}}} \\defi{{{}}}",
                escape_latex(&verb.headword),
                escape_latex(&verb.plural_display()),
                escape_latex(&verb.definition)
            ));
            for example in &verb.examples {
                out.push_str(&format!(
                    " \\vex{{{}}}{{{}}}",
                    escape_latex(&example.source_text),
                    escape_latex(&example.translation)
                ));
            }
            out.push('\n');
        }
        out.push_str("\\end{itemize}\n\n");
    }
    out.push_str("\\end{document}\n");
    out
}
