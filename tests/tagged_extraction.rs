use lexitex::lexicon::extract::{DivisionKind, TaggedExtractor};
use lexitex::lexicon::markup::Document;
use lexitex::lexicon::{ConvertOptions, Diagnostics, RecordKind};
use lexitex::{DivisionRecord, Entry, Etymology, Example, Sense, VariantRef};
use pretty_assertions::assert_eq;

fn page(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<html><head><meta charset=\"utf-8\"><title>Dictionary</title></head><body>{}</body></html>",
        body
    )
}

fn headword(word: &str) -> String {
    format!(
        "<span class=\"mainheadword\"><span lang=\"kit\"><a href=\"#g1\">{}</a></span></span>",
        word
    )
}

fn sense(definition: &str) -> String {
    format!(
        "<span class=\"sensecontent\"><span class=\"sense\"><span class=\"definitionorgloss\"><span lang=\"en\">{}</span></span></span></span>",
        definition
    )
}

fn extract(body: &str) -> (Vec<DivisionRecord>, Diagnostics) {
    let doc = Document::parse(&page(body)).expect("parse");
    let options = ConvertOptions::default();
    let mut diagnostics = Diagnostics::new();
    let records = TaggedExtractor::new(&doc, &options).extract_all(&mut diagnostics);
    (records, diagnostics)
}

fn single_entry(body: &str) -> Entry {
    let (records, diagnostics) = extract(body);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics.skipped());
    match records.as_slice() {
        [DivisionRecord::Entry(entry)] => entry.clone(),
        other => panic!("expected one entry, got {:?}", other),
    }
}

#[test]
fn minimal_entry_round_trips() {
    let entry = single_entry(&format!(
        "<div class=\"entry\" id=\"g1\">{}<span class=\"senses\">{}</span></div>",
        headword("aba"),
        sense("to eat")
    ));

    let mut expected = Entry::new("aba");
    expected.senses = vec![Sense::new(1, "to eat")];
    assert_eq!(entry, expected);
    assert!(entry.etymology.is_none());
    assert!(entry.allomorphs.is_empty());
    assert!(entry.subentries.is_empty());
}

#[test]
fn entry_without_headword_is_skipped_once() {
    let (records, diagnostics) = extract(&format!(
        "<div class=\"entry\"><span class=\"mainheadword\"><span lang=\"en\">aba</span></span>{}</div>\
         <div class=\"entry\">{}{}</div>",
        sense("to eat"),
        headword("abe"),
        sense("to drink")
    ));

    assert_eq!(records.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    let skip = &diagnostics.skipped()[0];
    assert_eq!(skip.kind, RecordKind::Entry);
    assert_eq!(skip.index, 1);
    assert_eq!(skip.field, "headword");
}

#[test]
fn letter_headings_are_kept_and_unknown_divisions_ignored() {
    let (records, diagnostics) = extract(&format!(
        "<div class=\"letHead\"><span class=\"letter\">A a</span></div>\
         <div class=\"pictures\"><span>ignored</span></div>\
         <div class=\"entry\">{}{}</div>",
        headword("aba"),
        sense("to eat")
    ));

    assert!(diagnostics.is_empty());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], DivisionRecord::LetterHeading("A a".to_string()));
}

#[test]
fn divisions_are_classified_by_class_token() {
    let doc = Document::parse(&page(
        "<div class=\"letHead\"/><div class=\"entry\"/><div class=\"minorentryvariant\"/><div class=\"other\"/>",
    ))
    .expect("parse");
    let options = ConvertOptions::default();
    let extractor = TaggedExtractor::new(&doc, &options);
    let kinds: Vec<DivisionKind> = extractor
        .divisions()
        .into_iter()
        .map(|div| extractor.classify(div))
        .collect();
    assert_eq!(
        kinds,
        [
            DivisionKind::LetterHeading,
            DivisionKind::Entry,
            DivisionKind::Variant,
            DivisionKind::Ignored
        ]
    );
}

#[test]
fn three_part_etymology_is_preferred() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"etymologies\"><span class=\"etymology\">\
         <span class=\"preccomment\">From</span> <span class=\"name\">Proto-Bantu</span> \
         <span class=\"form\">*aba</span></span></span>{}</div>",
        headword("aba"),
        sense("to eat")
    ));
    assert_eq!(
        entry.etymology,
        Some(Etymology {
            comment: "From".to_string(),
            language: Some("Proto-Bantu".to_string()),
            form: "*aba".to_string(),
        })
    );
}

#[test]
fn two_part_etymology_is_the_fallback() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"etymology\"><span class=\"preccomment\">Borrowed</span>\
         <span class=\"form\">abba</span></span>{}</div>",
        headword("aba"),
        sense("to eat")
    ));
    assert_eq!(
        entry.etymology,
        Some(Etymology {
            comment: "Borrowed".to_string(),
            language: None,
            form: "abba".to_string(),
        })
    );
}

#[test]
fn partial_etymology_is_omitted() {
    for parts in [
        "<span class=\"name\">Swahili</span>",
        "<span class=\"form\">abba</span>",
        "<span class=\"preccomment\">From</span>",
        "<span class=\"name\">Swahili</span><span class=\"form\">abba</span>",
    ] {
        let entry = single_entry(&format!(
            "<div class=\"entry\">{}<span class=\"etymology\">{}</span>{}</div>",
            headword("aba"),
            parts,
            sense("to eat")
        ));
        assert_eq!(entry.etymology, None, "etymology built from {}", parts);
    }
}

#[test]
fn examples_pair_with_following_translation() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"sensecontent\"><span class=\"sense\">\
         <span class=\"definitionorgloss\"><span lang=\"en\">to eat</span></span>\
         <span class=\"examplescontents\">\
           <span class=\"examplescontent\"><span class=\"example\"><span lang=\"kit\">ba aba</span></span>\
             <span class=\"translationcontents\"><span class=\"translation\"><span lang=\"en\">they eat</span></span></span></span>\
           <span class=\"examplescontent\"><span class=\"example\"><span lang=\"kit\">mu aba</span></span></span>\
           <span class=\"examplescontent\"><span class=\"example\"><span lang=\"kit\">mu aba ndi</span></span>\
             <span class=\"translationcontents\"><span class=\"translation\"><span lang=\"en\">he eats</span></span></span></span>\
         </span></span></span></div>",
        headword("aba")
    ));

    let pairs: Vec<(&str, &str)> = entry.senses[0]
        .examples
        .iter()
        .map(|e| (e.source_text.as_str(), e.translation.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("ba aba", "they eat"),
            ("mu aba", "he eats"),
            ("mu aba ndi", "he eats"),
        ]
    );
}

#[test]
fn subentry_examples_stay_with_the_subentry() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"sense\">\
           <span class=\"definitionorgloss\"><span lang=\"en\">to eat</span></span>\
           <span class=\"example\"><span lang=\"kit\">ba aba</span></span>\
           <span class=\"translation\"><span lang=\"en\">they eat</span></span>\
           <span class=\"subentry\"><span class=\"headword\">aba ntu</span>\
             <span class=\"definitionorgloss\"><span lang=\"en\">glutton</span></span>\
             <span class=\"example\"><span lang=\"kit\">ntu aba</span></span>\
             <span class=\"translation\"><span lang=\"en\">the glutton</span></span></span>\
         </span></div>",
        headword("aba")
    ));

    assert_eq!(
        entry.senses[0].examples,
        vec![Example {
            source_text: "ba aba".to_string(),
            translation: "they eat".to_string(),
        }]
    );
    assert_eq!(entry.subentries.len(), 1);
    assert_eq!(
        entry.subentries[0].senses[0].examples,
        vec![Example {
            source_text: "ntu aba".to_string(),
            translation: "the glutton".to_string(),
        }]
    );
}

#[test]
fn trailing_example_without_translation_is_dropped() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"sense\"><span class=\"definitionorgloss\"><span lang=\"en\">to eat</span></span>\
         <span class=\"example\"><span lang=\"kit\">ba aba</span></span></span></div>\
         <div class=\"reversalindex\"><span class=\"translation\">belongs elsewhere</span></div>",
        headword("aba")
    ));
    assert_eq!(entry.senses.len(), 1);
    assert!(entry.senses[0].examples.is_empty());
}

#[test]
fn senses_are_numbered_by_position() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"senses\">\
         <span class=\"sensecontent\"><span class=\"sensenumber\">1</span>{}</span>\
         <span class=\"sensecontent\"><span class=\"sensenumber\">3</span>{}</span>\
         </span></div>",
        headword("aba"),
        sense("to eat"),
        sense("to consume")
    ));

    let numbers: Vec<(usize, Option<&str>)> = entry
        .senses
        .iter()
        .map(|s| (s.number, s.display_number.as_deref()))
        .collect();
    assert_eq!(numbers, [(1, Some("1")), (2, Some("3"))]);
}

#[test]
fn sense_number_is_not_borrowed_from_earlier_sense() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}<span class=\"sensenumber\">1</span>{}{}</div>",
        headword("aba"),
        sense("to eat"),
        sense("to consume")
    ));
    assert_eq!(entry.senses[0].display_number.as_deref(), Some("1"));
    assert_eq!(entry.senses[1].display_number, None);
}

#[test]
fn definition_joins_leaf_spans_and_falls_back() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}\
         <span class=\"sense\"><span class=\"definitionorgloss\"><span lang=\"en\"><span>to</span> <span>eat</span></span><span lang=\"en\">quickly</span></span></span>\
         <span class=\"sense\"><span class=\"gramminfo\">nothing here</span></span>\
         </div>",
        headword("aba")
    ));
    assert_eq!(entry.senses[0].definition, "to eat quickly");
    assert_eq!(entry.senses[1].definition, "no definition provided");
    assert!(!entry.senses[1].is_defined());
}

#[test]
fn sense_part_of_speech_overrides_entry() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}\
         <span class=\"sharedgrammaticalinfo\"><span class=\"partofspeech\"><span lang=\"en\">v</span></span></span>\
         {}\
         <span class=\"sense\"><span class=\"partofspeech\"><span lang=\"en\">n</span></span>\
           <span class=\"definitionorgloss\"><span lang=\"en\">food</span></span></span>\
         </div>",
        headword("aba"),
        sense("to eat")
    ));

    assert_eq!(entry.part_of_speech.as_deref(), Some("v"));
    assert_eq!(entry.effective_pos(&entry.senses[0]), "v");
    assert_eq!(entry.effective_pos(&entry.senses[1]), "n");
}

#[test]
fn entry_pos_ignores_sense_level_spans() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}{}\
         <span class=\"sense\"><span class=\"partofspeech\">n</span>\
           <span class=\"definitionorgloss\"><span lang=\"en\">food</span></span></span>\
         </div>",
        headword("aba"),
        sense("to eat")
    ));
    assert_eq!(entry.part_of_speech, None);
    assert_eq!(entry.effective_pos(&entry.senses[0]), "unknown");
}

#[test]
fn allomorphs_keep_order_and_need_object_language() {
    let entry = single_entry(&format!(
        "<div class=\"entry\">{}{}<span class=\"allomorphs\">\
         <span class=\"allomorph\"><span lang=\"kit\">-ab</span></span>\
         <span class=\"allomorph\"><span lang=\"en\">not a form</span></span>\
         <span class=\"allomorph\"><span lang=\"kit\">-eb</span></span>\
         </span></div>",
        headword("aba"),
        sense("to eat")
    ));
    assert_eq!(entry.allomorphs, ["-ab", "-eb"]);
}

#[test]
fn subentries_need_headword_and_definition() {
    let (records, diagnostics) = extract(&format!(
        "<div class=\"entry\">{}{}<span class=\"subentries\">\
         <span class=\"subentry\"><span class=\"headword\">aba ntu</span>\
           <span class=\"partofspeech\">n</span>\
           <span class=\"sense\"><span class=\"definitionorgloss\"><span lang=\"en\">glutton</span></span></span>\
           <span class=\"example\"><span lang=\"kit\">ntu aba</span></span>\
           <span class=\"translation\"><span lang=\"en\">the glutton</span></span></span>\
         <span class=\"subentry\"><span class=\"headword\">aba bi</span></span>\
         </span></div>",
        headword("aba"),
        sense("to eat")
    ));

    let entry = match records.as_slice() {
        [DivisionRecord::Entry(entry)] => entry,
        other => panic!("expected one entry, got {:?}", other),
    };
    assert_eq!(entry.senses.len(), 1, "subentry senses belong to the subentry");
    assert_eq!(entry.subentries.len(), 1);

    let sub = &entry.subentries[0];
    assert_eq!(sub.headword, "aba ntu");
    assert_eq!(sub.part_of_speech.as_deref(), Some("n"));
    assert_eq!(sub.senses[0].definition, "glutton");
    assert_eq!(sub.senses[0].examples.len(), 1);

    assert_eq!(diagnostics.len(), 1);
    let skip = &diagnostics.skipped()[0];
    assert_eq!(skip.kind, RecordKind::Subentry);
    assert_eq!(skip.parent.as_deref(), Some("aba"));
    assert_eq!(skip.headword.as_deref(), Some("aba bi"));
    assert_eq!(skip.field, "definition or gloss");
    assert_eq!(
        skip.to_string(),
        "Skipping subentry 2 'aba bi' under 'aba': missing definition or gloss"
    );
}

#[test]
fn complete_variant_points_at_its_entry() {
    let entry = single_entry(
        "<div class=\"minorentryvariant\"><span class=\"headword\"><span lang=\"kit\">abai</span></span>\
         <span class=\"visiblevariantentryrefs\"><span class=\"reverseabbr\">pl. of</span>\
         <span class=\"referencedentry\"><span class=\"headword\"><span lang=\"kit\">aba</span></span></span></span></div>",
    );

    let mut expected = Entry::new("abai");
    expected.variant_of = Some(VariantRef {
        variant_type: "pl. of".to_string(),
        headword: "aba".to_string(),
    });
    assert_eq!(entry, expected);
}

#[test]
fn incomplete_variants_name_the_missing_field() {
    let (records, diagnostics) = extract(
        "<div class=\"minorentryvariant\"><span class=\"reverseabbr\">pl. of</span></div>\
         <div class=\"minorentryvariant\"><span class=\"headword\">abai</span>\
           <span class=\"referencedentry\"><span lang=\"kit\">aba</span></span></div>\
         <div class=\"minorentryvariant\"><span class=\"headword\">abae</span>\
           <span class=\"reverseabbr\">pl. of</span></div>\
         <div class=\"minorentryvariant\"><span class=\"headword\">abao</span>\
           <span class=\"reverseabbr\">pl. of</span><span class=\"referencedentry\">aba</span></div>",
    );

    assert!(records.is_empty());
    let fields: Vec<&str> = diagnostics.skipped().iter().map(|s| s.field).collect();
    assert_eq!(
        fields,
        ["headword", "reverse abbreviation", "referenced entry", "referenced headword"]
    );
    assert!(diagnostics.skipped().iter().all(|s| s.kind == RecordKind::Variant));
    assert_eq!(diagnostics.skipped()[3].headword.as_deref(), Some("abao"));
}
