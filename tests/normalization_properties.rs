//! Property tests for the normalization guarantees
//!
//! Guides are generated from random combinations of start times, categories,
//! descriptions and episode numbers, laid out flat, nested, under a default
//! namespace, under a prefixed root and inside a wrapper that rebinds the
//! default namespace.

use proptest::prelude::*;

use epg_series::normalize_bytes;
use epg_series::xmltv::{Element, QName, load_document};

const STARTS: &[&str] = &[
    "20240115200000 +0000",
    "20230101",
    "20241231235959",
    "2024",
    "bad start value",
    "00000101000000",
    "20241301000000",
];

const CATEGORIES: &[&str] = &["News", "Drama", "series", ""];

const DESCRIPTIONS: &[&str] = &[
    "S02E05",
    "Season 3, Episode 4: reunion",
    "Series 1 ... Ep 12",
    "Series 3\r\nEp 4",
    "S00E00 pilot",
    "Nothing to see here",
    "",
];

const EPISODE_NUMS: &[(&str, &str)] = &[
    ("xmltv_ns", ""),
    ("xmltv_ns", "1.2."),
    (" XMLTV_NS ", "   "),
    ("onscreen", "E1"),
];

#[derive(Debug, Clone, Copy)]
enum Layout {
    Flat,
    Nested,
    DefaultNamespace,
    PrefixedRoot,
    ShadowedNamespace,
}

const LAYOUTS: &[Layout] = &[
    Layout::Flat,
    Layout::Nested,
    Layout::DefaultNamespace,
    Layout::PrefixedRoot,
    Layout::ShadowedNamespace,
];

#[derive(Debug, Clone)]
struct ProgrammeInput {
    start: Option<&'static str>,
    categories: Vec<&'static str>,
    desc: Option<&'static str>,
    episode_nums: Vec<(&'static str, &'static str)>,
}

fn programme_input() -> impl Strategy<Value = ProgrammeInput> {
    (
        proptest::option::of(prop::sample::select(STARTS)),
        prop::collection::vec(prop::sample::select(CATEGORIES), 0..3),
        proptest::option::of(prop::sample::select(DESCRIPTIONS)),
        prop::collection::vec(prop::sample::select(EPISODE_NUMS), 0..3),
    )
        .prop_map(|(start, categories, desc, episode_nums)| ProgrammeInput {
            start,
            categories,
            desc,
            episode_nums,
        })
}

fn render_guide(layout: Layout, programmes: &[ProgrammeInput]) -> String {
    let (open, close, prefix) = match layout {
        Layout::Flat => ("<tv>", "</tv>", ""),
        Layout::Nested => ("<tv><group>", "</group></tv>", ""),
        Layout::DefaultNamespace => (r#"<tv xmlns="urn:example:tv">"#, "</tv>", ""),
        Layout::PrefixedRoot => (r#"<t:tv xmlns:t="urn:example:tv">"#, "</t:tv>", "t:"),
        Layout::ShadowedNamespace => (
            r#"<tv xmlns="urn:example:tv"><wrap xmlns="urn:example:other" xmlns:t="urn:example:tv">"#,
            "</wrap></tv>",
            "t:",
        ),
    };

    let mut xml = String::from(open);
    for programme in programmes {
        render_programme(&mut xml, prefix, programme);
    }
    xml.push_str(close);
    xml
}

fn render_programme(xml: &mut String, prefix: &str, programme: &ProgrammeInput) {
    match programme.start {
        Some(start) => xml.push_str(&format!(r#"<{prefix}programme start="{start}">"#)),
        None => xml.push_str(&format!("<{prefix}programme>")),
    }
    xml.push_str(&format!("<{prefix}title>Show</{prefix}title>"));
    for category in &programme.categories {
        xml.push_str(&format!("<{prefix}category>{category}</{prefix}category>"));
    }
    if let Some(desc) = programme.desc {
        xml.push_str(&format!("<{prefix}desc>{desc}</{prefix}desc>"));
    }
    for (system, value) in &programme.episode_nums {
        xml.push_str(&format!(
            r#"<{prefix}episode-num system="{system}">{value}</{prefix}episode-num>"#
        ));
    }
    xml.push_str(&format!("</{prefix}programme>"));
}

fn collect_named<'a>(element: &'a Element, name: &QName, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if &child.name == name {
            found.push(child);
        }
        collect_named(child, name, found);
    }
}

fn is_xmltv_ns(element: &Element) -> bool {
    element
        .attribute("system")
        .is_some_and(|system| system.trim().eq_ignore_ascii_case("xmltv_ns"))
}

proptest! {
    #[test]
    fn test_normalization_is_idempotent(
        layout in prop::sample::select(LAYOUTS),
        programmes in prop::collection::vec(programme_input(), 0..5)
    ) {
        let xml = render_guide(layout, &programmes);

        let (first, _) = normalize_bytes(xml.as_bytes(), 2).unwrap();
        let (second, summary) = normalize_bytes(&first, 2).unwrap();

        prop_assert!(summary.is_unchanged(), "second run changed {}: {}", summary, xml);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_categories_preserved_or_single_series(
        layout in prop::sample::select(LAYOUTS),
        programmes in prop::collection::vec(programme_input(), 0..5)
    ) {
        let xml = render_guide(layout, &programmes);
        let (output, _) = normalize_bytes(xml.as_bytes(), 2).unwrap();
        let document = load_document(&output).unwrap();

        let mut found = Vec::new();
        collect_named(&document.root, &document.root.name.sibling("programme"), &mut found);
        prop_assert_eq!(found.len(), programmes.len());

        let category = document.root.name.sibling("category");
        for (programme, input) in found.iter().zip(&programmes) {
            let texts: Vec<&str> = programme.children_named(&category).map(|c| c.text()).collect();
            if input.categories.is_empty() {
                prop_assert_eq!(texts, vec!["series"]);
            } else {
                prop_assert_eq!(texts, input.categories.clone());
            }
        }
    }

    #[test]
    fn test_no_blank_xmltv_ns_remains(
        layout in prop::sample::select(LAYOUTS),
        programmes in prop::collection::vec(programme_input(), 0..5)
    ) {
        let xml = render_guide(layout, &programmes);
        let (output, _) = normalize_bytes(xml.as_bytes(), 2).unwrap();
        let document = load_document(&output).unwrap();

        let mut episode_nums = Vec::new();
        collect_named(&document.root, &document.root.name.sibling("episode-num"), &mut episode_nums);
        for episode in episode_nums.iter().filter(|e| is_xmltv_ns(e)) {
            prop_assert!(!episode.text().trim().is_empty(), "blank xmltv_ns in {}", xml);
        }

        let mut found = Vec::new();
        collect_named(&document.root, &document.root.name.sibling("programme"), &mut found);
        for (programme, input) in found.iter().zip(&programmes) {
            let had_xmltv_ns = input
                .episode_nums
                .iter()
                .any(|(system, _)| system.trim().eq_ignore_ascii_case("xmltv_ns"));
            let has_xmltv_ns = programme
                .children_named(&document.root.name.sibling("episode-num"))
                .any(is_xmltv_ns);
            if had_xmltv_ns {
                prop_assert!(has_xmltv_ns);
            }
        }
    }
}
