use ordb_core::{CorpusMetadata, CorpusStatistics, ParsedQuery, SearchMode};
use ordb_pager::ansi::strip;
use ordb_types::{
    Definition, Entry, Example, ExampleHit, ExpressionSense, Gender, RelatedExpression, Senses,
    WordClass,
};
use serde_json::json;

use crate::render::{Focus, RenderOptions, Renderer};

fn example(definition_id: Option<i64>, quote: &str) -> Example {
    Example {
        entry_id: 1,
        definition_id,
        quote: quote.to_string(),
        explanation: None,
    }
}

fn hus() -> (Entry, Senses) {
    let entry = Entry::new(1, "hus", WordClass::Noun)
        .with_gender(Gender::Neuter)
        .with_inflections(["hus", "huset", "husa", "huset"])
        .with_etymology("norrønt hús");
    let senses = Senses::new(
        vec![
            Definition {
                id: 10,
                entry_id: 1,
                parent_id: None,
                level: 1,
                order_num: 1,
                content: "bygning til å bo i".to_string(),
            },
            Definition {
                id: 11,
                entry_id: 1,
                parent_id: Some(10),
                level: 2,
                order_num: 1,
                content: "hjem".to_string(),
            },
        ],
        vec![
            example(Some(10), "et stort Hus"),
            example(Some(10), "bygge hus"),
            example(None, "hus og hjem"),
        ],
    );
    (entry, senses)
}

#[test]
fn test_entry_layout() {
    let (entry, senses) = hus();
    let text = strip(&Renderer::new(RenderOptions::default()).entry(&entry, &senses, &[], "hus"));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "📖 hus [noun] (neuter)");
    assert_eq!(lines[1], "  Inflections: huset, husa");
    assert_eq!(lines[2], "  Etymology: norrønt hús");
    assert_eq!(lines[3], "  1. bygning til å bo i");
    assert_eq!(lines[4], "     et stort Hus; bygge hus");
    assert_eq!(lines[5], "    - hjem");
    assert_eq!(lines[6], "  Examples: hus og hjem");
}

#[test]
fn test_term_highlighted_in_examples() {
    let (entry, senses) = hus();
    let text = Renderer::new(RenderOptions::default()).entry(&entry, &senses, &[], "hus");
    assert!(text.contains("\x1b[1;4mHus\x1b[22;24m"));
}

#[test]
fn test_display_switches() {
    let (entry, senses) = hus();
    let options = RenderOptions {
        show_definitions: false,
        max_examples: Some(1),
        show_inflections: false,
        show_etymology: false,
        ..RenderOptions::default()
    };
    let text = strip(&Renderer::new(options).entry(&entry, &senses, &[], "hus"));

    assert!(!text.contains("Inflections"));
    assert!(!text.contains("Etymology"));
    assert!(!text.contains("bygning"));
    assert!(text.contains("et stort Hus"));
    assert!(!text.contains("bygge hus"));
}

#[test]
fn test_related_expressions_listed() {
    let (entry, senses) = hus();
    let related = vec![RelatedExpression {
        entry_id: 5,
        lemma: "hus og heim".to_string(),
        senses: vec![ExpressionSense {
            definition_id: 50,
            content: "alt man eier".to_string(),
            examples: vec![example(Some(50), "miste hus og heim")],
        }],
    }];
    let text = strip(&Renderer::new(RenderOptions::default()).entry(&entry, &senses, &related, "hus"));

    assert!(text.contains("  Faste uttrykk:"));
    assert!(text.contains("    • hus og heim"));
    assert!(text.contains("      alt man eier"));
    assert!(text.contains("        miste hus og heim"));
}

#[test]
fn test_headers() {
    let renderer = Renderer::new(RenderOptions::default());
    let query = |mode| ParsedQuery {
        mode,
        term: "hus".to_string(),
    };

    assert_eq!(
        strip(&renderer.header(&query(SearchMode::Fuzzy), 0.6, false)),
        "🔍 Fuzzy search for '~hus' (threshold: 0.6)"
    );
    assert!(strip(&renderer.header(&query(SearchMode::Prefix), 0.6, true)).starts_with("🔍 No exact match"));
    assert_eq!(
        strip(&renderer.header(&query(SearchMode::Fulltext), 0.6, false)),
        "🔍 Full-text search for '%hus' (all content)"
    );
}

#[test]
fn test_summary() {
    let renderer = Renderer::new(RenderOptions::default());
    assert_eq!(renderer.summary(1, 50), None);
    assert_eq!(strip(&renderer.summary(3, 50).unwrap()), "\nFound 3 results.");
    assert_eq!(
        strip(&renderer.summary(60, 50).unwrap()),
        "\nFound 60 results (showing 50). Use --limit 60 to see all."
    );
}

#[test]
fn test_all_examples_truncated() {
    let hits: Vec<ExampleHit> = ["gå hjem", "gå en tur", "gå ut"]
        .iter()
        .map(|quote| ExampleHit {
            quote: quote.to_string(),
            explanation: None,
            lemma: "gå".to_string(),
            word_class: WordClass::Verb,
        })
        .collect();

    let text = strip(&Renderer::new(RenderOptions::default()).all_examples("gå", &hits, 2));
    assert!(text.contains("Found 3 example(s) containing 'gå':"));
    assert!(text.contains("  gå hjem; gå en tur"));
    assert!(!text.contains("gå ut"));
    assert!(text.contains("... and 1 more example(s)"));

    let empty = strip(&Renderer::new(RenderOptions::default()).all_examples("xyz", &[], 2));
    assert!(empty.ends_with("No examples found containing 'xyz'."));
}

fn focused(focus: Focus) -> Renderer {
    Renderer::new(RenderOptions {
        focus,
        show_definitions: false,
        show_examples: focus == Focus::Examples,
        ..RenderOptions::default()
    })
}

fn with_paradigm(mut entry: Entry) -> Entry {
    entry.inflection_table = json!({
        "Plur": ["hus", "husa"],
        "Sing": ["hus", "huset"],
    });
    entry
}

fn related() -> Vec<RelatedExpression> {
    vec![
        RelatedExpression {
            entry_id: 5,
            lemma: "hus og heim".to_string(),
            senses: vec![ExpressionSense {
                definition_id: 50,
                content: "alt man eier".to_string(),
                examples: vec![example(Some(50), "miste hus og heim")],
            }],
        },
        RelatedExpression {
            entry_id: 6,
            lemma: "holde hus".to_string(),
            senses: vec![ExpressionSense {
                definition_id: 60,
                content: "styre".to_string(),
                examples: Vec::new(),
            }],
        },
    ]
}

#[test]
fn test_compact_inflections_from_table() {
    let (entry, senses) = hus();
    let entry = with_paradigm(entry);
    let text = strip(&Renderer::new(RenderOptions::default()).entry(&entry, &senses, &[], "hus"));

    assert_eq!(
        text.lines().nth(1),
        Some("  Inflections: Singular: hus, huset | Plural: hus, husa")
    );
}

#[test]
fn test_only_inflections_one_category_per_line() {
    let (entry, senses) = hus();
    let entry = with_paradigm(entry);
    let text = strip(&focused(Focus::Inflections).entry(&entry, &senses, &related(), "hus"));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "📖 hus [noun] (neuter)",
            "  Inflections:",
            "    Singular: hus, huset",
            "    Plural: hus, husa",
        ]
    );
}

#[test]
fn test_only_inflections_without_table() {
    let (entry, senses) = hus();
    let text = strip(&focused(Focus::Inflections).entry(&entry, &senses, &[], "hus"));
    assert!(text.ends_with("  Inflections:\n    Forms: huset, husa"));

    let bare = Entry::new(2, "og", WordClass::Other("CCONJ".into()));
    let text = strip(&focused(Focus::Inflections).entry(&bare, &Senses::default(), &[], "og"));
    assert!(text.ends_with("  Inflections: none"));
}

#[test]
fn test_only_etymology() {
    let (entry, senses) = hus();
    let text = strip(&focused(Focus::Etymology).entry(&entry, &senses, &related(), "hus"));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines, vec!["📖 hus [noun] (neuter)", "  Etymology: norrønt hús"]);
}

#[test]
fn test_only_examples_include_expression_examples() {
    let (entry, senses) = hus();
    let text = strip(&focused(Focus::Examples).entry(&entry, &senses, &related(), "hus"));

    assert!(text.contains("et stort Hus; bygge hus"));
    assert!(text.contains("Examples: hus og hjem"));
    assert!(!text.contains("bygning"));
    assert!(!text.contains("Inflections"));
    assert!(!text.contains("Etymology"));

    assert!(text.contains("  Faste uttrykk:"));
    assert!(text.contains("    • hus og heim"));
    assert!(text.contains("        miste hus og heim"));
    assert!(!text.contains("alt man eier"));
    // No examples to show
    assert!(!text.contains("holde hus"));
}

#[test]
fn test_statistics() {
    let stats = CorpusStatistics {
        metadata: CorpusMetadata {
            name: "articles.db".to_string(),
            entry_count: 5,
        },
        definition_count: 4,
        example_count: 7,
        word_classes: vec![
            (WordClass::Noun, 2),
            (WordClass::Verb, 2),
            (WordClass::Other(String::new()), 1),
        ],
    };
    let text = strip(&Renderer::new(RenderOptions::default()).statistics(&stats));

    assert!(text.starts_with("📊 Dictionary statistics (articles.db)"));
    assert!(text.contains("  Entries:     5"));
    assert!(text.contains("  Definitions: 4"));
    assert!(text.contains("  Examples:    7"));
    assert!(text.contains("  [noun]              2  (40.0%)"));
    assert!(text.contains("  [unknown]           1  (20.0%)"));
}
