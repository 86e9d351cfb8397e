//! Integration tests for pattern and facet filtering over parsed records

use chat_export_extractor::filters::facets::{content_types, languages};
use chat_export_extractor::{ConversationRecord, FacetFilter, PatternMatcher, RecordStore};

fn store() -> RecordStore {
    RecordStore::from_slice(
        br#"[
        {"title":"Rust lifetimes","mapping":{"a":{"message":{"content":{"content_type":"text","parts":["```rust\nfn f<'a>() {}\n```"]}}}}},
        {"title":"Go channels","mapping":{"a":{"message":{"content":{"content_type":"code","language":"golang","text":"ch := make(chan int)"}}}}},
        {"title":"Scripts","mapping":{"a":{"message":{"content":{"content_type":"code","parts":["```sh\necho hi\n```","```py\nprint(1)\n```"]}}}}},
        {"title":"Plain chat","mapping":{"a":{"message":{"content":{"content_type":"text","parts":["hello there"]}}}}}
    ]"#,
    )
    .expect("Parse records")
}

fn titles<'a>(records: impl Iterator<Item = &'a ConversationRecord>) -> Vec<String> {
    records
        .map(|r| r.get("title").and_then(|t| t.as_str()).unwrap_or_default().to_string())
        .collect()
}

fn select(store: &RecordStore, matcher: &PatternMatcher, facets: &FacetFilter) -> Vec<String> {
    titles(store.iter().filter(|r| {
        let canonical = r.canonical_json().unwrap();
        matcher.matches_canonical(&canonical) && facets.matches(&canonical)
    }))
}

#[test]
fn test_filter_integration_literal_pattern() {
    let store = store();
    let matcher = PatternMatcher::new(["CHANNELS"]).expect("Compile pattern");
    assert_eq!(select(&store, &matcher, &FacetFilter::default()), vec!["Go channels"]);
}

#[test]
fn test_filter_integration_regex_pattern() {
    let store = store();
    let matcher = PatternMatcher::new([r"(go|rust) \w+"]).expect("Compile pattern");
    assert_eq!(
        select(&store, &matcher, &FacetFilter::default()),
        vec!["Rust lifetimes", "Go channels"]
    );
}

#[test]
fn test_filter_integration_empty_filters_keep_everything() {
    let store = store();
    let matcher = PatternMatcher::new(Vec::<String>::new()).expect("Compile patterns");
    assert_eq!(select(&store, &matcher, &FacetFilter::default()).len(), store.len());
}

#[test]
fn test_filter_integration_content_type() {
    let store = store();
    let matcher = PatternMatcher::new(["mapping"]).expect("Compile pattern");
    let facets = FacetFilter::new(vec!["code".to_string()], vec![]);
    assert_eq!(select(&store, &matcher, &facets), vec!["Go channels", "Scripts"]);
}

#[test]
fn test_filter_integration_language_alias() {
    let store = store();
    let matcher = PatternMatcher::new(["mapping"]).expect("Compile pattern");
    let facets = FacetFilter::new(vec![], vec!["go".to_string()]);
    assert_eq!(select(&store, &matcher, &facets), vec!["Go channels"]);
}

#[test]
fn test_filter_integration_languages_are_anded() {
    let store = store();
    let matcher = PatternMatcher::new(["mapping"]).expect("Compile pattern");

    let both = FacetFilter::new(vec![], vec!["bash".to_string(), "python3".to_string()]);
    assert_eq!(select(&store, &matcher, &both), vec!["Scripts"]);

    let disjoint = FacetFilter::new(vec![], vec!["rust".to_string(), "python".to_string()]);
    assert!(select(&store, &matcher, &disjoint).is_empty());
}

#[test]
fn test_filter_integration_content_type_and_language_combined() {
    let store = store();
    let matcher = PatternMatcher::new(["mapping"]).expect("Compile pattern");
    let facets = FacetFilter::new(vec!["text".to_string()], vec!["rust".to_string()]);
    assert_eq!(select(&store, &matcher, &facets), vec!["Rust lifetimes"]);
}

#[test]
fn test_filter_integration_facet_scan_is_textual() {
    // A "language" key anywhere in the record counts, even in unrelated metadata.
    let record: ConversationRecord =
        serde_json::from_str(r#"{"settings":{"ui":{"language":"TS"}},"type":"Conversation"}"#)
            .unwrap();
    let canonical = record.canonical_json().unwrap();

    assert!(languages(&canonical).contains("typescript"));
    assert!(content_types(&canonical).contains("conversation"));
}

#[test]
fn test_filter_integration_more_patterns_never_widen() {
    let store = store();
    let one = PatternMatcher::new(["mapping"]).unwrap();
    let two = PatternMatcher::new(["mapping", "code"]).unwrap();

    let wide = select(&store, &one, &FacetFilter::default());
    let narrow = select(&store, &two, &FacetFilter::default());
    assert!(narrow.iter().all(|t| wide.contains(t)));
    assert!(narrow.len() <= wide.len());
}
