use std::sync::Arc;

use navkit_tui::{AppOptions, snapshot};
use navkit_types::PathMatchMode;
use navkit_util::{GalleryConfig, UserPreferences};

const CONFIG: &str = r#"{
    "sections": [
        {
            "title": "Catalog",
            "items": [
                { "label": "Cat", "url": "/cat" },
                { "label": "Dogs", "url": "/dogs" },
                { "label": "Category", "url": "/category" }
            ],
            "rollup": { "after": 1, "view": "More", "hide": "Less" }
        }
    ],
    "fields": [
        { "label": "Count", "id": "count", "kind": "number", "value": "12", "max": 10, "help_text": "Up to ten" }
    ]
}"#;

fn run(mode: PathMatchMode, active_path: &str) -> serde_json::Value {
    let config = GalleryConfig::from_json_str(CONFIG).expect("valid config");
    snapshot(
        config,
        Arc::new(UserPreferences::ephemeral()),
        AppOptions {
            match_mode: Some(mode),
            active_path: Some(active_path.to_string()),
            ..AppOptions::default()
        },
    )
    .expect("snapshot")
}

#[test]
fn prefix_mode_claims_the_first_prefix_match() {
    let value = run(PathMatchMode::Prefix, "/category/toys");
    let section = &value["sections"][0];
    assert_eq!(section["active"], "Cat");
    assert_eq!(section["visible"], serde_json::json!(["Cat"]));
    assert_eq!(section["toggle"], "More");
}

#[test]
fn segment_mode_promotes_the_real_match() {
    let value = run(PathMatchMode::SegmentBoundary, "/category/toys");
    let section = &value["sections"][0];
    assert_eq!(section["active"], "Category");
    assert_eq!(section["visible"], serde_json::json!(["Cat", "Category"]));
    assert_eq!(section["collapsible"], serde_json::json!(["Dogs"]));
}

#[test]
fn fields_report_ids_and_violations() {
    let value = run(PathMatchMode::Prefix, "/");
    let field = &value["fields"][0];
    assert_eq!(field["id"], "count");
    assert_eq!(field["labelled_by"], serde_json::json!(["countLabel"]));
    assert_eq!(field["described_by"], "countHelpText");
    assert_eq!(field["violations"], serde_json::json!(["Must be 10 or less"]));
}
