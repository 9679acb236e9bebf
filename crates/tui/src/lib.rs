//! # navkit terminal gallery
//!
//! Renders navigation sections with rollups and text fields with numeric
//! steppers using Ratatui. The gallery is a host for the components: it
//! applies their navigation effects, keeps the active path in sync and runs
//! deferred collapses once a frame has been drawn.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use navkit_util::{GalleryConfig, UserPreferences};
use serde_json::{Value, json};

pub use app::AppOptions;
use app::App;

/// Runs the interactive gallery until the user quits.
///
/// # Errors
///
/// Fails when a field's pattern does not compile or the terminal cannot be
/// set up or restored.
pub async fn run(config: GalleryConfig, preferences: Arc<UserPreferences>, options: AppOptions) -> Result<()> {
    let app = App::new(config, preferences, options)?;
    ui::runtime::run_app(app).await
}

/// Describes the initial state of every component without a terminal: how
/// each section splits its items and which ids each field carries.
pub fn snapshot(config: GalleryConfig, preferences: Arc<UserPreferences>, options: AppOptions) -> Result<Value> {
    let app = App::new(config, preferences, options)?;
    let labels = |section: &ui::components::SectionState, indices: &[usize]| -> Vec<String> {
        indices.iter().map(|index| section.items[*index].label.clone()).collect()
    };
    let sections: Vec<Value> = app
        .sections
        .iter()
        .map(|section| {
            let layout = section.layout();
            json!({
                "id": section.id.0,
                "title": section.title,
                "additional_items_id": section.additional_items_id(),
                "active": section.active_index().map(|index| section.items[index].label.clone()),
                "visible": labels(section, &layout.visible),
                "collapsible": labels(section, &layout.collapsible),
                "toggle": section.shows_toggle().then(|| section.toggle_label()).flatten(),
            })
        })
        .collect();
    let fields: Vec<Value> = app
        .fields
        .iter()
        .map(|field| {
            json!({
                "id": field.id(),
                "label": field.props().label,
                "kind": field.props().kind.as_str(),
                "value": field.value(),
                "labelled_by": field.aria_labelledby(),
                "described_by": field.aria_describedby(),
                "auto_complete": field.auto_complete_attr(),
                "violations": field.validate().iter().map(|v| v.message()).collect::<Vec<_>>(),
            })
        })
        .collect();
    Ok(json!({
        "active_path": app.active_path,
        "match_mode": app.match_mode,
        "theme": app.theme_id,
        "sections": sections,
        "fields": fields,
    }))
}
