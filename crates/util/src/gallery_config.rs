//! Gallery configuration: the sections and fields a host wants to mount,
//! loaded from JSON.
//!
//! ```json
//! {
//!   "active_path": "/orders/drafts",
//!   "sections": [
//!     {
//!       "title": "Store",
//!       "items": [{ "label": "Orders", "url": "/orders" }],
//!       "rollup": { "after": 3, "view": "View all", "hide": "Hide" }
//!     }
//!   ],
//!   "fields": [{ "label": "Quantity", "kind": "number", "min": 0 }]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use navkit_types::{NavItem, Rollup, SectionAction, SubNavItem, TextFieldProps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryConfigError {
    #[error("failed to read gallery config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid gallery config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("section '{section}' lists '{label}' more than once; item labels must be unique")]
    DuplicateLabel { section: String, label: String },
    #[error("field '{label}' has a non-positive step {step}")]
    InvalidStep { label: String, step: f64 },
}

/// One navigation section as described in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub title: Option<String>,
    pub items: Vec<NavItem>,
    pub rollup: Option<Rollup>,
    pub action: Option<SectionAction>,
    pub separator: bool,
    pub fill: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Initial navigation location. Overrides each rollup's `active_path`
    /// when set.
    pub active_path: Option<String>,
    pub sections: Vec<SectionConfig>,
    pub fields: Vec<TextFieldProps>,
}

impl GalleryConfig {
    pub fn from_json_str(input: &str) -> Result<Self, GalleryConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GalleryConfigError> {
        let data = fs::read_to_string(path).map_err(|source| GalleryConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Checks label uniqueness per section and step positivity per field.
    pub fn validate(&self) -> Result<(), GalleryConfigError> {
        for section in &self.sections {
            let mut seen = HashSet::new();
            for item in &section.items {
                if !seen.insert(item.label.as_str()) {
                    return Err(GalleryConfigError::DuplicateLabel {
                        section: section.title.clone().unwrap_or_default(),
                        label: item.label.clone(),
                    });
                }
            }
        }
        for field in &self.fields {
            if let Some(step) = field.step
                && !(step > 0.0)
            {
                return Err(GalleryConfigError::InvalidStep {
                    label: field.label.clone(),
                    step,
                });
            }
        }
        Ok(())
    }

    /// Built-in demo content shown when no config file is given.
    pub fn demo() -> Self {
        let store = SectionConfig {
            title: None,
            items: vec![
                NavItem::new("Home").with_url("/home").with_icon("⌂"),
                NavItem::new("Orders")
                    .with_url("/orders")
                    .with_icon("≡")
                    .with_badge("12")
                    .with_sub_items(vec![
                        SubNavItem::new("Drafts", "/draft_orders"),
                        SubNavItem::new("Abandoned checkouts", "/checkouts"),
                    ]),
                NavItem::new("Products")
                    .with_url("/products")
                    .with_icon("◆")
                    .with_sub_items(vec![
                        SubNavItem::new("Inventory", "/inventory"),
                        SubNavItem::new("Collections", "/collections"),
                    ]),
                NavItem::new("Customers").with_url("/customers").with_icon("☺"),
                NavItem::new("Analytics").with_url("/analytics").with_icon("↗"),
                NavItem::new("Discounts").with_url("/discounts").with_icon("%"),
                NavItem::new("Apps").with_url("/apps").with_icon("▦"),
            ],
            rollup: Some(Rollup::new(4, "")),
            action: None,
            separator: false,
            fill: false,
        };
        let channels = SectionConfig {
            title: Some("Sales channels".to_string()),
            items: vec![
                NavItem::new("Online Store").with_url("/online_store").with_icon("◍"),
                NavItem::new("Point of Sale").with_url("/pos").with_icon("▣"),
            ],
            rollup: None,
            action: Some(SectionAction {
                icon: "+".to_string(),
                accessibility_label: "Add sales channel".to_string(),
            }),
            separator: true,
            fill: true,
        };
        let fields = vec![
            TextFieldProps {
                help_text: Some("Units to reorder".to_string()),
                ..TextFieldProps::number("Quantity").with_value("3").with_bounds(Some(0.0), Some(99.0))
            },
            TextFieldProps {
                prefix: Some("$".to_string()),
                suffix: Some(".00".to_string()),
                ..TextFieldProps::number("Price").with_value("1.25").with_step(0.5)
            },
            TextFieldProps {
                placeholder: Some("name@example.com".to_string()),
                pattern: Some(r"[^@\s]+@[^@\s]+".to_string()),
                auto_complete: Some(false),
                kind: navkit_types::FieldKind::Email,
                ..TextFieldProps::new("Email")
            },
        ];
        Self {
            active_path: Some("/apps".to_string()),
            sections: vec![store, channels],
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config_is_valid() {
        let demo = GalleryConfig::demo();
        assert!(demo.validate().is_ok());
        assert_eq!(demo.sections.len(), 2);
    }

    #[test]
    fn parses_minimal_json() {
        let config = GalleryConfig::from_json_str(
            r#"{
                "sections": [{ "items": [{ "label": "Home", "url": "/" }], "rollup": { "after": 1, "view": "More", "hide": "Less" } }],
                "fields": [{ "label": "Qty", "kind": "number", "step": 2 }]
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.sections[0].items[0].url.as_deref(), Some("/"));
        assert_eq!(config.sections[0].rollup.as_ref().map(|r| r.active_path.as_str()), Some(""));
        assert_eq!(config.fields[0].step, Some(2.0));
    }

    #[test]
    fn rejects_duplicate_labels() {
        let error = GalleryConfig::from_json_str(
            r#"{ "sections": [{ "title": "Main", "items": [{ "label": "A" }, { "label": "A" }] }] }"#,
        )
        .expect_err("duplicate labels");
        assert!(matches!(error, GalleryConfigError::DuplicateLabel { ref label, .. } if label == "A"));
    }

    #[test]
    fn rejects_non_positive_steps() {
        let error = GalleryConfig::from_json_str(r#"{ "fields": [{ "label": "Qty", "step": 0 }] }"#).expect_err("zero step");
        assert!(matches!(error, GalleryConfigError::InvalidStep { .. }));
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = GalleryConfig::load(&dir.path().join("missing.json")).expect_err("missing file");
        assert!(error.to_string().contains("missing.json"));
    }
}
