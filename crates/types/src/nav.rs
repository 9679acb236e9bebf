//! Navigation item model shared by the rollup engine and the section component.

use serde::{Deserialize, Serialize};

/// A child entry nested under a [`NavItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubNavItem {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SubNavItem {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            disabled: false,
        }
    }
}

/// A single navigation entry.
///
/// `label` doubles as the stable key of the item and must be unique within a
/// section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Human-facing text, also the item key.
    pub label: String,
    /// Navigation target. Items without a url can still be activated.
    #[serde(default)]
    pub url: Option<String>,
    /// Short glyph rendered ahead of the label (e.g. "⌂", "$").
    #[serde(default)]
    pub icon: Option<String>,
    /// Trailing badge text such as an unread count.
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// Marks recently added destinations; rendered with an indicator dot.
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub sub_items: Vec<SubNavItem>,
}

impl NavItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: None,
            icon: None,
            badge: None,
            disabled: false,
            new: false,
            sub_items: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn with_sub_items(mut self, sub_items: Vec<SubNavItem>) -> Self {
        self.sub_items = sub_items;
        self
    }
}

/// Overflow configuration for a navigation section.
///
/// Items past `after` collapse behind a toggle whose label switches between
/// `view` (collapsed) and `hide` (expanded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup {
    pub after: usize,
    pub view: String,
    pub hide: String,
    #[serde(default)]
    pub active_path: String,
}

impl Rollup {
    pub fn new(after: usize, active_path: impl Into<String>) -> Self {
        Self {
            after,
            view: "View all".to_string(),
            hide: "Hide".to_string(),
            active_path: active_path.into(),
        }
    }
}

/// How an active path is compared against item urls when looking for the
/// active item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMatchMode {
    /// Plain string prefix: `/cat` matches `/category`.
    #[default]
    Prefix,
    /// Prefix that must end on a path boundary (`/`, `?`, `#` or end of
    /// string): `/cat` matches `/cat/1` but not `/category`.
    SegmentBoundary,
}

/// Heading action rendered next to a section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAction {
    pub icon: String,
    pub accessibility_label: String,
}

/// Identifies a mounted section inside a host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SectionId(pub u32);
