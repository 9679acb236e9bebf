//! Shared data model for the navkit component library.
//!
//! Components report what happened through [`Effect`]s and receive host
//! notifications through [`Msg`]s. Neither type carries rendering concerns.

pub mod field;
pub mod nav;

use serde::{Deserialize, Serialize};

pub use field::{FieldKind, StepDirection, TextFieldProps};
pub use nav::{NavItem, PathMatchMode, Rollup, SectionAction, SectionId, SubNavItem};

/// Side effects a component asks its host to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// A navigation item was activated. `url` is `None` for url-less items.
    Navigate { section: SectionId, label: String, url: Option<String> },
    /// The heading action of a section was pressed.
    SectionAction(SectionId),
    /// A field's value changed. The host may override it by setting the
    /// field's value again.
    FieldChanged { id: String, value: String },
    FieldFocused { id: String },
    FieldBlurred { id: String },
    /// Exit the application.
    Quit,
}

/// Notifications delivered from the host to components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    /// The host's navigation location changed.
    ActivePathChanged(String),
    Resize(u16, u16),
    Tick,
}
