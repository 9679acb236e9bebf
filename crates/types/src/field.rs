//! Text field model: input kinds, step direction and the props a host passes
//! to construct a field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a numeric step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Increment,
    Decrement,
}

impl StepDirection {
    /// Sign applied to the step size.
    pub fn sign(self) -> f64 {
        match self {
            Self::Increment => 1.0,
            Self::Decrement => -1.0,
        }
    }
}

/// Input kind of a text field. Only `Number` shows the stepper controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Number,
    Password,
    Search,
    Tel,
    Url,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Password => "password",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction parameters for a text field.
///
/// Everything except `label` is optional; `step` defaults to 1 when the field
/// is numeric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFieldProps {
    pub label: String,
    /// Explicit element id. A generated id is used when absent.
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: FieldKind,
    pub value: String,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    /// `None` leaves the attribute unset; `Some(false)` maps to "off".
    pub auto_complete: Option<bool>,
    pub spell_check: Option<bool>,
}

impl TextFieldProps {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::new(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}
