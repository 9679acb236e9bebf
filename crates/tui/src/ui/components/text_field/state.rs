use navkit_engine::stepper::{self, DEFAULT_STEP};
use navkit_types::{Effect, FieldKind, StepDirection, TextFieldProps};
use navkit_util::IdFactory;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::ui::components::common::TextInputState;

/// Id category used when a field has no explicit id.
pub const TEXT_FIELD_ID_CATEGORY: &str = "TextField";

#[derive(Debug, Error)]
pub enum TextFieldError {
    #[error("field '{label}' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A constraint the current value breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldViolation {
    TooShort { min_length: usize },
    TooLong { max_length: usize },
    PatternMismatch,
    NotANumber,
    BelowMin(f64),
    AboveMax(f64),
}

impl FieldViolation {
    pub fn message(&self) -> String {
        match self {
            Self::TooShort { min_length } => format!("Use at least {min_length} characters"),
            Self::TooLong { max_length } => format!("Use at most {max_length} characters"),
            Self::PatternMismatch => "Value does not match the expected format".to_string(),
            Self::NotANumber => "Enter a number".to_string(),
            Self::BelowMin(min) => format!("Must be {min} or more"),
            Self::AboveMax(max) => format!("Must be {max} or less"),
        }
    }
}

/// State for a single text field.
///
/// Holds the props, the edit buffer and the element ids that link the input
/// to its label, prefix, suffix and help text. Edits are applied to the
/// buffer and reported as [`Effect::FieldChanged`]; a host can overwrite the
/// value at any time with [`TextFieldState::set_value`].
#[derive(Debug)]
pub struct TextFieldState {
    props: TextFieldProps,
    id: String,
    input: TextInputState,
    pattern: Option<Regex>,
    was_focused: bool,
    pub focus: FocusFlag,
    pub last_area: Rect,
    /// Increment and decrement button areas, when rendered.
    pub stepper_areas: Option<(Rect, Rect)>,
}

impl TextFieldState {
    pub fn new(props: TextFieldProps, ids: &dyn IdFactory) -> Result<Self, TextFieldError> {
        let pattern = props
            .pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| TextFieldError::InvalidPattern {
                    label: props.label.clone(),
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;
        let id = props.id.clone().unwrap_or_else(|| ids.next_id(TEXT_FIELD_ID_CATEGORY));
        let focus = FocusFlag::named(&format!("field.{id}"));
        Ok(Self {
            input: TextInputState::new(props.value.clone()),
            props,
            id,
            pattern,
            was_focused: false,
            focus,
            last_area: Rect::default(),
            stepper_areas: None,
        })
    }

    pub fn props(&self) -> &TextFieldProps {
        &self.props
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label_id(&self) -> String {
        format!("{}Label", self.id)
    }

    pub fn prefix_id(&self) -> Option<String> {
        self.props.prefix.as_ref().map(|_| format!("{}Prefix", self.id))
    }

    pub fn suffix_id(&self) -> Option<String> {
        self.props.suffix.as_ref().map(|_| format!("{}Suffix", self.id))
    }

    pub fn help_text_id(&self) -> Option<String> {
        self.props.help_text.as_ref().map(|_| format!("{}HelpText", self.id))
    }

    /// Ids naming the input: label first, then prefix and suffix when present.
    pub fn aria_labelledby(&self) -> Vec<String> {
        let mut ids = vec![self.label_id()];
        ids.extend(self.prefix_id());
        ids.extend(self.suffix_id());
        ids
    }

    pub fn aria_describedby(&self) -> Option<String> {
        self.help_text_id()
    }

    /// `None` when unset, otherwise `"on"`/`"off"`.
    pub fn auto_complete_attr(&self) -> Option<&'static str> {
        self.props.auto_complete.map(|enabled| if enabled { "on" } else { "off" })
    }

    pub fn value(&self) -> &str {
        self.input.input()
    }

    pub fn input(&self) -> &TextInputState {
        &self.input
    }

    /// Feeds a value back from the host.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input.set_input(value);
    }

    pub fn is_numeric(&self) -> bool {
        self.props.kind == FieldKind::Number
    }

    pub fn is_editable(&self) -> bool {
        !self.props.disabled && !self.props.read_only
    }

    pub fn is_focused(&self) -> bool {
        self.focus.get()
    }

    /// Declared step, or [`DEFAULT_STEP`] when it is absent or not positive.
    pub fn step_size(&self) -> f64 {
        self.props.step.filter(|step| *step > 0.0).unwrap_or(DEFAULT_STEP)
    }

    /// Steps a numeric field. Non-numeric or non-editable fields ignore it.
    pub fn step(&mut self, direction: StepDirection) -> Vec<Effect> {
        if !self.is_numeric() || !self.is_editable() {
            return Vec::new();
        }
        let next = stepper::step(self.value(), self.step_size(), self.props.min, self.props.max, direction);
        debug!(field = %self.id, from = self.value(), to = %next, ?direction, "field stepped");
        self.input.set_input(next);
        self.input.move_end();
        vec![self.changed()]
    }

    pub fn increment(&mut self) -> Vec<Effect> {
        self.step(StepDirection::Increment)
    }

    pub fn decrement(&mut self) -> Vec<Effect> {
        self.step(StepDirection::Decrement)
    }

    /// Inserts a typed character, honoring `max_length` and numeric input.
    pub fn insert_char(&mut self, c: char) -> Vec<Effect> {
        if !self.is_editable() || c.is_control() {
            return Vec::new();
        }
        if self.is_numeric() && !matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E') {
            return Vec::new();
        }
        if let Some(max_length) = self.props.max_length
            && self.value().chars().count() >= max_length
        {
            return Vec::new();
        }
        self.input.insert_char(c);
        vec![self.changed()]
    }

    pub fn backspace(&mut self) -> Vec<Effect> {
        if self.is_editable() && self.input.backspace() {
            vec![self.changed()]
        } else {
            Vec::new()
        }
    }

    pub fn delete(&mut self) -> Vec<Effect> {
        if self.is_editable() && self.input.delete() {
            vec![self.changed()]
        } else {
            Vec::new()
        }
    }

    pub fn move_left(&mut self) {
        self.input.move_left();
    }

    pub fn move_right(&mut self) {
        self.input.move_right();
    }

    pub fn move_home(&mut self) {
        self.input.move_home();
    }

    pub fn move_end(&mut self) {
        self.input.move_end();
    }

    /// Reports focus transitions since the last call.
    pub fn sync_focus(&mut self) -> Vec<Effect> {
        let focused = self.is_focused();
        if focused == self.was_focused {
            return Vec::new();
        }
        self.was_focused = focused;
        let id = self.id.clone();
        vec![if focused {
            Effect::FieldFocused { id }
        } else {
            Effect::FieldBlurred { id }
        }]
    }

    /// Checks length, pattern and numeric range. Empty values only fail
    /// `min_length`.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let value = self.value();
        let length = value.chars().count();
        let mut violations = Vec::new();
        if let Some(min_length) = self.props.min_length
            && length < min_length
        {
            violations.push(FieldViolation::TooShort { min_length });
        }
        if let Some(max_length) = self.props.max_length
            && length > max_length
        {
            violations.push(FieldViolation::TooLong { max_length });
        }
        if value.is_empty() {
            return violations;
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            violations.push(FieldViolation::PatternMismatch);
        }
        if self.is_numeric() {
            if let Some(number) = value.trim().parse::<f64>().ok().filter(|number| number.is_finite()) {
                if let Some(min) = self.props.min.filter(|min| number < *min) {
                    violations.push(FieldViolation::BelowMin(min));
                }
                if let Some(max) = self.props.max.filter(|max| number > *max) {
                    violations.push(FieldViolation::AboveMax(max));
                }
            } else {
                violations.push(FieldViolation::NotANumber);
            }
        }
        violations
    }

    fn changed(&self) -> Effect {
        Effect::FieldChanged {
            id: self.id.clone(),
            value: self.value().to_string(),
        }
    }
}

impl HasFocus for TextFieldState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
