mod state;
mod text_field_component;

pub use state::{FieldViolation, TEXT_FIELD_ID_CATEGORY, TextFieldError, TextFieldState};
pub use text_field_component::TextFieldComponent;
