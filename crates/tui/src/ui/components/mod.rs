//! UI components: navigation sections and text fields.

pub mod common;
pub mod component;
pub mod section;
pub mod text_field;

pub use component::*;
pub use section::{SectionComponent, SectionState};
pub use text_field::{TextFieldComponent, TextFieldState};
