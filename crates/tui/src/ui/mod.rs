//! Terminal rendering for the gallery: components, theme, frame scheduling
//! and the runtime loop.

pub mod components;
pub mod frames;
pub mod main_view;
pub mod runtime;
pub mod theme;
