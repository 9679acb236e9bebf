//! Helpers shared by the navkit crates: element id generation, decimal
//! parsing/formatting, and configuration persistence.

pub mod gallery_config;
pub mod ids;
pub mod numeric;
mod path_processing;
pub mod preferences;

pub use gallery_config::{GalleryConfig, GalleryConfigError, SectionConfig};
pub use ids::{IdFactory, ScopedIdFactory, SequentialIdFactory};
pub use path_processing::expand_tilde;
pub use preferences::{PreferencesError, UserPreferences};
