mod section_component;
mod state;

pub use section_component::SectionComponent;
pub use state::{ADDITIONAL_ITEMS_ID_CATEGORY, RollupState, SectionLayout, SectionRow, SectionState};
