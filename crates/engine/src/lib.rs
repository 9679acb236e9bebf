//! # Navkit Engine
//!
//! Pure view-state computations behind the navkit components. Nothing in this
//! crate renders, allocates ids or holds state between calls.
//!
//! - **`rollup`**: splits a section's items into always-visible and
//!   collapsible groups, keeping the active item visible.
//! - **`stepper`**: increments or decrements a textual number within optional
//!   bounds.
//!
//! ```rust
//! use navkit_engine::rollup::partition;
//! use navkit_types::{NavItem, PathMatchMode};
//!
//! let items = vec![
//!     NavItem::new("Home").with_url("/home"),
//!     NavItem::new("Orders").with_url("/orders"),
//!     NavItem::new("Reports").with_url("/reports"),
//! ];
//! let split = partition(items, Some(1), Some("/reports/sales"), PathMatchMode::Prefix);
//! assert_eq!(split.visible.len(), 2);
//! assert_eq!(split.visible[1].label, "Reports");
//! assert_eq!(split.collapsible[0].label, "Orders");
//! ```

pub mod rollup;
pub mod stepper;

pub use rollup::{Partition, RollupItem, find_active_index, partition, partition_refs};
pub use stepper::{StepRequest, step};
