//! Edit behavior descriptors.
//!
//! A behavior decides which pointer gesture opens a cell for editing and
//! which events save or cancel the pending value. Descriptors are plain
//! immutable values; the edit controller interprets them at runtime.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::behavior::{BehaviorBuilder, ButtonPosition, EditMode, Trigger};
//!
//! let behavior = BehaviorBuilder::new()
//!     .double_click_to_edit()
//!     .with_action_buttons(ButtonPosition::BottomRight)
//!     .no_text_selection()
//!     .build();
//!
//! assert_eq!(behavior.mode(), EditMode::DoubleClick);
//! assert!(behavior.saves_on(Trigger::Manual));
//! assert!(!behavior.saves_on(Trigger::Enter));
//! ```

mod builder;
mod descriptor;

pub use builder::BehaviorBuilder;
pub use descriptor::*;
