//! Inline-edit core for a composable data grid.
//!
//! The headless table engine (sorting, filtering, pagination) stays outside
//! this crate. What lives here is the plumbing around it: per-cell edit
//! sessions, the grid-wide edit coordinator, pluggable input strategies,
//! row selection, the floating action dock and context menus.

pub mod behavior;
pub mod dock;
pub mod edit;
pub mod error;
pub mod input;
pub mod menu;
pub mod model;
pub mod presets;
pub mod selection;
pub mod validation;

mod grid;

pub use grid::*;

pub mod prelude {
    pub use crate::behavior::{BehaviorBuilder, ButtonPosition, EditBehavior, EditMode, Gesture, Trigger};
    pub use crate::dock::{ActionDock, ActionVariant, DockView, GridAction};
    pub use crate::edit::{CellEditConfig, CellEditor, CellView, EditCoordinator, EditFailure, EditState, TriggerOutcome};
    pub use crate::error::{ConfigWarning, EditError, GridError, SaveError};
    pub use crate::grid::{DataGrid, GridColumn, GridConfig};
    pub use crate::input::{InputEvent, InputStrategy, Key};
    pub use crate::model::{CellId, ColumnId, Record, RowId, Value};
    pub use crate::selection::{Selection, SelectionMode};
    pub use crate::validation::Rules;
}
