//! Inline cell editing.
//!
//! - [`EditCoordinator`] owns the single open [`EditSession`] of a grid.
//! - [`CellEditor`] is the per-cell controller driving the session through
//!   `Idle -> Editing -> Saving -> Idle` (or back to `Editing` on failure).
//! - [`CellEditConfig`] is the per-column configuration the controller reads.
//! - [`SaveHandler`] is the asynchronous persistence contract.

mod config;
mod controller;
mod coordinator;
mod handler;
mod session;

pub use config::{CellEditConfig, DisabledFn, RowCallback, ValidateFn};
pub use controller::{CellEditor, CellView, EditContext, SAVE_REJECTED_MESSAGE, TriggerOutcome};
pub use coordinator::EditCoordinator;
pub use handler::{EditFailure, ErrorCallback, SaveHandler};
pub use session::{EditSession, EditState};
