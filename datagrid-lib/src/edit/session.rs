//! Edit session state.

use crate::input::CellInput;
use crate::model::{CellId, Value};

/// Lifecycle state of a cell's edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No session; the cell shows its display surface.
    #[default]
    Idle,
    /// A session is open and accepts input.
    Editing,
    /// A save is in flight; further saves and changes are rejected.
    Saving,
}

/// The single in-progress edit of a grid.
///
/// Created when editing starts, destroyed on a successful save, cancel or
/// exit. Cloning yields a snapshot without the live input widget.
#[derive(Debug)]
pub struct EditSession {
    pub(crate) cell: CellId,
    pub(crate) original: Value,
    pub(crate) pending: Value,
    pub(crate) state: EditState,
    pub(crate) error: Option<String>,
    pub(crate) input: Option<Box<dyn CellInput>>,
}

impl EditSession {
    pub(crate) fn new(cell: CellId, seed: Value) -> Self {
        Self {
            cell,
            original: seed.clone(),
            pending: seed,
            state: EditState::Editing,
            error: None,
            input: None,
        }
    }

    /// The cell this session edits.
    pub fn cell(&self) -> &CellId {
        &self.cell
    }

    /// The committed value captured when the session started.
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The in-progress value.
    pub fn pending(&self) -> &Value {
        &self.pending
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Message of the last failed validation or save.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` if the pending value differs from the original.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.original
    }
}

impl Clone for EditSession {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            original: self.original.clone(),
            pending: self.pending.clone(),
            state: self.state,
            error: self.error.clone(),
            input: None,
        }
    }
}
