//! Edit controller errors

use crate::model::CellId;

/// Error returned by edit controller operations.
///
/// Nothing here is fatal to the grid. `Validation` and `Persistence` leave
/// the session open with the user's input intact; the rest describe a
/// request that was rejected without changing any state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// The cell has no open edit session.
    #[error("cell is not being edited")]
    NotEditing,

    /// The column's `disabled` predicate rejected this row.
    #[error("cell is disabled")]
    Disabled,

    /// The column has no edit configuration, or it is switched off.
    #[error("cell is not editable")]
    NotEditable,

    /// Another cell is being edited; the single-editor rule rejects this one.
    #[error("cell {active} is already being edited")]
    Busy { active: CellId },

    /// A save for this session is still in flight.
    #[error("save already in progress")]
    SaveInProgress,

    /// The column validator rejected the pending value.
    #[error("{0}")]
    Validation(String),

    /// The persistence handler returned `false` or failed.
    #[error("{message}")]
    Persistence { message: String },

    /// The row id is not in the grid.
    #[error("row not found")]
    UnknownRow,
}

impl EditError {
    /// Returns `true` when the session stays open for another attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Persistence { .. })
    }

    /// The message shown inline next to the input, if this error has one.
    pub fn inline_message(&self) -> Option<&str> {
        match self {
            Self::Validation(msg) => Some(msg),
            Self::Persistence { message } => Some(message),
            _ => None,
        }
    }
}
