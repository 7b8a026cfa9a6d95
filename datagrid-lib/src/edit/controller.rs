//! Per-cell edit controller.

use std::fmt;
use std::sync::Arc;

use log::{debug, error, warn};

use super::config::CellEditConfig;
use super::coordinator::EditCoordinator;
use super::handler::{EditFailure, ErrorCallback, SaveHandler};
use super::session::{EditSession, EditState};
use crate::behavior::{EditBehavior, EditMode, Gesture, Trigger, TriggerAction};
use crate::error::EditError;
use crate::input::{InputAction, InputEvent, InputProps, InputView};
use crate::model::{CellId, Record, RowStore, Value};

/// Message used when a save handler returns `false`.
pub const SAVE_REJECTED_MESSAGE: &str = "Failed to save changes";

/// Grid-wide pieces every cell controller shares.
#[derive(Clone, Default)]
pub struct EditContext {
    pub coordinator: EditCoordinator,
    pub rows: RowStore,
    /// Grid save handler, used when the column has none.
    pub on_cell_edit: Option<Arc<dyn SaveHandler>>,
    /// Called once per failed save.
    pub on_cell_edit_error: Option<ErrorCallback>,
    /// Opening gesture for columns without an explicit behavior.
    pub default_mode: EditMode,
}

impl fmt::Debug for EditContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditContext")
            .field("coordinator", &self.coordinator)
            .field("rows", &self.rows.len())
            .field("on_cell_edit", &self.on_cell_edit.is_some())
            .field("on_cell_edit_error", &self.on_cell_edit_error.is_some())
            .field("default_mode", &self.default_mode)
            .finish()
    }
}

/// Result of routing a trigger or input event through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Nothing matched; state unchanged.
    Ignored,
    /// The pending value changed.
    Changed,
    /// The value was committed and the session closed.
    Saved,
    /// The pending value was discarded and the session closed.
    Cancelled,
    /// The session closed without saving or cancelling.
    Exited,
}

/// What a cell renders.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Display surface with the committed value.
    Display {
        text: String,
        /// Hover hint, for editable cells only.
        hint: Option<&'static str>,
        disabled: bool,
    },
    /// Edit surface produced by the column's input strategy.
    Editing(InputView),
}

/// Edit lifecycle controller of one cell.
///
/// | From | Event | To |
/// |------|-------|----|
/// | Idle | gesture matching the mode, no other session, not disabled | Editing |
/// | Editing | value change | Editing |
/// | Editing | save trigger | Saving |
/// | Editing | cancel trigger | Idle |
/// | Editing | exit | Idle |
/// | Saving | validation fails | Editing |
/// | Saving | persisted | Idle |
/// | Saving | persistence fails | Editing |
///
/// The session itself lives in the shared [`EditCoordinator`]; a controller
/// is a cheap handle and can be cloned or recreated at will.
#[derive(Clone)]
pub struct CellEditor {
    cell: CellId,
    accessor: String,
    config: Arc<CellEditConfig>,
    behavior: EditBehavior,
    ctx: EditContext,
}

impl fmt::Debug for CellEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellEditor")
            .field("cell", &self.cell)
            .field("accessor", &self.accessor)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CellEditor {
    /// Create a controller for `cell`, reading and writing the row field
    /// named `accessor`.
    pub fn new(cell: CellId, accessor: impl Into<String>, config: Arc<CellEditConfig>, ctx: EditContext) -> Self {
        let behavior = config
            .explicit_behavior()
            .cloned()
            .unwrap_or_else(|| EditBehavior::click_to_edit().with_mode(ctx.default_mode));
        Self {
            cell,
            accessor: accessor.into(),
            config,
            behavior,
            ctx,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn cell(&self) -> &CellId {
        &self.cell
    }

    /// The behavior in effect, with the grid default mode applied.
    pub fn behavior(&self) -> &EditBehavior {
        &self.behavior
    }

    pub fn state(&self) -> EditState {
        self.ctx
            .coordinator
            .session(&self.cell)
            .map(|s| s.state())
            .unwrap_or_default()
    }

    /// Returns `true` while this cell owns the grid's session.
    pub fn is_editing(&self) -> bool {
        self.ctx.coordinator.is_active(&self.cell)
    }

    pub fn pending_value(&self) -> Option<Value> {
        self.ctx.coordinator.session(&self.cell).map(|s| s.pending)
    }

    /// Message of the last failed validation or save.
    pub fn error(&self) -> Option<String> {
        self.ctx.coordinator.session(&self.cell).and_then(|s| s.error)
    }

    /// The value in the authoritative row.
    pub fn committed_value(&self) -> Value {
        self.ctx
            .rows
            .get(&self.cell.row_id)
            .map(|row| row.value(&self.accessor))
            .unwrap_or_default()
    }

    fn row(&self) -> Result<Record, EditError> {
        self.ctx.rows.get(&self.cell.row_id).ok_or(EditError::UnknownRow)
    }

    fn props(&self, session: &EditSession, row: &Record) -> InputProps {
        InputProps {
            value: session.pending.clone(),
            behavior: self.behavior.clone(),
            is_saving: session.state == EditState::Saving,
            error: session.error.clone(),
            placeholder: self.config.placeholder_text().map(str::to_string),
            disabled: self.config.is_disabled_for(row),
            auto_focus: self.behavior.auto_focus(),
            select_all_on_focus: self.behavior.select_all_on_focus(),
        }
    }

    /// Render model for this cell.
    pub fn view(&self) -> CellView {
        let row = self.ctx.rows.get(&self.cell.row_id).unwrap_or_default();
        let editing = self.ctx.coordinator.with_session(&self.cell, |session| {
            let props = self.props(session, &row);
            session.input.as_ref().map(|input| input.view(&props))
        });
        if let Some(Some(view)) = editing {
            return CellView::Editing(view);
        }

        let disabled = self.config.is_disabled_for(&row);
        CellView::Display {
            text: row.value(&self.accessor).display(),
            hint: (self.config.is_enabled() && !disabled).then(|| self.behavior.mode().hint()),
            disabled,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Handle a pointer gesture on the display surface.
    ///
    /// Returns `Ok(true)` if editing started, `Ok(false)` if the gesture does
    /// not open this cell or it is already editing.
    pub fn activate(&self, gesture: Gesture) -> Result<bool, EditError> {
        if !self.behavior.matches_gesture(gesture) || self.is_editing() {
            return Ok(false);
        }
        self.begin().map(|()| true)
    }

    /// Open the cell for editing regardless of gesture.
    ///
    /// Rejected without side effects when another cell is editing.
    pub fn begin(&self) -> Result<(), EditError> {
        if !self.config.is_enabled() {
            return Err(EditError::NotEditable);
        }
        let row = self.row()?;
        if self.config.is_disabled_for(&row) {
            return Err(EditError::Disabled);
        }
        match self.ctx.coordinator.active_cell() {
            Some(active) if active == self.cell => return Ok(()),
            Some(active) => {
                debug!("Edit of {} rejected, {} is active", self.cell, active);
                return Err(EditError::Busy { active });
            }
            None => {}
        }

        let mut session = EditSession::new(self.cell.clone(), row.value(&self.accessor));
        let props = self.props(&session, &row);
        session.input = Some(self.config.input_strategy().create(&props));

        if !self.ctx.coordinator.begin_with(session) {
            let active = self.ctx.coordinator.active_cell().unwrap_or_else(|| self.cell.clone());
            return Err(EditError::Busy { active });
        }

        debug!(
            "Editing {} with {} input",
            self.cell,
            self.config.input_strategy().name()
        );
        if let Some(f) = &self.config.on_edit_start {
            f(&row, &self.cell.column_id);
        }
        Ok(())
    }

    /// Replace the pending value from outside the input widget.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<(), EditError> {
        self.apply_change(value.into(), true)
    }

    fn apply_change(&self, value: Value, sync_input: bool) -> Result<(), EditError> {
        self.ctx
            .coordinator
            .with_session(&self.cell, |session| {
                if session.state == EditState::Saving {
                    return Err(EditError::SaveInProgress);
                }
                session.pending = value;
                if sync_input && let Some(input) = session.input.as_mut() {
                    input.sync(&session.pending);
                }
                Ok(())
            })
            .unwrap_or(Err(EditError::NotEditing))
    }

    /// Route a trigger through the behavior: save set first, then cancel set.
    pub async fn trigger(&self, trigger: Trigger) -> Result<TriggerOutcome, EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        match self.behavior.resolve(trigger) {
            Some(TriggerAction::Save) => self.save().await.map(|()| TriggerOutcome::Saved),
            Some(TriggerAction::Cancel) => self.cancel().map(|_| TriggerOutcome::Cancelled),
            None => Ok(TriggerOutcome::Ignored),
        }
    }

    /// Validate and persist the pending value.
    ///
    /// On success the value is written into the authoritative row and the
    /// session closes. Validation and persistence failures leave the session
    /// in `Editing` with the error recorded; a persistence failure is also
    /// reported once to the grid's error callback.
    pub async fn save(&self) -> Result<(), EditError> {
        let pending = self
            .ctx
            .coordinator
            .with_session(&self.cell, |session| {
                if session.state == EditState::Saving {
                    return Err(EditError::SaveInProgress);
                }
                session.state = EditState::Saving;
                Ok(session.pending.clone())
            })
            .unwrap_or(Err(EditError::NotEditing))?;

        let row = match self.row() {
            Ok(row) => row,
            Err(e) => {
                self.finish_attempt(None);
                return Err(e);
            }
        };

        if let Some(message) = self.config.run_validate(&pending, &row) {
            debug!("Validation failed for {}: {}", self.cell, message);
            self.finish_attempt(Some(message.clone()));
            return Err(EditError::Validation(message));
        }
        self.ctx.coordinator.with_session(&self.cell, |session| session.error = None);

        // Two-phase commit: the handler sees a shadow row; the store is only
        // written once persistence has succeeded.
        let mut shadow = row;
        shadow.insert(self.accessor.clone(), pending.clone());

        let handler = self.config.on_save.clone().or_else(|| self.ctx.on_cell_edit.clone());
        let result = match handler {
            Some(handler) => handler.save(&pending, &shadow, &self.cell.column_id).await,
            None => Ok(true),
        };

        match result {
            Ok(true) => {
                let committed = self.commit(pending);
                self.ctx.coordinator.end_edit_for(&self.cell);
                let committed = committed.inspect_err(|_| {
                    warn!("Row of {} was removed before the save landed", self.cell);
                })?;
                debug!("Saved {}", self.cell);
                if let Some(f) = &self.config.on_edit_end {
                    f(&committed, &self.cell.column_id);
                }
                Ok(())
            }
            Ok(false) => Err(self.persistence_failed(SAVE_REJECTED_MESSAGE.to_string())),
            Err(e) => Err(self.persistence_failed(e.message)),
        }
    }

    /// Swap the pending value into the authoritative row.
    ///
    /// Fails with `UnknownRow` if the row was removed while the save was in
    /// flight.
    fn commit(&self, pending: Value) -> Result<Record, EditError> {
        // Re-read so fields written elsewhere while the save was in flight survive.
        let mut committed = self.row()?;
        committed.insert(self.accessor.clone(), pending);
        if !self.ctx.rows.replace(&self.cell.row_id, committed.clone()) {
            return Err(EditError::UnknownRow);
        }
        Ok(committed)
    }

    fn persistence_failed(&self, message: String) -> EditError {
        error!("Failed to save {}: {}", self.cell, message);
        self.finish_attempt(Some(message.clone()));
        if let Some(callback) = &self.ctx.on_cell_edit_error {
            callback(&EditFailure {
                message: message.clone(),
                row_id: self.cell.row_id.clone(),
                row: self.ctx.rows.get(&self.cell.row_id).unwrap_or_default(),
                column: self.cell.column_id.clone(),
            });
        }
        EditError::Persistence { message }
    }

    /// Back to `Editing` after a failed attempt.
    fn finish_attempt(&self, error: Option<String>) {
        self.ctx.coordinator.with_session(&self.cell, |session| {
            session.state = EditState::Editing;
            session.error = error;
        });
    }

    fn ensure_not_saving(&self) -> Result<(), EditError> {
        self.ctx
            .coordinator
            .with_session(&self.cell, |session| match session.state {
                EditState::Saving => Err(EditError::SaveInProgress),
                _ => Ok(()),
            })
            .unwrap_or(Err(EditError::NotEditing))
    }

    /// Discard the pending value and close the session.
    ///
    /// Returns the value captured when the session started.
    pub fn cancel(&self) -> Result<Value, EditError> {
        self.ensure_not_saving()?;
        let session = self
            .ctx
            .coordinator
            .end_edit_for(&self.cell)
            .ok_or(EditError::NotEditing)?;
        debug!("Cancelled edit of {}", self.cell);
        if let Some(f) = &self.config.on_cancel {
            let row = self.ctx.rows.get(&self.cell.row_id).unwrap_or_default();
            f(&row, &self.cell.column_id);
        }
        Ok(session.original)
    }

    /// Close the session without validating, persisting or cancelling.
    pub fn exit(&self) -> Result<(), EditError> {
        self.ensure_not_saving()?;
        self.ctx
            .coordinator
            .end_edit_for(&self.cell)
            .ok_or(EditError::NotEditing)?;
        debug!("Exited edit of {}", self.cell);
        Ok(())
    }

    /// Feed a UI event to the session's input and run what it asks for.
    pub async fn handle_input(&self, event: InputEvent) -> Result<TriggerOutcome, EditError> {
        let row = self.row()?;
        let actions = self
            .ctx
            .coordinator
            .with_session(&self.cell, |session| {
                let props = self.props(session, &row);
                match session.input.as_mut() {
                    Some(input) => input.handle(&event, &props),
                    None => Vec::new(),
                }
            })
            .ok_or(EditError::NotEditing)?;

        let mut outcome = TriggerOutcome::Ignored;
        for action in actions {
            outcome = match action {
                InputAction::Change(value) => {
                    self.apply_change(value, false)?;
                    TriggerOutcome::Changed
                }
                InputAction::Save => {
                    self.save().await?;
                    TriggerOutcome::Saved
                }
                InputAction::Cancel => {
                    self.cancel()?;
                    TriggerOutcome::Cancelled
                }
                InputAction::Exit => {
                    self.exit()?;
                    TriggerOutcome::Exited
                }
            };
        }
        Ok(outcome)
    }

    /// Feed several events in order, stopping at the first error.
    pub async fn handle_inputs(
        &self,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Result<TriggerOutcome, EditError> {
        let mut outcome = TriggerOutcome::Ignored;
        for event in events {
            outcome = self.handle_input(event).await?;
        }
        Ok(outcome)
    }
}
