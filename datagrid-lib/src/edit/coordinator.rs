//! Grid-level edit coordinator.

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use super::session::{EditSession, EditState};
use crate::model::{CellId, Value};

/// Single point of truth for which cell, if any, is being edited.
///
/// The coordinator owns the grid's only [`EditSession`], so at most one
/// session with a state other than `Idle` can exist. Cheap to clone; every
/// cell controller of a grid holds a clone of the same coordinator.
#[derive(Debug, Clone, Default)]
pub struct EditCoordinator {
    inner: Arc<RwLock<Option<EditSession>>>,
}

impl EditCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell currently being edited.
    pub fn active_cell(&self) -> Option<CellId> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.cell.clone()))
    }

    /// Returns `true` if `cell` owns the open session.
    pub fn is_active(&self, cell: &CellId) -> bool {
        self.inner
            .read()
            .map(|guard| guard.as_ref().is_some_and(|s| &s.cell == cell))
            .unwrap_or(false)
    }

    /// Open a session for `cell` seeded with its committed value.
    ///
    /// Returns `false` and changes nothing if a different cell is already
    /// being edited. Returns `true` without touching the session if `cell`
    /// itself is already active.
    pub fn begin_edit(&self, cell: CellId, seed: Value) -> bool {
        self.begin_with(EditSession::new(cell, seed))
    }

    pub(crate) fn begin_with(&self, session: EditSession) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        match guard.as_ref() {
            Some(active) if active.cell == session.cell => true,
            Some(active) => {
                warn!(
                    "Rejected edit of {}: {} is still being edited",
                    session.cell, active.cell
                );
                false
            }
            None => {
                debug!("Edit session opened for {}", session.cell);
                *guard = Some(session);
                true
            }
        }
    }

    /// Close the open session, returning it.
    ///
    /// A session with a save in flight is left alone and `None` is returned;
    /// the save decides how it ends.
    pub fn end_edit(&self) -> Option<EditSession> {
        let mut guard = self.inner.write().ok()?;
        if let Some(active) = guard.as_ref().filter(|s| s.state == EditState::Saving) {
            warn!("Not closing {}: save in progress", active.cell);
            return None;
        }
        let session = guard.take();
        if let Some(session) = &session {
            debug!("Edit session closed for {}", session.cell);
        }
        session
    }

    /// Close the session only if it belongs to `cell`.
    pub(crate) fn end_edit_for(&self, cell: &CellId) -> Option<EditSession> {
        let mut guard = self.inner.write().ok()?;
        if guard.as_ref().is_some_and(|s| &s.cell == cell) {
            debug!("Edit session closed for {}", cell);
            guard.take()
        } else {
            None
        }
    }

    /// Snapshot of the session if it belongs to `cell`.
    pub fn session(&self, cell: &CellId) -> Option<EditSession> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().filter(|s| &s.cell == cell).cloned())
    }

    /// Snapshot of the open session, whichever cell owns it.
    pub fn current(&self) -> Option<EditSession> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// Run `f` against the session of `cell`, if it is the active one.
    pub(crate) fn with_session<R>(&self, cell: &CellId, f: impl FnOnce(&mut EditSession) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        guard.as_mut().filter(|s| &s.cell == cell).map(f)
    }
}
