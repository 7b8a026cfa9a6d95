//! Authoritative row collection.

use std::sync::{Arc, RwLock};

use super::{Record, RowId};

#[derive(Debug, Default)]
struct StoreInner {
    rows: Vec<(RowId, Record)>,
}

/// The authoritative rows of a grid.
///
/// Cheap to clone; clones share the same rows. Edit sessions never write
/// here directly: a commit builds a shadow copy of the row and swaps it in
/// with [`RowStore::replace`] only after persistence succeeded.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl RowStore {
    /// Creates a store from records.
    ///
    /// Records with an explicit id keep it; the rest are keyed by index.
    pub fn new(records: Vec<Record>) -> Self {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = match record.id() {
                    Some(id) => RowId::new(id),
                    None => RowId::from(index),
                };
                (id, record)
            })
            .collect();
        Self {
            inner: Arc::new(RwLock::new(StoreInner { rows })),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row ids in data order.
    pub fn ids(&self) -> Vec<RowId> {
        self.inner
            .read()
            .map(|g| g.rows.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if a row with this id exists.
    pub fn contains(&self, id: &RowId) -> bool {
        self.inner
            .read()
            .map(|g| g.rows.iter().any(|(row_id, _)| row_id == id))
            .unwrap_or(false)
    }

    /// Snapshot of a row.
    pub fn get(&self, id: &RowId) -> Option<Record> {
        self.inner.read().ok().and_then(|g| {
            g.rows
                .iter()
                .find(|(row_id, _)| row_id == id)
                .map(|(_, record)| record.clone())
        })
    }

    /// Snapshot of all rows in data order.
    pub fn records(&self) -> Vec<Record> {
        self.inner
            .read()
            .map(|g| g.rows.iter().map(|(_, record)| record.clone()).collect())
            .unwrap_or_default()
    }

    /// Replaces a row. Returns `false` if the row does not exist.
    pub fn replace(&self, id: &RowId, record: Record) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && let Some(slot) = guard.rows.iter_mut().find(|(row_id, _)| row_id == id)
        {
            slot.1 = record;
            return true;
        }
        false
    }

    /// Removes a row, returning it.
    pub fn remove(&self, id: &RowId) -> Option<Record> {
        let mut guard = self.inner.write().ok()?;
        let index = guard.rows.iter().position(|(row_id, _)| row_id == id)?;
        Some(guard.rows.remove(index).1)
    }
}
