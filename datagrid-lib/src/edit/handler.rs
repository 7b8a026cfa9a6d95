//! Persistence contract for committed edits.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SaveError;
use crate::model::{ColumnId, Record, RowId, Value};

/// Persists a committed cell value.
///
/// Called with the pending value, the row as it will look once the value is
/// applied (a shadow copy, not the authoritative record) and the column.
/// `Ok(true)` commits the edit; `Ok(false)` and `Err` keep the session open.
///
/// Closures of the shape `Fn(Value, Record, ColumnId) -> impl Future` get
/// this trait for free:
///
/// ```
/// use datagrid_lib::edit::SaveHandler;
/// use datagrid_lib::error::SaveError;
/// use datagrid_lib::model::{ColumnId, Record, Value};
///
/// fn assert_handler(_: impl SaveHandler) {}
///
/// assert_handler(|value: Value, _row: Record, column: ColumnId| async move {
///     if column.as_str() == "salary" && value.as_f64().is_some_and(|v| v < 0.0) {
///         return Err(SaveError::new("Salary cannot be negative"));
///     }
///     Ok(true)
/// });
/// ```
#[async_trait]
pub trait SaveHandler: Send + Sync {
    async fn save(&self, value: &Value, row: &Record, column: &ColumnId) -> Result<bool, SaveError>;
}

#[async_trait]
impl<F, Fut> SaveHandler for F
where
    F: Fn(Value, Record, ColumnId) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, SaveError>> + Send,
{
    async fn save(&self, value: &Value, row: &Record, column: &ColumnId) -> Result<bool, SaveError> {
        (self)(value.clone(), row.clone(), column.clone()).await
    }
}

/// Context handed to the grid's error callback when a save fails.
#[derive(Debug, Clone, PartialEq)]
pub struct EditFailure {
    pub message: String,
    pub row_id: RowId,
    /// The authoritative row, unchanged by the failed save.
    pub row: Record,
    pub column: ColumnId,
}

/// Grid-wide callback for failed saves.
pub type ErrorCallback = Arc<dyn Fn(&EditFailure) + Send + Sync>;
