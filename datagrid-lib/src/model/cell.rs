//! Row, column and cell identifiers.

use serde::{Deserialize, Serialize};

/// Stable identifier of a row.
///
/// Assigned from the record's own id when it has one, otherwise from the
/// row's position in the data it was loaded from. Assumed immutable for the
/// lifetime of the data in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<usize> for RowId {
    fn from(v: usize) -> Self {
        Self(v.to_string())
    }
}

/// Stable identifier of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for ColumnId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Intersection of one row and one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row_id: RowId,
    pub column_id: ColumnId,
}

impl CellId {
    /// Creates a cell id from anything convertible to row and column ids.
    pub fn new(row_id: impl Into<RowId>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
        }
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row_id, self.column_id)
    }
}
