//! Grid-level errors

/// Error returned by grid lookups and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("row '{0}' not found")]
    UnknownRow(String),

    #[error("column '{0}' not found")]
    UnknownColumn(String),

    #[error("action '{0}' not found")]
    UnknownAction(String),

    #[error("invalid grid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
