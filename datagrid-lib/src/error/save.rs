//! Persistence handler failure

/// Failure raised by a save handler.
///
/// Returning `Ok(false)` from a handler is a soft rejection; returning this
/// error carries a message that is surfaced to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SaveError {
    pub message: String,
}

impl SaveError {
    /// Creates a save error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for SaveError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for SaveError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
