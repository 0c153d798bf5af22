use thiserror::Error;

/// Errors that can occur during ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// A submitted field failed validation. The reason is user-facing.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The requested ticket does not exist.
    #[error("ticket not found: {id}")]
    NotFound { id: i64 },

    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl TicketError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TicketError>;
