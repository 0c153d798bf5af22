use thiserror::Error;

/// Errors that can occur during transcript operations.
///
/// Reads of unknown sessions are not errors — they come back as `None` or
/// an empty history, so only the storage layer itself can fail here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
