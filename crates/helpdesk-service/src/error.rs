use thiserror::Error;

/// Errors surfaced by the `Helpdesk` facade.
///
/// The embedding HTTP layer maps these onto status codes: `InvalidRequest`
/// and `Ticket(Validation)` are the caller's fault, everything else is a
/// server-side failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Session(#[from] helpdesk_sessions::error::SessionError),

    #[error(transparent)]
    Ticket(#[from] helpdesk_tickets::error::TicketError),

    #[error(transparent)]
    Core(#[from] helpdesk_core::error::HelpdeskError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
