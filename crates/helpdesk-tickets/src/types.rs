use helpdesk_core::types::{TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};

/// A persisted support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    /// Human-facing reference, e.g. "HD-9F3A21C4". Unique per database.
    pub ticket_number: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// RFC3339 UTC timestamps.
    pub created_at: String,
    pub updated_at: String,
}

/// Fields a caller submits to open a ticket. Everything else (number,
/// status, timestamps) is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

/// Partial update — only the present fields change.
///
/// The ticket number and timestamps are never caller-writable;
/// `updated_at` is bumped by the store on every successful patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Shorthand for the common "close the loop" transitions.
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
