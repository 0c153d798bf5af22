use helpdesk_core::types::Sender;
use serde::{Deserialize, Serialize};

/// One persisted transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// SQLite rowid — monotonically increasing within a database.
    pub id: i64,
    pub session_id: String,
    pub sender: Sender,
    pub body: String,
    /// RFC3339 UTC timestamp.
    pub created_at: String,
}

/// Aggregate view of a conversation.
///
/// Lazy-created on the first recorded message. `message_count` is kept
/// denormalised so listings never have to scan the messages table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// UUIDv7 primary key — time-sortable.
    pub id: String,
    /// The client-chosen session identifier.
    pub session_id: String,
    pub message_count: u32,
    pub created_at: String,
    pub updated_at: String,
}
