use helpdesk_core::types::TicketPriority;
use serde::{Deserialize, Serialize};

/// Pre-filled fields used when a matched topic escalates to a support ticket.
///
/// The description is not part of the template — it is synthesized from the
/// user's message at match time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTemplate {
    pub subject: String,
    pub category: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

/// One entry of the knowledge base: a set of keyword phrases mapped to a
/// canned answer, optionally escalating to a ticket.
///
/// Whether a topic escalates is carried entirely by `escalation` — a record
/// either has a template or it does not, so the response's `create_ticket`
/// flag can never disagree with the presence of ticket data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub topic: String,
    pub keywords: Vec<String>,
    pub answer: String,
    pub escalation: Option<TicketTemplate>,
}

impl TopicRecord {
    pub fn escalates(&self) -> bool {
        self.escalation.is_some()
    }
}

/// A ticket ready to be filed on the user's behalf.
///
/// `name` and `email` stay empty until the user provides contact details;
/// they are omitted from JSON rather than serialized as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub subject: String,
    pub category: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Result of matching one message against the knowledge base.
///
/// Wire shape: `{ message, create_ticket, ticket_data | null }` —
/// `ticket_data` is serialized as an explicit null when no escalation
/// happened, so clients can rely on the key being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResponse {
    pub message: String,
    pub create_ticket: bool,
    pub ticket_data: Option<TicketDraft>,
}

impl TriageResponse {
    /// A plain answer with no escalation.
    pub fn answer(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            create_ticket: false,
            ticket_data: None,
        }
    }

    /// An answer that escalates with a pre-filled draft.
    pub fn escalate(message: impl Into<String>, draft: TicketDraft) -> Self {
        Self {
            message: message.into(),
            create_ticket: true,
            ticket_data: Some(draft),
        }
    }
}
