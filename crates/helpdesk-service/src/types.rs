use helpdesk_sessions::ChatMessage;
use helpdesk_tickets::NewTicket;
use helpdesk_triage::TicketDraft;
use serde::{Deserialize, Serialize};

/// One inbound chat turn.
///
/// The session identifier only scopes transcript storage — matching itself
/// never looks at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuery {
    pub session_id: String,
    pub message: String,
}

/// Everything a chat turn produced: both persisted transcript messages plus
/// the escalation outcome, so the caller can render the exchange and offer
/// the ticket form in one round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub user_message: ChatMessage,
    pub agent_message: ChatMessage,
    pub create_ticket: bool,
    pub ticket_data: Option<TicketDraft>,
}

/// Turn an escalation draft into a submission once the user has supplied
/// contact details. Details already present on the draft win over the
/// arguments — the user may have typed them into the chat form earlier.
pub fn submission_from_draft(
    draft: TicketDraft,
    name: impl Into<String>,
    email: impl Into<String>,
) -> NewTicket {
    NewTicket {
        name: draft.name.unwrap_or_else(|| name.into()),
        email: draft.email.unwrap_or_else(|| email.into()),
        subject: draft.subject,
        description: draft.description,
        category: draft.category,
        priority: draft.priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::types::TicketPriority;

    fn draft() -> TicketDraft {
        TicketDraft {
            name: None,
            email: None,
            subject: "Login Access Issues".to_string(),
            category: "authentication".to_string(),
            description: "User reported: \"no access\"".to_string(),
            priority: TicketPriority::High,
        }
    }

    #[test]
    fn submission_takes_supplied_contact_details() {
        let ticket = submission_from_draft(draft(), "Ada", "ada@example.com");
        assert_eq!(ticket.name, "Ada");
        assert_eq!(ticket.email, "ada@example.com");
        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.subject, "Login Access Issues");
    }

    #[test]
    fn draft_contact_details_win() {
        let mut d = draft();
        d.email = Some("from-chat@example.com".to_string());
        let ticket = submission_from_draft(d, "Ada", "ada@example.com");
        assert_eq!(ticket.email, "from-chat@example.com");
        assert_eq!(ticket.name, "Ada");
    }
}
