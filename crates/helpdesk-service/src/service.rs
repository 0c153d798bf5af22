use helpdesk_core::config::HelpdeskConfig;
use helpdesk_core::types::Sender;
use helpdesk_sessions::{ChatMessage, Session, TranscriptStore};
use helpdesk_tickets::{NewTicket, Ticket, TicketPatch, TicketStore};
use helpdesk_triage::{triage, KnowledgeBase};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, ServiceError};
use crate::types::{ChatOutcome, ChatQuery};

/// Default cap on ticket listings unless the caller passes one.
pub const DEFAULT_TICKET_LIST_LIMIT: usize = 100;

/// The assembled helpdesk: knowledge base plus stores, sharing one SQLite
/// file. This is the surface an HTTP gateway embeds and maps to JSON.
///
/// All operations are synchronous — matching is pure computation and the
/// stores serialize their own access, so the facade itself holds no locks
/// and can be shared behind an `Arc`.
pub struct Helpdesk {
    config: HelpdeskConfig,
    kb: KnowledgeBase,
    transcripts: TranscriptStore,
    tickets: TicketStore,
}

impl Helpdesk {
    /// Open (creating if needed) the database, run every subsystem's schema
    /// migration, and load the knowledge base per config.
    pub fn open(config: HelpdeskConfig) -> Result<Self> {
        let db_path = &config.database.path;
        ensure_parent_dir(db_path);
        info!(path = %db_path, "opening SQLite database");

        let db = Connection::open(db_path)?;
        db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

        // run all schema migrations (idempotent)
        helpdesk_sessions::db::init_db(&db)?;
        helpdesk_tickets::db::init_db(&db)?;
        drop(db);

        // each store gets its own connection for thread safety
        let transcripts = TranscriptStore::new(Connection::open(db_path)?);
        let tickets = TicketStore::new(Connection::open(db_path)?);

        let kb = KnowledgeBase::load(&config.knowledge)?;
        info!(topics = kb.topics.len(), "helpdesk ready");

        Ok(Self {
            config,
            kb,
            transcripts,
            tickets,
        })
    }

    /// The loaded topic list — read-only, shared across all requests.
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    // ── Chat ─────────────────────────────────────────────────────────────────

    /// Handle one chat turn: persist the user message, match it against the
    /// knowledge base, persist the canned reply, and return the exchange.
    ///
    /// An empty message is a valid turn (it draws the greeting); a blank
    /// session identifier is not — there would be nowhere to file the
    /// transcript.
    pub fn chat(&self, query: ChatQuery) -> Result<ChatOutcome> {
        if query.session_id.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "session_id is required".to_string(),
            ));
        }

        let user_message =
            self.transcripts
                .append(&query.session_id, Sender::User, &query.message)?;

        // Pure computation — no store lock is held while matching.
        let response = triage(&self.kb, &query.message);
        debug!(
            session_id = %query.session_id,
            create_ticket = response.create_ticket,
            "message triaged"
        );

        let agent_message =
            self.transcripts
                .append(&query.session_id, Sender::Agent, &response.message)?;

        Ok(ChatOutcome {
            user_message,
            agent_message,
            create_ticket: response.create_ticket,
            ticket_data: response.ticket_data,
        })
    }

    /// Transcript of a session, oldest first. `limit` falls back to the
    /// configured default.
    pub fn history(&self, session_id: &str, limit: Option<usize>) -> Result<Vec<ChatMessage>> {
        let limit = limit.unwrap_or(self.config.transcripts.history_limit);
        Ok(self.transcripts.history(session_id, limit)?)
    }

    /// Most-recently-active sessions, newest first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        Ok(self.transcripts.recent_sessions(limit)?)
    }

    // ── Tickets ──────────────────────────────────────────────────────────────

    /// Validate and file a ticket submission.
    pub fn open_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        Ok(self.tickets.create(ticket)?)
    }

    pub fn ticket(&self, id: i64) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(id)?)
    }

    pub fn ticket_by_number(&self, ticket_number: &str) -> Result<Option<Ticket>> {
        Ok(self.tickets.get_by_number(ticket_number)?)
    }

    /// Tickets newest first. `limit` falls back to [`DEFAULT_TICKET_LIST_LIMIT`].
    pub fn tickets(&self, limit: Option<usize>) -> Result<Vec<Ticket>> {
        Ok(self.tickets.list(limit.unwrap_or(DEFAULT_TICKET_LIST_LIMIT))?)
    }

    /// Apply a partial update to a ticket.
    pub fn update_ticket(&self, id: i64, patch: TicketPatch) -> Result<Ticket> {
        Ok(self.tickets.update(id, patch)?)
    }
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
