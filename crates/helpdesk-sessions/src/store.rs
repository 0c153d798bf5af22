use std::sync::Mutex;

use helpdesk_core::types::Sender;
use rusqlite::Connection;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::types::{ChatMessage, Session};

/// Thread-safe store for per-session chat transcripts.
///
/// Wraps a single SQLite connection in a `Mutex`. For high-concurrency
/// deployments consider a connection pool, but a Mutex is sufficient for
/// the single-node target.
pub struct TranscriptStore {
    db: Mutex<Connection>,
}

impl TranscriptStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Record one message, lazily creating the session row on first use.
    ///
    /// Bumps the session's `message_count` and `updated_at` so listings
    /// stay current without scanning the messages table.
    #[instrument(skip(self, body), fields(session_id, sender = %sender))]
    pub fn append(&self, session_id: &str, sender: Sender, body: &str) -> Result<ChatMessage> {
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.db.lock().unwrap();

        db.execute(
            "INSERT OR IGNORE INTO sessions (id, session_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            rusqlite::params![Uuid::now_v7().to_string(), session_id, now],
        )?;
        db.execute(
            "UPDATE sessions
             SET message_count = message_count + 1, updated_at = ?1
             WHERE session_id = ?2",
            rusqlite::params![now, session_id],
        )?;

        db.execute(
            "INSERT INTO messages (session_id, sender, body, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![session_id, sender.to_string(), body, now],
        )?;
        let id = db.last_insert_rowid();
        debug!(message_id = id, "message recorded");

        Ok(ChatMessage {
            id,
            session_id: session_id.to_string(),
            sender,
            body: body.to_string(),
            created_at: now,
        })
    }

    /// The most recent `limit` messages of a session, oldest first — the
    /// order a chat widget renders them in.
    #[instrument(skip(self), fields(session_id, limit))]
    pub fn history(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, session_id, sender, body, created_at
             FROM messages
             WHERE session_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(rusqlite::params![session_id, limit as i64], row_to_message)?;
        let mut messages: Vec<ChatMessage> = rows.filter_map(|r| r.ok()).collect();
        // Fetched newest-first to honour the limit; flip to display order.
        messages.reverse();
        Ok(messages)
    }

    /// Retrieve a session summary, returning `None` if nothing was ever
    /// recorded under that identifier.
    #[instrument(skip(self), fields(session_id))]
    pub fn session(&self, session_id: &str) -> Result<Option<Session>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            "SELECT id, session_id, message_count, created_at, updated_at
             FROM sessions WHERE session_id = ?1",
            rusqlite::params![session_id],
            row_to_session,
        ) {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SessionError::Database(e)),
        }
    }

    /// List the most-recently-active sessions, newest first.
    #[instrument(skip(self), fields(limit))]
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, session_id, message_count, created_at, updated_at
             FROM sessions
             ORDER BY updated_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(rusqlite::params![limit as i64], row_to_session)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

/// Map a SQLite row to a `ChatMessage`.
fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatMessage> {
    let sender: String = row.get(2)?;
    Ok(ChatMessage {
        id: row.get(0)?,
        session_id: row.get(1)?,
        // Unknown sender strings cannot appear: append() writes the enum's
        // own Display form.
        sender: sender.parse().unwrap_or(Sender::User),
        body: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Map a SQLite row to a `Session`.
fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        session_id: row.get(1)?,
        message_count: row.get::<_, i64>(2)? as u32,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TranscriptStore {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_db(&conn).unwrap();
        TranscriptStore::new(conn)
    }

    #[test]
    fn append_creates_session_and_counts() {
        let store = store();
        store.append("visit-1", Sender::User, "hello").unwrap();
        store.append("visit-1", Sender::Agent, "hi there").unwrap();

        let session = store.session("visit-1").unwrap().unwrap();
        assert_eq!(session.session_id, "visit-1");
        assert_eq!(session.message_count, 2);
    }

    #[test]
    fn history_is_oldest_first() {
        let store = store();
        store.append("s", Sender::User, "first").unwrap();
        store.append("s", Sender::Agent, "second").unwrap();
        store.append("s", Sender::User, "third").unwrap();

        let history = store.history("s", 50).unwrap();
        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["first", "second", "third"]);
    }

    #[test]
    fn history_limit_keeps_the_newest_messages() {
        let store = store();
        for i in 0..5 {
            store.append("s", Sender::User, &format!("m{i}")).unwrap();
        }
        let history = store.history("s", 2).unwrap();
        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["m3", "m4"]);
    }

    #[test]
    fn history_is_scoped_per_session() {
        let store = store();
        store.append("a", Sender::User, "for a").unwrap();
        store.append("b", Sender::User, "for b").unwrap();

        let history = store.history("a", 50).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].body, "for a");
    }

    #[test]
    fn unknown_session_is_none_and_empty() {
        let store = store();
        assert!(store.session("ghost").unwrap().is_none());
        assert!(store.history("ghost", 50).unwrap().is_empty());
    }

    #[test]
    fn recent_sessions_lists_latest_activity_first() {
        let store = store();
        store.append("older", Sender::User, "x").unwrap();
        store.append("newer", Sender::User, "y").unwrap();
        store.append("older", Sender::User, "z").unwrap();

        let sessions = store.recent_sessions(10).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_id, "older");
        assert_eq!(sessions[0].message_count, 2);
    }
}
