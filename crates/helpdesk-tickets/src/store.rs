use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{Result, TicketError};
use crate::types::{NewTicket, Ticket, TicketPatch};
use crate::validate::{validate_new, validate_patch};

/// Thread-safe store for support tickets.
///
/// Wraps a single SQLite connection in a `Mutex`, same as the transcript
/// store — ticket volume is human-scale, not machine-scale.
pub struct TicketStore {
    db: Mutex<Connection>,
}

impl TicketStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Validate and persist a submission. The store assigns the ticket
    /// number, the `open` status and both timestamps.
    #[instrument(skip(self, ticket), fields(category = %ticket.category, priority = %ticket.priority))]
    pub fn create(&self, ticket: NewTicket) -> Result<Ticket> {
        validate_new(&ticket)?;

        let ticket_number = mint_ticket_number();
        let now = chrono::Utc::now().to_rfc3339();

        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO tickets
             (ticket_number, name, email, subject, description, category,
              priority, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'open', ?8, ?8)",
            rusqlite::params![
                ticket_number,
                ticket.name,
                ticket.email,
                ticket.subject,
                ticket.description,
                ticket.category,
                ticket.priority.to_string(),
                now
            ],
        )?;
        let id = db.last_insert_rowid();
        info!(id, ticket_number = %ticket_number, "ticket created");

        db.query_row(
            "SELECT id, ticket_number, name, email, subject, description,
                    category, priority, status, created_at, updated_at
             FROM tickets WHERE id = ?1",
            rusqlite::params![id],
            row_to_ticket,
        )
        .map_err(TicketError::Database)
    }

    /// Retrieve a ticket by row id, returning `None` if it does not exist.
    #[instrument(skip(self), fields(id))]
    pub fn get(&self, id: i64) -> Result<Option<Ticket>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            "SELECT id, ticket_number, name, email, subject, description,
                    category, priority, status, created_at, updated_at
             FROM tickets WHERE id = ?1",
            rusqlite::params![id],
            row_to_ticket,
        ) {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TicketError::Database(e)),
        }
    }

    /// Retrieve a ticket by its human-facing reference ("HD-…").
    #[instrument(skip(self), fields(ticket_number))]
    pub fn get_by_number(&self, ticket_number: &str) -> Result<Option<Ticket>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            "SELECT id, ticket_number, name, email, subject, description,
                    category, priority, status, created_at, updated_at
             FROM tickets WHERE ticket_number = ?1",
            rusqlite::params![ticket_number],
            row_to_ticket,
        ) {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TicketError::Database(e)),
        }
    }

    /// List tickets, newest first.
    #[instrument(skip(self), fields(limit))]
    pub fn list(&self, limit: usize) -> Result<Vec<Ticket>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, ticket_number, name, email, subject, description,
                    category, priority, status, created_at, updated_at
             FROM tickets
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(rusqlite::params![limit as i64], row_to_ticket)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Apply a partial update. Absent fields keep their stored value;
    /// `updated_at` is bumped. Patched fields are re-validated first.
    #[instrument(skip(self, patch), fields(id))]
    pub fn update(&self, id: i64, patch: TicketPatch) -> Result<Ticket> {
        validate_patch(&patch)?;

        if patch.is_empty() {
            debug!(id, "empty patch, returning ticket unchanged");
            return self.get(id)?.ok_or(TicketError::NotFound { id });
        }

        let now = chrono::Utc::now().to_rfc3339();
        {
            let db = self.db.lock().unwrap();
            let rows_changed = db.execute(
                "UPDATE tickets SET
                     name        = COALESCE(?1, name),
                     email       = COALESCE(?2, email),
                     subject     = COALESCE(?3, subject),
                     description = COALESCE(?4, description),
                     category    = COALESCE(?5, category),
                     priority    = COALESCE(?6, priority),
                     status      = COALESCE(?7, status),
                     updated_at  = ?8
                 WHERE id = ?9",
                rusqlite::params![
                    patch.name,
                    patch.email,
                    patch.subject,
                    patch.description,
                    patch.category,
                    patch.priority.map(|p| p.to_string()),
                    patch.status.map(|s| s.to_string()),
                    now,
                    id
                ],
            )?;
            if rows_changed == 0 {
                return Err(TicketError::NotFound { id });
            }
        }

        self.get(id)?.ok_or(TicketError::NotFound { id })
    }
}

/// Mint a human-facing reference like "HD-9F3A21C4".
///
/// Eight hex chars of a fresh UUIDv4 — short enough to read over the phone,
/// random enough that the UNIQUE constraint will not trip in practice.
fn mint_ticket_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("HD-{}", id[..8].to_uppercase())
}

/// Map a SQLite row to a `Ticket`.
fn row_to_ticket(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    let priority: String = row.get(7)?;
    let status: String = row.get(8)?;
    Ok(Ticket {
        id: row.get(0)?,
        ticket_number: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        subject: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        // Stored values are written from the enums' own Display forms.
        priority: priority.parse().unwrap_or_default(),
        status: status.parse().unwrap_or_default(),
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
