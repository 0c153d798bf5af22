use rusqlite::Connection;

use crate::error::Result;

/// Initialise the tickets table and its indexes.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tickets (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            ticket_number TEXT NOT NULL UNIQUE,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL,
            subject       TEXT NOT NULL,
            description   TEXT NOT NULL,
            category      TEXT NOT NULL,
            priority      TEXT NOT NULL,
            status        TEXT NOT NULL DEFAULT 'open',
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_tickets_created
            ON tickets(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_tickets_status
            ON tickets(status);",
    )?;
    Ok(())
}
