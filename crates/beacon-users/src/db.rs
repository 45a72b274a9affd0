use rusqlite::{Connection, Result};

/// Initialise the members table. Safe to call on every startup;
/// CREATE IF NOT EXISTS makes it idempotent.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS members (
            id            INTEGER PRIMARY KEY NOT NULL,
            handle        TEXT NOT NULL DEFAULT '',
            first_seen_at TEXT NOT NULL
        );",
    )
}
