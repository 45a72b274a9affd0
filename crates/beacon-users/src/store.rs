use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::error::Result;

/// A registered member row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub handle: String,
    pub first_seen_at: String,
}

/// Append-only member registry.
///
/// Holds its own `Connection` behind a mutex so command handlers can query
/// it from any task.
pub struct IdentityStore {
    conn: Arc<Mutex<Connection>>,
}

impl IdentityStore {
    pub fn new(conn: Connection) -> Result<Self> {
        crate::db::init_db(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Has this identity been registered before?
    pub fn exists(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let found: Option<i64> = conn
            .query_row("SELECT id FROM members WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Register an identity on first contact. Returns `true` when a row was
    /// written (first time seen), `false` for an already-known identity;
    /// the existing row is never touched.
    pub fn register_if_new(
        &self,
        id: i64,
        handle: &str,
        first_seen_at: DateTime<Utc>,
    ) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO members (id, handle, first_seen_at) VALUES (?1, ?2, ?3)",
            params![id, handle, first_seen_at.to_rfc3339()],
        )?;
        if inserted > 0 {
            info!(member_id = id, handle, "new member registered");
        }
        Ok(inserted > 0)
    }

    /// Load a member row, mostly for diagnostics and tests.
    pub fn get(&self, id: i64) -> Result<Option<Member>> {
        let conn = self.conn.lock().unwrap();
        let member = conn
            .query_row(
                "SELECT id, handle, first_seen_at FROM members WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Member {
                        id: row.get(0)?,
                        handle: row.get(1)?,
                        first_seen_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> IdentityStore {
        IdentityStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn unknown_identity_does_not_exist() {
        let s = store();
        assert!(!s.exists(42).unwrap());
    }

    #[test]
    fn register_then_exists() {
        let s = store();
        let is_new = s.register_if_new(42, "ada", Utc::now()).unwrap();
        assert!(is_new);
        assert!(s.exists(42).unwrap());
    }

    #[test]
    fn double_register_is_not_new_and_keeps_the_original_row() {
        let s = store();
        let first_seen = Utc::now();
        assert!(s.register_if_new(42, "ada", first_seen).unwrap());
        assert!(!s.register_if_new(42, "ada-renamed", Utc::now()).unwrap());

        let member = s.get(42).unwrap().unwrap();
        assert_eq!(member.handle, "ada");
        assert_eq!(member.first_seen_at, first_seen.to_rfc3339());
    }

    #[test]
    fn init_db_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_db(&conn).unwrap();
        crate::db::init_db(&conn).unwrap();
    }
}
