//! SQLite-backed key-value store
//!
//! One `kv` table holds ledger snapshots and daily-bonus markers. WAL mode is
//! enabled so reads from the app shell never block the background persister.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::Connection;

use super::{KeyValueStore, StorageError};
use crate::config::Config;

/// SQL schema for the rewards database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Key-value store over a local SQLite database
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the rewards database at the default location
    /// (`~/.everwell/rewards.db`)
    pub fn open_default() -> Result<Self, StorageError> {
        let db_path = Config::data_dir().join("rewards.db");
        Self::open(&db_path)
    }

    /// Open or create the rewards database at a specific path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(SCHEMA_SQL)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("rewards DB lock poisoned")
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3"#,
            rusqlite::params![key, value, now],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_and_roundtrip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_rewards.db");
        let store = SqliteStore::open(&db_path).unwrap();

        assert_eq!(store.get("ledger:u1").await.unwrap(), None);

        store.set("ledger:u1", "{}").await.unwrap();
        assert_eq!(store.get("ledger:u1").await.unwrap().as_deref(), Some("{}"));

        // Overwrite keeps a single row
        store.set("ledger:u1", "{\"x\":1}").await.unwrap();
        let conn = store.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_reopen_preserves_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_rewards.db");
        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.set("daily_bonus:u1:2026-08-25", "1").await.unwrap();
        }
        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(
            store.get("daily_bonus:u1:2026-08-25").await.unwrap().as_deref(),
            Some("1")
        );
    }
}
