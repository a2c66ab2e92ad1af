//! Durable key-value storage for ledger snapshots and daily-bonus markers
//!
//! The ledger core only needs `get`/`set` on namespaced string keys. The
//! production backend is SQLite (`~/.everwell/rewards.db`); tests use the
//! in-memory backend.

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

/// Error type for storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous key-value store
///
/// Keys are namespaced by the caller (`ledger:<identity>`,
/// `daily_bonus:<identity>:<date>`). Values are opaque strings.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests
///
/// `fail_writes` makes every `set` fail, for exercising the
/// persistence-failure path.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("memory store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("memory store lock")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::Unavailable("write failure injected".into()));
        }
        self.entries
            .lock()
            .expect("memory store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
