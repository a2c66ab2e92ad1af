//! Ledger store
//!
//! Owns the single resident ledger for the currently initialized identity.
//! Mutations are synchronous on the in-memory ledger; durable writes happen
//! on a background task with a queue depth of one (latest wins), so the
//! stored snapshot converges to the final in-memory state even when
//! intermediate writes are skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::Notify;
use tracing::{debug, warn};

use super::ledger::Ledger;
use crate::domain::ActionKind;
use crate::storage::KeyValueStore;

/// Default bound on retained history entries per ledger
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

fn ledger_key(identity: &str) -> String {
    format!("ledger:{identity}")
}

/// Store for the per-identity XP ledger
///
/// Constructed with an explicit storage handle; create one per account
/// context (there is deliberately no global instance). Must be created
/// inside a tokio runtime, which hosts the background persister.
pub struct LedgerStore {
    state: Arc<Mutex<Option<Ledger>>>,
    storage: Arc<dyn KeyValueStore>,
    persist: Arc<Notify>,
    shutdown: Arc<AtomicBool>,
    history_limit: usize,
}

impl LedgerStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_history_limit(storage, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(storage: Arc<dyn KeyValueStore>, history_limit: usize) -> Self {
        let state: Arc<Mutex<Option<Ledger>>> = Arc::new(Mutex::new(None));
        let persist = Arc::new(Notify::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        tokio::spawn(persister_task(
            Arc::downgrade(&state),
            Arc::clone(&storage),
            Arc::clone(&persist),
            Arc::clone(&shutdown),
        ));

        Self {
            state,
            storage,
            persist,
            shutdown,
            history_limit,
        }
    }

    /// Load (or create) the ledger for an identity
    ///
    /// Same-identity re-initialization is a no-op. Switching identities
    /// drops the prior in-memory ledger; its stored snapshot is untouched.
    /// A missing or unreadable snapshot yields a fresh zero ledger, which is
    /// persisted right away.
    pub async fn initialize(&self, identity: &str) {
        {
            let guard = self.lock_state();
            if guard.as_ref().is_some_and(|l| l.identity == identity) {
                return;
            }
        }

        let loaded = match self.storage.get(&ledger_key(identity)).await {
            Ok(Some(json)) => match serde_json::from_str::<Ledger>(&json) {
                Ok(ledger) => Some(ledger),
                Err(err) => {
                    warn!(identity, error = %err, "stored ledger snapshot unreadable, starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(identity, error = %err, "failed to load ledger snapshot, starting fresh");
                None
            }
        };

        let fresh = loaded.is_none();
        let ledger = loaded.unwrap_or_else(|| Ledger::new(identity));
        debug!(
            identity,
            total_xp = ledger.total_xp,
            fresh,
            "ledger initialized"
        );
        *self.lock_state() = Some(ledger);

        if fresh {
            self.flush().await;
        }
    }

    /// Award the XP for an action
    pub fn award(&self, kind: ActionKind) {
        let mut guard = self.lock_state();
        let Some(ledger) = guard.as_mut() else {
            warn!(action = kind.as_str(), "award ignored: ledger not initialized");
            return;
        };
        ledger.apply_award(kind, self.history_limit);
        debug!(
            action = kind.as_str(),
            total_xp = ledger.total_xp,
            level = ledger.level,
            "xp awarded"
        );
        drop(guard);
        self.persist.notify_one();
    }

    /// Revoke the XP for an action, clamped so the total never goes negative.
    /// Returns the amount actually removed.
    pub fn revoke(&self, kind: ActionKind) -> u64 {
        let mut guard = self.lock_state();
        let Some(ledger) = guard.as_mut() else {
            warn!(action = kind.as_str(), "revoke ignored: ledger not initialized");
            return 0;
        };
        let applied = ledger.apply_revoke(kind, self.history_limit);
        debug!(
            action = kind.as_str(),
            applied,
            total_xp = ledger.total_xp,
            "xp revoked"
        );
        drop(guard);
        self.persist.notify_one();
        applied
    }

    /// Zero the ledger totals and clear its history
    pub fn reset(&self) {
        let mut guard = self.lock_state();
        let Some(ledger) = guard.as_mut() else {
            warn!("reset ignored: ledger not initialized");
            return;
        };
        ledger.reset();
        drop(guard);
        self.persist.notify_one();
    }

    /// Overwrite the in-memory ledger with a caller-supplied snapshot
    /// (reconciliation with an external source of truth). Idempotent.
    pub fn restore(&self, snapshot: Ledger) {
        let mut guard = self.lock_state();
        if guard.is_none() {
            warn!("restore ignored: ledger not initialized");
            return;
        }
        *guard = Some(snapshot);
        drop(guard);
        self.persist.notify_one();
    }

    /// Read-only copy of the current ledger (None while uninitialized)
    pub fn snapshot(&self) -> Option<Ledger> {
        self.lock_state().clone()
    }

    /// Sign-out: drop the in-memory ledger. Stored snapshots are kept.
    pub fn clear(&self) {
        *self.lock_state() = None;
    }

    /// Write the current snapshot now and wait for the ack
    ///
    /// Normal mutations only schedule a write; this is for process exit and
    /// tests. Failures are logged, never propagated, because the in-memory
    /// ledger stays authoritative for the running session.
    pub async fn flush(&self) {
        let payload = {
            let guard = self.lock_state();
            guard
                .as_ref()
                .map(|l| (ledger_key(&l.identity), serde_json::to_string(l)))
        };
        let Some((key, json)) = payload else { return };
        match json {
            Ok(json) => {
                if let Err(err) = self.storage.set(&key, &json).await {
                    warn!(key, error = %err, "ledger snapshot write failed");
                }
            }
            Err(err) => warn!(key, error = %err, "ledger snapshot serialization failed"),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, Option<Ledger>> {
        self.state.lock().expect("ledger lock poisoned")
    }
}

impl Drop for LedgerStore {
    fn drop(&mut self) {
        // Wake the persister so it can write once more and exit
        self.shutdown.store(true, Ordering::SeqCst);
        self.persist.notify_one();
    }
}

/// Background persister: one pending write at most, snapshot read at write
/// time. Exits when the owning store is dropped, after a best-effort final
/// write of whatever is still pending.
async fn persister_task(
    state: Weak<Mutex<Option<Ledger>>>,
    storage: Arc<dyn KeyValueStore>,
    persist: Arc<Notify>,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        persist.notified().await;
        let stopping = shutdown.load(Ordering::SeqCst);

        let payload = state.upgrade().and_then(|state| {
            let guard = state.lock().expect("ledger lock poisoned");
            guard
                .as_ref()
                .map(|l| (ledger_key(&l.identity), serde_json::to_string(l)))
        });
        if let Some((key, json)) = payload {
            match json {
                Ok(json) => {
                    if let Err(err) = storage.set(&key, &json).await {
                        warn!(key, error = %err, "ledger snapshot write failed");
                    }
                }
                Err(err) => warn!(key, error = %err, "ledger snapshot serialization failed"),
            }
        }

        if stopping {
            break;
        }
    }
}
