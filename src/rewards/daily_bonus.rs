//! Daily all-habits bonus
//!
//! Grants `AllHabitsBonus` at most once per identity per calendar day. The
//! persisted marker is the durable evidence; the in-process in-flight set
//! covers the window between checking the marker and writing it, where two
//! near-simultaneous calls could otherwise both award the bonus.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::store::LedgerStore;
use crate::domain::{ActionKind, HabitStatus};
use crate::storage::KeyValueStore;

fn marker_key(identity: &str, date: NaiveDate) -> String {
    format!("daily_bonus:{identity}:{}", date.format("%Y-%m-%d"))
}

/// True iff there is at least one habit today and every one is completed
pub fn has_all_completed_today(statuses: &[HabitStatus]) -> bool {
    !statuses.is_empty() && statuses.iter().all(|s| s.completed)
}

/// Idempotency guard for the once-per-day bonus
pub struct DailyBonusGuard {
    storage: Arc<dyn KeyValueStore>,
    in_flight: Mutex<HashSet<String>>,
}

impl DailyBonusGuard {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Grant the daily bonus for `(identity, date)` if it has not been
    /// granted yet. Returns whether the bonus was awarded by this call.
    pub async fn try_grant_daily_bonus(
        &self,
        store: &LedgerStore,
        identity: &str,
        date: NaiveDate,
    ) -> bool {
        let key = marker_key(identity, date);

        // Reject a concurrent duplicate before touching storage
        if !self.lock_in_flight().insert(key.clone()) {
            debug!(identity, %date, "daily bonus already in flight");
            return false;
        }

        let already_granted = match self.storage.get(&key).await {
            Ok(marker) => marker.is_some(),
            Err(err) => {
                warn!(identity, %date, error = %err, "daily bonus marker read failed");
                false
            }
        };

        if already_granted {
            self.lock_in_flight().remove(&key);
            return false;
        }

        store.award(ActionKind::AllHabitsBonus);
        // A failed marker write means the bonus could repeat after a restart;
        // tolerated as a soft inconsistency
        if let Err(err) = self.storage.set(&key, "1").await {
            warn!(identity, %date, error = %err, "daily bonus marker write failed");
        }
        self.lock_in_flight().remove(&key);
        true
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().expect("in-flight lock poisoned")
    }
}
