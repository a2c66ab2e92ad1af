//! Gamification ledger: XP rewards, levels, percentile tiers, daily bonus
//!
//! Every completed action in the app (habit, journal entry, workout,
//! meditation) earns a fixed XP amount into a per-identity ledger. The
//! ledger lives in memory while a session is active and is written through
//! to local storage in the background.
//!
//! # Usage
//!
//! ```ignore
//! let rewards = RewardsManager::open_default()?;
//! rewards.ledger().initialize("user-1").await;
//!
//! // After a habit completion succeeded:
//! rewards.ledger().award(ActionKind::HabitComplete);
//!
//! // After the last habit of the day:
//! if has_all_completed_today(&statuses) {
//!     rewards.grant_daily_bonus("user-1", Local::now().date_naive()).await;
//! }
//! ```

mod daily_bonus;
mod ledger;
mod level;
mod percentile;
mod store;

pub use daily_bonus::{DailyBonusGuard, has_all_completed_today};
pub use ledger::{EntryKind, Ledger, LedgerEntry};
pub use level::{XP_PER_LEVEL, level_for, progress_to_next, xp_into_level};
pub use percentile::{TIERS, Tier};
pub use store::{DEFAULT_HISTORY_LIMIT, LedgerStore};

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::Settings;
use crate::storage::{KeyValueStore, SqliteStore};

/// Central handle wiring the ledger store and the daily-bonus guard over one
/// storage backend
///
/// An explicit instance, passed to whoever needs it; multiple managers (tests,
/// multi-account) can coexist because nothing here is process-global.
pub struct RewardsManager {
    store: LedgerStore,
    daily_bonus: DailyBonusGuard,
}

impl RewardsManager {
    /// Build a manager over any storage backend
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_settings(storage, &Settings::default())
    }

    pub fn with_settings(storage: Arc<dyn KeyValueStore>, settings: &Settings) -> Self {
        Self {
            store: LedgerStore::with_history_limit(Arc::clone(&storage), settings.history_limit),
            daily_bonus: DailyBonusGuard::new(storage),
        }
    }

    /// Open over the default SQLite database (`~/.everwell/rewards.db`)
    pub fn open_default() -> Result<Self> {
        let storage = SqliteStore::open_default()?;
        Ok(Self::new(Arc::new(storage)))
    }

    /// Open over a SQLite database at a specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        let storage = SqliteStore::open(path)?;
        Ok(Self::new(Arc::new(storage)))
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.store
    }

    pub fn daily_bonus(&self) -> &DailyBonusGuard {
        &self.daily_bonus
    }

    /// Grant the once-per-day bonus if it has not been granted yet
    pub async fn grant_daily_bonus(&self, identity: &str, date: NaiveDate) -> bool {
        self.daily_bonus
            .try_grant_daily_bonus(&self.store, identity, date)
            .await
    }
}
