//! Everwell - wellness companion
//!
//! The app proper (habits, journaling, workouts) is a thin shell over a REST
//! backend. What lives here is the part with real state: the gamification
//! ledger, a per-identity XP account that awards and revokes points for user
//! actions, derives a level and a cosmetic percentile tier, and persists
//! snapshots to local storage.
//!
//! Feature code calls [`rewards::LedgerStore::award`] (or
//! [`rewards::RewardsManager::grant_daily_bonus`]) only after its own domain
//! action has already succeeded; display code reads
//! [`rewards::LedgerStore::snapshot`] and [`rewards::Tier::for_xp`].

pub mod config;
pub mod domain;
pub mod rewards;
pub mod storage;

pub use domain::*;
