//! Ledger data model
//!
//! One ledger per identity: cumulative XP, the derived level, and an
//! append-only history of awards and revocations. The snapshot is what gets
//! serialized to storage and what display code reads.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::level;
use crate::domain::ActionKind;

/// Whether a history entry added or removed XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "action")]
pub enum EntryKind {
    Earned(ActionKind),
    Revoked(ActionKind),
}

/// One append-only history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    /// Signed XP change actually applied (revocations are clamped, so this
    /// can be smaller in magnitude than the action's nominal amount)
    pub delta: i64,
    pub timestamp_ms: i64,
}

/// Per-identity XP ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub identity: String,
    pub total_xp: u64,
    pub level: u32,
    #[serde(default)]
    pub history: Vec<LedgerEntry>,
}

impl Ledger {
    /// Fresh zero ledger for an identity
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            total_xp: 0,
            level: level::level_for(0),
            history: Vec::new(),
        }
    }

    /// Apply an award: add the action's XP and record it
    pub fn apply_award(&mut self, kind: ActionKind, history_limit: usize) {
        let amount = kind.xp_amount();
        self.total_xp += amount;
        self.level = level::level_for(self.total_xp);
        self.push_entry(
            LedgerEntry {
                kind: EntryKind::Earned(kind),
                delta: amount as i64,
                timestamp_ms: Utc::now().timestamp_millis(),
            },
            history_limit,
        );
    }

    /// Apply a revocation: remove up to the action's XP, clamped at zero.
    /// Returns the amount actually removed.
    pub fn apply_revoke(&mut self, kind: ActionKind, history_limit: usize) -> u64 {
        let applied = kind.xp_amount().min(self.total_xp);
        self.total_xp -= applied;
        self.level = level::level_for(self.total_xp);
        self.push_entry(
            LedgerEntry {
                kind: EntryKind::Revoked(kind),
                delta: -(applied as i64),
                timestamp_ms: Utc::now().timestamp_millis(),
            },
            history_limit,
        );
        applied
    }

    /// Zero all totals and clear the history
    pub fn reset(&mut self) {
        self.total_xp = 0;
        self.level = level::level_for(0);
        self.history.clear();
    }

    fn push_entry(&mut self, entry: LedgerEntry, history_limit: usize) {
        self.history.push(entry);
        // Bounded retention: totals stay authoritative, oldest entries go
        if self.history.len() > history_limit {
            let excess = self.history.len() - history_limit;
            self.history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 500;

    #[test]
    fn test_fresh_ledger() {
        let ledger = Ledger::new("u1");
        assert_eq!(ledger.total_xp, 0);
        assert_eq!(ledger.level, 1);
        assert!(ledger.history.is_empty());
    }

    #[test]
    fn test_award_revoke_roundtrip() {
        let mut ledger = Ledger::new("u1");
        ledger.apply_award(ActionKind::WorkoutComplete, LIMIT);
        ledger.apply_award(ActionKind::HabitComplete, LIMIT);
        let before = ledger.total_xp;

        ledger.apply_award(ActionKind::HabitComplete, LIMIT);
        let applied = ledger.apply_revoke(ActionKind::HabitComplete, LIMIT);

        assert_eq!(applied, ActionKind::HabitComplete.xp_amount());
        assert_eq!(ledger.total_xp, before);
    }

    #[test]
    fn test_revoke_clamps_at_zero() {
        let mut ledger = Ledger::new("u1");
        ledger.apply_award(ActionKind::JournalEntry, LIMIT); // +5
        let applied = ledger.apply_revoke(ActionKind::WorkoutComplete, LIMIT); // -10 requested

        assert_eq!(applied, 5);
        assert_eq!(ledger.total_xp, 0);
        // Recorded delta is the clamped amount, not the nominal one
        assert_eq!(ledger.history.last().unwrap().delta, -5);
    }

    #[test]
    fn test_level_tracks_xp() {
        let mut ledger = Ledger::new("u1");
        for _ in 0..10 {
            ledger.apply_award(ActionKind::HabitComplete, LIMIT); // 10 x 10 = 100
        }
        assert_eq!(ledger.total_xp, 100);
        assert_eq!(ledger.level, 2);
    }

    #[test]
    fn test_history_retention_is_bounded() {
        let mut ledger = Ledger::new("u1");
        for _ in 0..12 {
            ledger.apply_award(ActionKind::JournalEntry, 10);
        }
        assert_eq!(ledger.history.len(), 10);
        // Totals are unaffected by trimming
        assert_eq!(ledger.total_xp, 60);
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let mut ledger = Ledger::new("u1");
        ledger.apply_award(ActionKind::MeditationComplete, LIMIT);
        ledger.apply_revoke(ActionKind::MeditationComplete, LIMIT);

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
