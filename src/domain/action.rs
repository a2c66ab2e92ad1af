//! Rewardable actions and their XP amounts
//!
//! The action set is closed: every trigger that earns XP is a variant here,
//! and the reward table is a total match. Calling with an unknown action is
//! therefore impossible by construction.

use serde::{Deserialize, Serialize};

/// An action that earns a fixed amount of XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A journal entry was written
    JournalEntry,
    /// A workout was completed
    WorkoutComplete,
    /// A meditation session was completed
    MeditationComplete,
    /// A single habit was checked off
    HabitComplete,
    /// Every habit scheduled for the day was completed (once per day)
    AllHabitsBonus,
}

impl ActionKind {
    /// All action kinds, in reward-table order
    pub const ALL: [ActionKind; 5] = [
        Self::JournalEntry,
        Self::WorkoutComplete,
        Self::MeditationComplete,
        Self::HabitComplete,
        Self::AllHabitsBonus,
    ];

    /// Fixed XP amount earned by this action
    pub fn xp_amount(self) -> u64 {
        match self {
            Self::JournalEntry => 5,
            Self::WorkoutComplete => 10,
            Self::MeditationComplete => 5,
            Self::HabitComplete => 10,
            Self::AllHabitsBonus => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::JournalEntry => "journal_entry",
            Self::WorkoutComplete => "workout_complete",
            Self::MeditationComplete => "meditation_complete",
            Self::HabitComplete => "habit_complete",
            Self::AllHabitsBonus => "all_habits_bonus",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "journal_entry" => Some(Self::JournalEntry),
            "workout_complete" => Some(Self::WorkoutComplete),
            "meditation_complete" => Some(Self::MeditationComplete),
            "habit_complete" => Some(Self::HabitComplete),
            "all_habits_bonus" => Some(Self::AllHabitsBonus),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::JournalEntry => "Journal entry",
            Self::WorkoutComplete => "Workout",
            Self::MeditationComplete => "Meditation",
            Self::HabitComplete => "Habit",
            Self::AllHabitsBonus => "Daily habit bonus",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amounts_are_positive() {
        for kind in ActionKind::ALL {
            assert!(kind.xp_amount() > 0, "{:?} must earn XP", kind);
        }
    }

    #[test]
    fn test_str_roundtrip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionKind::from_str("unknown"), None);
    }
}
