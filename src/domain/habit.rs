//! Habit completion status as reported by the habit feature

use serde::{Deserialize, Serialize};

/// Today's completion state for one scheduled habit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub completed: bool,
}

impl HabitStatus {
    pub fn new(habit_id: impl Into<String>, completed: bool) -> Self {
        Self {
            habit_id: habit_id.into(),
            completed,
        }
    }
}
