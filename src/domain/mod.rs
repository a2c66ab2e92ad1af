//! Core domain types for Everwell

mod action;
mod habit;

pub use action::ActionKind;
pub use habit::HabitStatus;
