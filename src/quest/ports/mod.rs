//! Port contracts for the quest lifecycle.
//!
//! Ports define the document-store boundary used by quest services.

pub mod repository;
pub mod transition;

pub use repository::{
    ActivityRepository, FocusSessionRepository, GoalRepository, HabitRepository,
    ProfileRepository, QuestRepositoryError, QuestRepositoryResult,
};
pub use transition::{TransitionRecord, TransitionSink};

/// Convenience bound for a store implementing every quest port.
pub trait QuestStore:
    ActivityRepository
    + GoalRepository
    + HabitRepository
    + ProfileRepository
    + FocusSessionRepository
    + TransitionSink
{
}

impl<T> QuestStore for T where
    T: ActivityRepository
        + GoalRepository
        + HabitRepository
        + ProfileRepository
        + FocusSessionRepository
        + TransitionSink
{
}
