//! Error types for quest domain guards and validation.

use thiserror::Error;

use super::activity::ActivityStatus;
use super::ids::EntityId;

/// Errors returned by quest domain state guards.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuestDomainError {
    /// A lifecycle transition was attempted from an illegal state.
    #[error("activity {activity} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Activity whose transition was rejected.
        activity: EntityId,
        /// State the activity is currently in.
        from: ActivityStatus,
        /// State the transition targeted.
        to: ActivityStatus,
    },

    /// A focus session was finished without one having been started.
    #[error("activity {0} has no active focus session")]
    NoActiveSession(EntityId),

    /// An evaluation was attempted before the activity completed.
    #[error("activity {0} has not completed, nothing to evaluate")]
    NotCompleted(EntityId),

    /// An evaluation was attempted twice.
    #[error("activity {0} has already been evaluated")]
    AlreadyEvaluated(EntityId),

    /// Captured text was empty after trimming.
    #[error("activity text must not be empty")]
    EmptyCaptureText,

    /// A habit name was empty after trimming.
    #[error("habit name must not be empty")]
    EmptyHabitName,

    /// A goal title was empty after trimming.
    #[error("goal title must not be empty")]
    EmptyGoalTitle,
}
