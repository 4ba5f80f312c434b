//! Repository ports over the external document store.
//!
//! The store is assumed to offer indexed lookups by owner, status, and
//! goal reference, and atomic single-key read-modify-write semantics.
//! Listing operations return collections ordered by creation time.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::quest::domain::{
    Activity, ActivityStatus, EntityId, FocusSession, Goal, Habit, OwnerId, UserProfile,
};

/// Result type for quest repository operations.
pub type QuestRepositoryResult<T> = Result<T, QuestRepositoryError>;

/// Errors returned by quest store implementations.
#[derive(Debug, Clone, Error)]
pub enum QuestRepositoryError {
    /// The referenced activity does not exist.
    #[error("activity not found: {0}")]
    ActivityNotFound(EntityId),

    /// The referenced goal does not exist.
    #[error("goal not found: {0}")]
    GoalNotFound(EntityId),

    /// The referenced habit does not exist.
    #[error("habit not found: {0}")]
    HabitNotFound(EntityId),

    /// The referenced profile does not exist.
    #[error("profile not found for owner: {0}")]
    ProfileNotFound(OwnerId),

    /// An entity with the same identifier already exists, which also
    /// surfaces identifier-allocation collisions under concurrent
    /// creation.
    #[error("duplicate entity identifier: {0}")]
    DuplicateEntity(EntityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl QuestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Read access to stored activities.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Finds an activity by identifier.
    ///
    /// Returns `None` when the activity does not exist.
    async fn activity(
        &self,
        owner: &OwnerId,
        id: &EntityId,
    ) -> QuestRepositoryResult<Option<Activity>>;

    /// Returns all of the owner's activities, oldest first.
    async fn activities(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Activity>>;

    /// Returns the owner's activities in the given status, oldest
    /// first.
    async fn activities_by_status(
        &self,
        owner: &OwnerId,
        status: ActivityStatus,
    ) -> QuestRepositoryResult<Vec<Activity>>;

    /// Returns the owner's activities referencing the given goal,
    /// oldest first.
    async fn activities_by_goal(
        &self,
        owner: &OwnerId,
        goal_id: &EntityId,
    ) -> QuestRepositoryResult<Vec<Activity>>;
}

/// Persistence contract for goals.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Finds a goal by identifier.
    ///
    /// Returns `None` when the goal does not exist.
    async fn goal(&self, owner: &OwnerId, id: &EntityId) -> QuestRepositoryResult<Option<Goal>>;

    /// Returns all of the owner's goals, oldest first.
    async fn goals(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Goal>>;

    /// Stores a new goal.
    ///
    /// Implementations must check for identifier collisions and insert
    /// as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`QuestRepositoryError::DuplicateEntity`] when the
    /// identifier already exists.
    async fn insert_goal(&self, goal: &Goal) -> QuestRepositoryResult<()>;

    /// Persists changes to an existing goal.
    ///
    /// # Errors
    ///
    /// Returns [`QuestRepositoryError::GoalNotFound`] when the goal
    /// does not exist.
    async fn update_goal(&self, goal: &Goal) -> QuestRepositoryResult<()>;
}

/// Persistence contract for habits.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Finds a habit by identifier.
    ///
    /// Returns `None` when the habit does not exist.
    async fn habit(&self, owner: &OwnerId, id: &EntityId) -> QuestRepositoryResult<Option<Habit>>;

    /// Returns all of the owner's habits, oldest first.
    async fn habits(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Habit>>;

    /// Stores a new habit.
    ///
    /// # Errors
    ///
    /// Returns [`QuestRepositoryError::DuplicateEntity`] when the
    /// identifier already exists.
    async fn insert_habit(&self, habit: &Habit) -> QuestRepositoryResult<()>;
}

/// Persistence contract for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile for an owner.
    ///
    /// Returns `None` before the user's first contact.
    async fn profile(&self, owner: &OwnerId) -> QuestRepositoryResult<Option<UserProfile>>;

    /// Creates or replaces the profile for its owner.
    async fn upsert_profile(&self, profile: &UserProfile) -> QuestRepositoryResult<()>;

    /// Returns every stored profile, for background sweeps.
    async fn profiles(&self) -> QuestRepositoryResult<Vec<UserProfile>>;
}

/// Read access to focus-session analytics.
#[async_trait]
pub trait FocusSessionRepository: Send + Sync {
    /// Returns the sessions recorded for an activity, oldest first.
    async fn sessions_for_activity(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestRepositoryResult<Vec<FocusSession>>;
}
