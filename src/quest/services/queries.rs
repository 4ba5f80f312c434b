//! Read-side service for the client API surface.

use std::sync::Arc;

use crate::quest::domain::{
    Activity, ActivityStatus, EntityId, FocusSession, Goal, Habit, OwnerId, Rank,
};
use crate::quest::ports::{QuestRepositoryResult, QuestStore};

/// Per-status activity counts reported in the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Activities awaiting organizing.
    pub captured: usize,
    /// Activities ready to execute.
    pub organized: usize,
    /// Activities with a focus session under way.
    pub in_progress: usize,
    /// Activities completed on time.
    pub complete: usize,
    /// Activities completed late.
    pub complete_late: usize,
    /// Activities given up.
    pub abandoned: usize,
}

impl StatusCounts {
    fn tally(activities: &[Activity]) -> Self {
        let mut counts = Self::default();
        for activity in activities {
            match activity.status() {
                ActivityStatus::Captured => counts.captured += 1,
                ActivityStatus::Organized => counts.organized += 1,
                ActivityStatus::InProgress => counts.in_progress += 1,
                ActivityStatus::Complete => counts.complete += 1,
                ActivityStatus::CompleteLate => counts.complete_late += 1,
                ActivityStatus::Abandoned => counts.abandoned += 1,
            }
        }
        counts
    }
}

/// Aggregate view of one user's standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Running total score.
    pub total_score: i64,
    /// Vitality counter.
    pub vitality: u32,
    /// Bonus-currency balance.
    pub bonus_currency: u32,
    /// Rank computed from the score tiers.
    pub rank: Rank,
    /// Per-status activity counts.
    pub counts: StatusCounts,
}

/// Read operations consumed by the external view layer.
#[derive(Clone)]
pub struct QuestQueryService<S>
where
    S: QuestStore,
{
    store: Arc<S>,
}

impl<S> QuestQueryService<S>
where
    S: QuestStore,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Finds one activity by identifier.
    ///
    /// Returns `None` when the activity does not exist.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn activity(
        &self,
        owner: &OwnerId,
        id: &EntityId,
    ) -> QuestRepositoryResult<Option<Activity>> {
        self.store.activity(owner, id).await
    }

    /// Activities organized and ready to execute, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn ready_items(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Activity>> {
        self.store
            .activities_by_status(owner, ActivityStatus::Organized)
            .await
    }

    /// Activities captured but not yet organized, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn captured_items(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Activity>> {
        self.store
            .activities_by_status(owner, ActivityStatus::Captured)
            .await
    }

    /// Completed activities, on time and late, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn completed_items(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Activity>> {
        let mut completed = self
            .store
            .activities_by_status(owner, ActivityStatus::Complete)
            .await?;
        completed.extend(
            self.store
                .activities_by_status(owner, ActivityStatus::CompleteLate)
                .await?,
        );
        completed.sort_by_key(|activity| std::cmp::Reverse(activity.completed_at()));
        Ok(completed)
    }

    /// All of the owner's goals, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn goals(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Goal>> {
        self.store.goals(owner).await
    }

    /// The owner's goals still being pursued, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn active_goals(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Goal>> {
        let mut goals = self.store.goals(owner).await?;
        goals.retain(Goal::is_active);
        Ok(goals)
    }

    /// All of the owner's habits, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn habits(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Habit>> {
        self.store.habits(owner).await
    }

    /// Focus sessions recorded for one activity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the store lookup fails.
    pub async fn sessions_for_activity(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestRepositoryResult<Vec<FocusSession>> {
        self.store.sessions_for_activity(owner, activity_id).await
    }

    /// Aggregate standing for one user.
    ///
    /// A user with no stored profile reads as a fresh one: zero score,
    /// full vitality, lowest rank.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a store lookup fails.
    pub async fn summary(&self, owner: &OwnerId) -> QuestRepositoryResult<Summary> {
        let profile = self.store.profile(owner).await?;
        let activities = self.store.activities(owner).await?;
        let counts = StatusCounts::tally(&activities);
        Ok(profile.map_or(
            Summary {
                total_score: 0,
                vitality: 100,
                bonus_currency: 0,
                rank: Rank::Wanderer,
                counts,
            },
            |profile| Summary {
                total_score: profile.total_score(),
                vitality: profile.vitality(),
                bonus_currency: profile.bonus_currency(),
                rank: profile.rank(),
                counts,
            },
        ))
    }
}
