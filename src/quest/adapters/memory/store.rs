//! In-memory quest store for lifecycle tests.
//!
//! A single `RwLock` stands in for the external document store's
//! transactional semantics: every transition record is checked and
//! written under one write guard, so partial transitions are never
//! observable.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::quest::domain::{
    Activity, ActivityStatus, EntityId, FocusSession, Goal, Habit, OwnerId, UserProfile,
};
use crate::quest::ports::{
    ActivityRepository, FocusSessionRepository, GoalRepository, HabitRepository,
    ProfileRepository, QuestRepositoryError, QuestRepositoryResult, TransitionRecord,
    TransitionSink,
};

/// Thread-safe in-memory quest store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestStore {
    state: Arc<RwLock<InMemoryQuestState>>,
}

#[derive(Debug, Default)]
struct InMemoryQuestState {
    activities: HashMap<OwnerId, Vec<Activity>>,
    goals: HashMap<OwnerId, Vec<Goal>>,
    habits: HashMap<OwnerId, Vec<Habit>>,
    profiles: HashMap<OwnerId, UserProfile>,
    sessions: HashMap<OwnerId, Vec<FocusSession>>,
}

impl InMemoryQuestStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> QuestRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryQuestState>> {
        self.state.read().map_err(|err| {
            QuestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> QuestRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryQuestState>> {
        self.state.write().map_err(|err| {
            QuestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn insert_activity(
    state: &mut InMemoryQuestState,
    activity: &Activity,
) -> QuestRepositoryResult<()> {
    let owned = state.activities.entry(activity.owner().clone()).or_default();
    if owned.iter().any(|existing| existing.id() == activity.id()) {
        return Err(QuestRepositoryError::DuplicateEntity(activity.id().clone()));
    }
    owned.push(activity.clone());
    Ok(())
}

fn replace_activity(
    state: &mut InMemoryQuestState,
    activity: &Activity,
) -> QuestRepositoryResult<()> {
    let owned = state.activities.entry(activity.owner().clone()).or_default();
    let slot = owned
        .iter_mut()
        .find(|existing| existing.id() == activity.id())
        .ok_or_else(|| QuestRepositoryError::ActivityNotFound(activity.id().clone()))?;
    *slot = activity.clone();
    Ok(())
}

#[async_trait]
impl ActivityRepository for InMemoryQuestStore {
    async fn activity(
        &self,
        owner: &OwnerId,
        id: &EntityId,
    ) -> QuestRepositoryResult<Option<Activity>> {
        let state = self.read()?;
        Ok(state
            .activities
            .get(owner)
            .and_then(|owned| owned.iter().find(|activity| activity.id() == id))
            .cloned())
    }

    async fn activities(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Activity>> {
        let state = self.read()?;
        let mut owned = state.activities.get(owner).cloned().unwrap_or_default();
        owned.sort_by_key(Activity::captured_at);
        Ok(owned)
    }

    async fn activities_by_status(
        &self,
        owner: &OwnerId,
        status: ActivityStatus,
    ) -> QuestRepositoryResult<Vec<Activity>> {
        let mut owned = self.activities(owner).await?;
        owned.retain(|activity| activity.status() == status);
        Ok(owned)
    }

    async fn activities_by_goal(
        &self,
        owner: &OwnerId,
        goal_id: &EntityId,
    ) -> QuestRepositoryResult<Vec<Activity>> {
        let mut owned = self.activities(owner).await?;
        owned.retain(|activity| {
            activity
                .organize_details()
                .is_some_and(|details| details.goal_id.as_ref() == Some(goal_id))
        });
        Ok(owned)
    }
}

#[async_trait]
impl GoalRepository for InMemoryQuestStore {
    async fn goal(&self, owner: &OwnerId, id: &EntityId) -> QuestRepositoryResult<Option<Goal>> {
        let state = self.read()?;
        Ok(state
            .goals
            .get(owner)
            .and_then(|owned| owned.iter().find(|goal| &goal.id == id))
            .cloned())
    }

    async fn goals(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Goal>> {
        let state = self.read()?;
        let mut owned = state.goals.get(owner).cloned().unwrap_or_default();
        owned.sort_by_key(|goal| goal.created_at);
        Ok(owned)
    }

    async fn insert_goal(&self, goal: &Goal) -> QuestRepositoryResult<()> {
        let mut state = self.write()?;
        let owned = state.goals.entry(goal.owner.clone()).or_default();
        if owned.iter().any(|existing| existing.id == goal.id) {
            return Err(QuestRepositoryError::DuplicateEntity(goal.id.clone()));
        }
        owned.push(goal.clone());
        Ok(())
    }

    async fn update_goal(&self, goal: &Goal) -> QuestRepositoryResult<()> {
        let mut state = self.write()?;
        let owned = state.goals.entry(goal.owner.clone()).or_default();
        let slot = owned
            .iter_mut()
            .find(|existing| existing.id == goal.id)
            .ok_or_else(|| QuestRepositoryError::GoalNotFound(goal.id.clone()))?;
        *slot = goal.clone();
        Ok(())
    }
}

#[async_trait]
impl HabitRepository for InMemoryQuestStore {
    async fn habit(&self, owner: &OwnerId, id: &EntityId) -> QuestRepositoryResult<Option<Habit>> {
        let state = self.read()?;
        Ok(state
            .habits
            .get(owner)
            .and_then(|owned| owned.iter().find(|habit| &habit.id == id))
            .cloned())
    }

    async fn habits(&self, owner: &OwnerId) -> QuestRepositoryResult<Vec<Habit>> {
        let state = self.read()?;
        let mut owned = state.habits.get(owner).cloned().unwrap_or_default();
        owned.sort_by_key(|habit| habit.created_at);
        Ok(owned)
    }

    async fn insert_habit(&self, habit: &Habit) -> QuestRepositoryResult<()> {
        let mut state = self.write()?;
        let owned = state.habits.entry(habit.owner.clone()).or_default();
        if owned.iter().any(|existing| existing.id == habit.id) {
            return Err(QuestRepositoryError::DuplicateEntity(habit.id.clone()));
        }
        owned.push(habit.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryQuestStore {
    async fn profile(&self, owner: &OwnerId) -> QuestRepositoryResult<Option<UserProfile>> {
        let state = self.read()?;
        Ok(state.profiles.get(owner).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> QuestRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .profiles
            .insert(profile.owner().clone(), profile.clone());
        Ok(())
    }

    async fn profiles(&self) -> QuestRepositoryResult<Vec<UserProfile>> {
        let state = self.read()?;
        let mut all: Vec<UserProfile> = state.profiles.values().cloned().collect();
        all.sort_by_key(UserProfile::created_at);
        Ok(all)
    }
}

#[async_trait]
impl FocusSessionRepository for InMemoryQuestStore {
    async fn sessions_for_activity(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestRepositoryResult<Vec<FocusSession>> {
        let state = self.read()?;
        let mut sessions: Vec<FocusSession> = state
            .sessions
            .get(owner)
            .map(|owned| {
                owned
                    .iter()
                    .filter(|session| &session.activity_id == activity_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        sessions.sort_by_key(|session| session.started_at);
        Ok(sessions)
    }
}

#[async_trait]
impl TransitionSink for InMemoryQuestStore {
    async fn apply(&self, record: TransitionRecord) -> QuestRepositoryResult<()> {
        let mut state = self.write()?;
        match record {
            TransitionRecord::NewActivity { activity, profile } => {
                insert_activity(&mut state, &activity)?;
                state.profiles.insert(profile.owner().clone(), profile);
            }
            TransitionRecord::ActivityChange {
                activity,
                profile,
                session,
            } => {
                replace_activity(&mut state, &activity)?;
                if let Some(profile) = profile {
                    state.profiles.insert(profile.owner().clone(), profile);
                }
                if let Some(session) = session {
                    state
                        .sessions
                        .entry(session.owner.clone())
                        .or_default()
                        .push(session);
                }
            }
            TransitionRecord::HabitLogged { habit, profile } => {
                let owned = state.habits.entry(habit.owner.clone()).or_default();
                let slot = owned
                    .iter_mut()
                    .find(|existing| existing.id == habit.id)
                    .ok_or_else(|| QuestRepositoryError::HabitNotFound(habit.id.clone()))?;
                *slot = habit;
                state.profiles.insert(profile.owner().clone(), profile);
            }
        }
        Ok(())
    }
}
