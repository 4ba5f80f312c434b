//! Lifecycle controller: owns the legal transitions for every tracked
//! item, invokes the reward engine through the domain aggregates, and
//! keeps the owner's aggregate totals in step.
//!
//! Every scoring operation builds one [`TransitionRecord`] and hands it
//! to the store's transition sink, so the item and the profile are
//! written together or not at all. Each outcome carries the score
//! delta(s) it produced for immediate display.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::quest::domain::{
    Activity, EntityId, EntityKind, FocusSession, Goal, GoalStatus, Habit, OrganizeDetails,
    OwnerId, QuestDomainError, TierDescriptions, UserProfile, next_identifier,
};
use crate::quest::ports::{QuestRepositoryError, QuestStore, TransitionRecord};
use crate::reward::{Category, DifficultyTier, Horizon, LifeArea, Mood};

/// Service-level errors for quest lifecycle operations.
#[derive(Debug, Error)]
pub enum QuestLifecycleError {
    /// Domain guard rejected the transition.
    #[error(transparent)]
    Domain(#[from] QuestDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Repository(#[from] QuestRepositoryError),
}

/// Result type for quest lifecycle operations.
pub type QuestLifecycleResult<T> = Result<T, QuestLifecycleError>;

/// Request payload for capturing a new activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Owning user.
    pub owner: OwnerId,
    /// Raw captured text.
    pub text: String,
    /// Optional reference link.
    pub link: Option<String>,
}

impl CaptureRequest {
    /// Creates a capture request without a link.
    pub fn new(owner: OwnerId, text: impl Into<String>) -> Self {
        Self {
            owner,
            text: text.into(),
            link: None,
        }
    }

    /// Attaches a reference link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Result of capturing an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// The captured activity.
    pub activity: Activity,
    /// Capture score credited to the owner.
    pub score_delta: i64,
}

/// Result of organizing an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizeOutcome {
    /// The organized activity.
    pub activity: Activity,
    /// Organize score credited to the owner.
    pub score_delta: i64,
}

/// Result of finishing a focus session.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishFocusOutcome {
    /// The completed activity.
    pub activity: Activity,
    /// Done score credited to the owner.
    pub score_delta: i64,
    /// Whether the completion landed past the deadline.
    pub is_late: bool,
    /// Bonus-currency units earned.
    pub bonus_currency: u32,
    /// Owner vitality after any late penalty.
    pub vitality: u32,
}

/// Request payload for evaluating a completed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluateRequest<'a> {
    /// Owning user.
    pub owner: &'a OwnerId,
    /// Activity to evaluate.
    pub activity_id: &'a EntityId,
    /// Mood before working the activity, when known.
    pub pre_mood: Option<Mood>,
    /// Mood after completion.
    pub post_mood: Mood,
}

/// Result of evaluating an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateOutcome {
    /// The evaluated activity.
    pub activity: Activity,
    /// Evaluate score credited to the owner.
    pub score_delta: i64,
    /// Recorded mood delta.
    pub mood_delta: i32,
}

/// Result of splitting an activity into sub-items.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The newly captured sub-activities.
    pub children: Vec<Activity>,
    /// Sum of the capture scores credited to the owner.
    pub score_delta: i64,
}

/// Result of logging a habit session.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitLogOutcome {
    /// The habit after the logged session.
    pub habit: Habit,
    /// Habit score credited to the owner.
    pub score_delta: i64,
    /// Streak after the increment.
    pub streak: u32,
}

/// Request payload for declaring a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGoalRequest {
    /// Owning user.
    pub owner: OwnerId,
    /// What the goal is.
    pub title: String,
    /// Life area the goal belongs to.
    pub life_area: LifeArea,
    /// Time horizon the goal targets.
    pub horizon: Horizon,
    /// Default category tier for activities advancing it.
    pub category: Category,
}

impl CreateGoalRequest {
    /// Creates a goal request.
    pub fn new(
        owner: OwnerId,
        title: impl Into<String>,
        life_area: LifeArea,
        horizon: Horizon,
        category: Category,
    ) -> Self {
        Self {
            owner,
            title: title.into(),
            life_area,
            horizon,
            category,
        }
    }
}

/// Request payload for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabitRequest {
    /// Owning user.
    pub owner: OwnerId,
    /// What the habit is called.
    pub name: String,
    /// Life area the habit belongs to.
    pub life_area: LifeArea,
    /// Descriptions at each difficulty tier.
    pub tiers: TierDescriptions,
}

/// Quest lifecycle orchestration service.
#[derive(Clone)]
pub struct QuestLifecycleService<S, C>
where
    S: QuestStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> QuestLifecycleService<S, C>
where
    S: QuestStore,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Captures a new activity and credits its capture score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the text is blank or the
    /// store rejects the atomic write.
    pub async fn capture(&self, request: CaptureRequest) -> QuestLifecycleResult<CaptureOutcome> {
        let mut profile = self.ensure_profile(&request.owner).await?;
        let existing = self.store.activities(&request.owner).await?;
        let id = next_identifier(EntityKind::Activity, existing.iter().map(Activity::id));
        let activity = Activity::capture(
            id,
            request.owner,
            request.text,
            request.link,
            &*self.clock,
        )?;
        let score_delta = activity.scores().capture;
        profile.add_score(score_delta);
        self.store
            .apply(TransitionRecord::NewActivity {
                activity: activity.clone(),
                profile,
            })
            .await?;
        Ok(CaptureOutcome {
            activity,
            score_delta,
        })
    }

    /// Organizes a captured activity and credits its organize score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the activity is not in
    /// `Captured`, a referenced goal is absent, or the store rejects
    /// the atomic write.
    pub async fn organize(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
        details: OrganizeDetails,
    ) -> QuestLifecycleResult<OrganizeOutcome> {
        let mut activity = self.require_activity(owner, activity_id).await?;
        if let Some(goal_id) = &details.goal_id {
            self.require_goal(owner, goal_id).await?;
        }
        let mut profile = self.ensure_profile(owner).await?;
        let score_delta = activity.organize(details, &*self.clock)?;
        profile.add_score(score_delta);
        self.store
            .apply(TransitionRecord::ActivityChange {
                activity: activity.clone(),
                profile: Some(profile),
                session: None,
            })
            .await?;
        Ok(OrganizeOutcome {
            activity,
            score_delta,
        })
    }

    /// Starts a focus session on an organized activity.
    ///
    /// No score is produced; only the item advances.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the activity is not in
    /// `Organized` or the store rejects the write.
    pub async fn start_focus(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestLifecycleResult<Activity> {
        let mut activity = self.require_activity(owner, activity_id).await?;
        activity.start_focus(&*self.clock)?;
        self.store
            .apply(TransitionRecord::ActivityChange {
                activity: activity.clone(),
                profile: None,
                session: None,
            })
            .await?;
        Ok(activity)
    }

    /// Finishes the active focus session, credits the done score, and
    /// applies any late penalty and bonus currency.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when no session is active or
    /// the store rejects the atomic write.
    pub async fn finish_focus(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestLifecycleResult<FinishFocusOutcome> {
        let mut activity = self.require_activity(owner, activity_id).await?;
        let mut profile = self.ensure_profile(owner).await?;
        let outcome = activity.finish_focus(&*self.clock)?;
        let started_at = activity
            .session_started_at()
            .ok_or_else(|| QuestDomainError::NoActiveSession(activity.id().clone()))?;
        profile.add_score(outcome.score);
        if outcome.is_late {
            profile.apply_late_penalty();
        }
        if outcome.bonus_currency > 0 {
            profile.add_bonus_currency(outcome.bonus_currency);
        }
        let finished_at = activity.completed_at().unwrap_or(started_at);
        let session = FocusSession::new(
            owner.clone(),
            activity.id().clone(),
            started_at,
            finished_at,
        );
        let vitality = profile.vitality();
        self.store
            .apply(TransitionRecord::ActivityChange {
                activity: activity.clone(),
                profile: Some(profile),
                session: Some(session),
            })
            .await?;
        Ok(FinishFocusOutcome {
            activity,
            score_delta: outcome.score,
            is_late: outcome.is_late,
            bonus_currency: outcome.bonus_currency,
            vitality,
        })
    }

    /// Evaluates a completed activity and credits the evaluate score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the activity has not
    /// completed, was already evaluated, or the store rejects the
    /// atomic write.
    pub async fn evaluate(
        &self,
        request: EvaluateRequest<'_>,
    ) -> QuestLifecycleResult<EvaluateOutcome> {
        let mut activity = self.require_activity(request.owner, request.activity_id).await?;
        let mut profile = self.ensure_profile(request.owner).await?;
        let (score_delta, mood_delta) =
            activity.evaluate(request.pre_mood, request.post_mood, &*self.clock)?;
        profile.add_score(score_delta);
        self.store
            .apply(TransitionRecord::ActivityChange {
                activity: activity.clone(),
                profile: Some(profile),
                session: None,
            })
            .await?;
        Ok(EvaluateOutcome {
            activity,
            score_delta,
            mood_delta,
        })
    }

    /// Abandons an activity from any non-terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the activity is already
    /// terminal or the store rejects the write.
    pub async fn abandon(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
    ) -> QuestLifecycleResult<Activity> {
        let mut activity = self.require_activity(owner, activity_id).await?;
        activity.abandon(&*self.clock)?;
        self.store
            .apply(TransitionRecord::ActivityChange {
                activity: activity.clone(),
                profile: None,
                session: None,
            })
            .await?;
        Ok(activity)
    }

    /// Splits an activity into captured sub-items, one per non-blank
    /// part, each credited with its own capture score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the parent is absent, every
    /// part is blank, or the store rejects a write.
    pub async fn split(
        &self,
        owner: &OwnerId,
        activity_id: &EntityId,
        parts: &[String],
    ) -> QuestLifecycleResult<SplitOutcome> {
        let parent = self.require_activity(owner, activity_id).await?;
        let kept: Vec<&str> = parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        if kept.is_empty() {
            return Err(QuestDomainError::EmptyCaptureText.into());
        }
        let mut profile = self.ensure_profile(owner).await?;
        let mut existing_ids: Vec<EntityId> = self
            .store
            .activities(owner)
            .await?
            .iter()
            .map(|activity| activity.id().clone())
            .collect();
        let mut children = Vec::with_capacity(kept.len());
        let mut score_delta = 0;
        for part in kept {
            let id = next_identifier(EntityKind::Activity, existing_ids.iter());
            let child = Activity::capture_split_part(id.clone(), &parent, part, &*self.clock)?;
            existing_ids.push(id);
            let capture = child.scores().capture;
            profile.add_score(capture);
            score_delta += capture;
            self.store
                .apply(TransitionRecord::NewActivity {
                    activity: child.clone(),
                    profile: profile.clone(),
                })
                .await?;
            children.push(child);
        }
        Ok(SplitOutcome {
            children,
            score_delta,
        })
    }

    /// Logs one habit session, advancing the streak and crediting the
    /// habit score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the habit is absent or the
    /// store rejects the atomic write.
    pub async fn log_habit(
        &self,
        owner: &OwnerId,
        habit_id: &EntityId,
        tier: DifficultyTier,
    ) -> QuestLifecycleResult<HabitLogOutcome> {
        let mut habit = self.require_habit(owner, habit_id).await?;
        let mut profile = self.ensure_profile(owner).await?;
        let score_delta = habit.log_session(tier, &*self.clock);
        profile.add_score(score_delta);
        let streak = habit.streak;
        self.store
            .apply(TransitionRecord::HabitLogged {
                habit: habit.clone(),
                profile,
            })
            .await?;
        Ok(HabitLogOutcome {
            habit,
            score_delta,
            streak,
        })
    }

    /// Declares a new goal.
    ///
    /// Goal creation carries no score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the title is blank or the
    /// store rejects the insert.
    pub async fn create_goal(&self, request: CreateGoalRequest) -> QuestLifecycleResult<Goal> {
        let existing = self.store.goals(&request.owner).await?;
        let id = next_identifier(EntityKind::Goal, existing.iter().map(|goal| &goal.id));
        let goal = Goal::new(
            id,
            request.owner,
            request.title,
            request.life_area,
            request.horizon,
            request.category,
            &*self.clock,
        )?;
        self.store.insert_goal(&goal).await?;
        Ok(goal)
    }

    /// Creates a new habit.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the name is blank or the
    /// store rejects the insert.
    pub async fn create_habit(&self, request: CreateHabitRequest) -> QuestLifecycleResult<Habit> {
        let existing = self.store.habits(&request.owner).await?;
        let id = next_identifier(EntityKind::Habit, existing.iter().map(|habit| &habit.id));
        let habit = Habit::new(
            id,
            request.owner,
            request.name,
            request.life_area,
            request.tiers,
            &*self.clock,
        )?;
        self.store.insert_habit(&habit).await?;
        Ok(habit)
    }

    /// Patches a goal's status.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the goal is absent or the
    /// store rejects the update.
    pub async fn set_goal_status(
        &self,
        owner: &OwnerId,
        goal_id: &EntityId,
        status: GoalStatus,
    ) -> QuestLifecycleResult<Goal> {
        let mut goal = self.require_goal(owner, goal_id).await?;
        goal.set_status(status, &*self.clock);
        self.store.update_goal(&goal).await?;
        Ok(goal)
    }

    /// Sets the owner's reminder interval; `None` disables reminders.
    ///
    /// # Errors
    ///
    /// Returns [`QuestLifecycleError`] when the store rejects the
    /// profile write.
    pub async fn set_reminder_interval(
        &self,
        owner: &OwnerId,
        minutes: Option<u32>,
    ) -> QuestLifecycleResult<UserProfile> {
        let mut profile = self.ensure_profile(owner).await?;
        profile.set_reminder_interval(minutes);
        self.store.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// Loads the owner's profile, creating the first-contact record
    /// in memory when none is stored yet.
    async fn ensure_profile(&self, owner: &OwnerId) -> QuestLifecycleResult<UserProfile> {
        let stored = self.store.profile(owner).await?;
        Ok(stored.unwrap_or_else(|| UserProfile::new(owner.clone(), &*self.clock)))
    }

    async fn require_activity(
        &self,
        owner: &OwnerId,
        id: &EntityId,
    ) -> QuestLifecycleResult<Activity> {
        self.store
            .activity(owner, id)
            .await?
            .ok_or_else(|| QuestRepositoryError::ActivityNotFound(id.clone()).into())
    }

    async fn require_goal(&self, owner: &OwnerId, id: &EntityId) -> QuestLifecycleResult<Goal> {
        self.store
            .goal(owner, id)
            .await?
            .ok_or_else(|| QuestRepositoryError::GoalNotFound(id.clone()).into())
    }

    async fn require_habit(&self, owner: &OwnerId, id: &EntityId) -> QuestLifecycleResult<Habit> {
        self.store
            .habit(owner, id)
            .await?
            .ok_or_else(|| QuestRepositoryError::HabitNotFound(id.clone()).into())
    }
}
