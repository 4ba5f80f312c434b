//! Activity aggregate root: the primary tracked unit and its four-stage
//! lifecycle.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::reward::{
    Category, DoneScoreInput, DoneScoreOutcome, ExecutionType, Horizon, LifeArea, Mood,
    OrganizeScoreInput, PriorityTags, capture_score, done_score, evaluate_score, mood_delta,
    organize_score,
};

use super::error::QuestDomainError;
use super::ids::{EntityId, OwnerId};

/// Activity lifecycle state.
///
/// Status only ever advances along the defined order; the three final
/// states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Raw capture, not yet organized.
    Captured,
    /// Organized with classification fields, ready to execute.
    Organized,
    /// A focus session is under way.
    InProgress,
    /// Completed on time.
    Complete,
    /// Completed past the deadline.
    CompleteLate,
    /// Explicitly given up.
    Abandoned,
}

impl ActivityStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Captured => "captured",
            Self::Organized => "organized",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::CompleteLate => "complete_late",
            Self::Abandoned => "abandoned",
        }
    }

    /// Returns `true` when no further transition can leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::CompleteLate | Self::Abandoned)
    }

    /// Returns `true` when the activity finished, on time or late.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Complete | Self::CompleteLate)
    }
}

/// Error returned while parsing activity states from persistence.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown activity status: {0}")]
pub struct ParseActivityStatusError(pub String);

impl TryFrom<&str> for ActivityStatus {
    type Error = ParseActivityStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "captured" => Ok(Self::Captured),
            "organized" => Ok(Self::Organized),
            "in_progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "complete_late" => Ok(Self::CompleteLate),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(ParseActivityStatusError(value.to_owned())),
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification fields collected while organizing a captured activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizeDetails {
    /// Goal this activity advances, if any.
    pub goal_id: Option<EntityId>,
    /// Five-dimension priority marking.
    pub priority_tags: PriorityTags,
    /// Life area the activity belongs to.
    pub life_area: LifeArea,
    /// Time horizon the activity targets.
    pub horizon: Horizon,
    /// How the activity is expected to be executed.
    pub execution_type: ExecutionType,
    /// Scoring category tier.
    pub category: Category,
    /// Estimated effort in minutes, if given.
    pub estimate_minutes: Option<u32>,
    /// Committed deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Another activity this one waits on, if any.
    pub depends_on: Option<EntityId>,
    /// Whether the owner reported a mental block around this activity.
    pub mental_block: bool,
}

impl OrganizeDetails {
    /// Creates details with only the four required classification fields.
    #[must_use]
    pub const fn required(
        life_area: LifeArea,
        horizon: Horizon,
        execution_type: ExecutionType,
        category: Category,
    ) -> Self {
        Self {
            goal_id: None,
            priority_tags: PriorityTags::none(),
            life_area,
            horizon,
            execution_type,
            category,
            estimate_minutes: None,
            deadline: None,
            depends_on: None,
            mental_block: false,
        }
    }
}

/// Per-stage score contributions recorded as each stage is reached.
///
/// A stage's score is present if and only if that stage has been
/// reached; the running total is always the exact sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageScores {
    /// Score recorded at capture.
    pub capture: i64,
    /// Score recorded at organize, once organized.
    pub organize: Option<i64>,
    /// Score recorded at completion, once finished.
    pub done: Option<i64>,
    /// Score recorded at evaluation, once evaluated.
    pub evaluate: Option<i64>,
}

impl StageScores {
    const fn new(capture: i64) -> Self {
        Self {
            capture,
            organize: None,
            done: None,
            evaluate: None,
        }
    }

    /// Running sum of every stage score recorded so far.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.capture
            + self.organize.unwrap_or(0)
            + self.done.unwrap_or(0)
            + self.evaluate.unwrap_or(0)
    }
}

/// Activity aggregate root.
///
/// Fields populate progressively as the lifecycle advances: capture
/// fields at creation, organize fields at [`Activity::organize`],
/// execution fields across [`Activity::start_focus`] and
/// [`Activity::finish_focus`], evaluation fields at
/// [`Activity::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    id: EntityId,
    owner: OwnerId,
    status: ActivityStatus,
    text: String,
    link: Option<String>,
    parent_id: Option<EntityId>,
    captured_at: DateTime<Utc>,
    organize: Option<OrganizeDetails>,
    session_started_at: Option<DateTime<Utc>>,
    actual_minutes: Option<i64>,
    completed_at: Option<DateTime<Utc>>,
    post_mood: Option<Mood>,
    mood_delta: Option<i32>,
    scores: StageScores,
    updated_at: DateTime<Utc>,
}

impl Activity {
    /// Captures a new activity, computing and recording its capture
    /// score.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyCaptureText`] when the text is
    /// blank after trimming.
    pub fn capture(
        id: EntityId,
        owner: OwnerId,
        text: impl Into<String>,
        link: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, QuestDomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestDomainError::EmptyCaptureText);
        }
        let timestamp = clock.utc();
        let score = capture_score(link.is_some());
        Ok(Self {
            id,
            owner,
            status: ActivityStatus::Captured,
            text,
            link,
            parent_id: None,
            captured_at: timestamp,
            organize: None,
            session_started_at: None,
            actual_minutes: None,
            completed_at: None,
            post_mood: None,
            mood_delta: None,
            scores: StageScores::new(score),
            updated_at: timestamp,
        })
    }

    /// Captures a sub-activity produced by splitting `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyCaptureText`] when the part text
    /// is blank.
    pub fn capture_split_part(
        id: EntityId,
        parent: &Self,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, QuestDomainError> {
        let mut part = Self::capture(id, parent.owner.clone(), text, None, clock)?;
        part.parent_id = Some(parent.id.clone());
        Ok(part)
    }

    /// Organizes a captured activity, recording the organize score.
    ///
    /// Returns the organize score on success.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::InvalidStateTransition`] unless the
    /// activity is in `Captured`.
    pub fn organize(
        &mut self,
        details: OrganizeDetails,
        clock: &impl Clock,
    ) -> Result<i64, QuestDomainError> {
        self.guard_transition(ActivityStatus::Captured, ActivityStatus::Organized)?;
        let score = organize_score(&OrganizeScoreInput {
            category: details.category,
            horizon: details.horizon,
            priority_tags: &details.priority_tags.encode(),
            has_goal: details.goal_id.is_some(),
            has_deadline: details.deadline.is_some(),
            has_estimate: details.estimate_minutes.is_some(),
            mental_block: details.mental_block,
        });
        self.organize = Some(details);
        self.scores.organize = Some(score);
        self.status = ActivityStatus::Organized;
        self.touch(clock);
        Ok(score)
    }

    /// Starts a focus session on an organized activity.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::InvalidStateTransition`] unless the
    /// activity is in `Organized`.
    pub fn start_focus(&mut self, clock: &impl Clock) -> Result<(), QuestDomainError> {
        self.guard_transition(ActivityStatus::Organized, ActivityStatus::InProgress)?;
        self.session_started_at = Some(clock.utc());
        self.status = ActivityStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Finishes the active focus session, recording the done score and
    /// advancing to `Complete` or `CompleteLate`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::InvalidStateTransition`] unless the
    /// activity is in `InProgress`, and
    /// [`QuestDomainError::NoActiveSession`] when no session start was
    /// recorded.
    pub fn finish_focus(&mut self, clock: &impl Clock) -> Result<DoneScoreOutcome, QuestDomainError> {
        self.guard_transition(ActivityStatus::InProgress, ActivityStatus::Complete)?;
        let started_at = self
            .session_started_at
            .ok_or_else(|| QuestDomainError::NoActiveSession(self.id.clone()))?;
        let now = clock.utc();
        let actual_minutes = (now - started_at).num_minutes().max(0);
        let details = self.organize.as_ref();
        let outcome = done_score(&DoneScoreInput {
            organize_score: self.scores.organize.unwrap_or(0),
            completed_at: now,
            deadline: details.and_then(|d| d.deadline),
            mental_block: details.is_some_and(|d| d.mental_block),
            actual_minutes: Some(actual_minutes),
            estimate_minutes: details.and_then(|d| d.estimate_minutes),
        });
        self.actual_minutes = Some(actual_minutes);
        self.completed_at = Some(now);
        self.scores.done = Some(outcome.score);
        self.status = if outcome.is_late {
            ActivityStatus::CompleteLate
        } else {
            ActivityStatus::Complete
        };
        self.touch(clock);
        Ok(outcome)
    }

    /// Evaluates a completed activity, recording the mood delta and the
    /// evaluate score.
    ///
    /// Returns `(evaluate_score, mood_delta)` on success.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::NotCompleted`] unless the activity
    /// has completed, and [`QuestDomainError::AlreadyEvaluated`] when an
    /// evaluation was already recorded.
    pub fn evaluate(
        &mut self,
        pre_mood: Option<Mood>,
        post_mood: Mood,
        clock: &impl Clock,
    ) -> Result<(i64, i32), QuestDomainError> {
        if !self.status.is_completed() {
            return Err(QuestDomainError::NotCompleted(self.id.clone()));
        }
        if self.scores.evaluate.is_some() {
            return Err(QuestDomainError::AlreadyEvaluated(self.id.clone()));
        }
        let done = self
            .scores
            .done
            .ok_or_else(|| QuestDomainError::NotCompleted(self.id.clone()))?;
        let delta = mood_delta(pre_mood, Some(post_mood));
        let score = evaluate_score(done, delta);
        self.post_mood = Some(post_mood);
        self.mood_delta = Some(delta);
        self.scores.evaluate = Some(score);
        self.touch(clock);
        Ok((score, delta))
    }

    /// Abandons the activity from any non-terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::InvalidStateTransition`] when the
    /// activity is already terminal.
    pub fn abandon(&mut self, clock: &impl Clock) -> Result<(), QuestDomainError> {
        if self.status.is_terminal() {
            return Err(QuestDomainError::InvalidStateTransition {
                activity: self.id.clone(),
                from: self.status,
                to: ActivityStatus::Abandoned,
            });
        }
        self.status = ActivityStatus::Abandoned;
        self.touch(clock);
        Ok(())
    }

    fn guard_transition(
        &self,
        required: ActivityStatus,
        to: ActivityStatus,
    ) -> Result<(), QuestDomainError> {
        if self.status == required {
            return Ok(());
        }
        Err(QuestDomainError::InvalidStateTransition {
            activity: self.id.clone(),
            from: self.status,
            to,
        })
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    /// Returns the activity identifier.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ActivityStatus {
        self.status
    }

    /// Returns the captured text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the captured reference link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Returns the parent activity this one was split from, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&EntityId> {
        self.parent_id.as_ref()
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Returns the organize fields, once organized.
    #[must_use]
    pub const fn organize_details(&self) -> Option<&OrganizeDetails> {
        self.organize.as_ref()
    }

    /// Returns the start of the focus session, once started.
    #[must_use]
    pub const fn session_started_at(&self) -> Option<DateTime<Utc>> {
        self.session_started_at
    }

    /// Returns the measured execution minutes, once finished.
    #[must_use]
    pub const fn actual_minutes(&self) -> Option<i64> {
        self.actual_minutes
    }

    /// Returns the completion timestamp, once finished.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the post-completion mood, once evaluated.
    #[must_use]
    pub const fn post_mood(&self) -> Option<Mood> {
        self.post_mood
    }

    /// Returns the recorded mood delta, once evaluated.
    #[must_use]
    pub const fn mood_delta(&self) -> Option<i32> {
        self.mood_delta
    }

    /// Returns the per-stage score record.
    #[must_use]
    pub const fn scores(&self) -> &StageScores {
        &self.scores
    }

    /// Returns the running total of all recorded stage scores.
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.scores.total()
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
