//! Typed conversation flows.
//!
//! Conversation state is a closed set of flow variants, each step
//! carrying exactly the fields collected so far, so the set of fields
//! that exist at a given step is enforced by the type rather than by an
//! untyped bag. Parsing helpers for the free-text steps live here too;
//! they are pure and directly unit-testable.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::quest::domain::{EntityId, OwnerId, TierDescriptions};
use crate::reward::{Category, ExecutionType, Horizon, LifeArea, PriorityTags};

use super::error::WizardValidationError;
use super::fingerprint::StepFingerprint;

/// Non-space characters an ideal-state answer needs before it seeds a
/// goal.
const IDEAL_GOAL_MIN_CHARS: usize = 5;
/// Characters an obstacle answer needs before it seeds an extra goal.
const OBSTACLE_GOAL_THRESHOLD: usize = 40;

/// Whether a prompt is currently outstanding for the stored step.
///
/// `AwaitingInput` suppresses re-issuing the current prompt when the
/// same step is reached again before an answer arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPhase {
    /// No prompt outstanding.
    Idle,
    /// A prompt was issued and awaits the user's reply.
    AwaitingInput,
}

/// The three reflection prompts asked per life area during guided
/// onboarding, carrying the answers collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum ReflectionPrompt {
    /// Asking for the ideal state.
    Ideal,
    /// Asking for the current state.
    Current {
        /// The recorded ideal-state answer.
        ideal: String,
    },
    /// Asking for the obstacle.
    Obstacle {
        /// The recorded ideal-state answer.
        ideal: String,
        /// The recorded current-state answer.
        current: String,
    },
}

impl ReflectionPrompt {
    /// Short tag naming the prompt, for fingerprints.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Current { .. } => "current",
            Self::Obstacle { .. } => "obstacle",
        }
    }
}

/// One life area's completed reflection answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaReflection {
    /// The reflected life area.
    pub area: LifeArea,
    /// Ideal-state answer.
    pub ideal: String,
    /// Current-state answer.
    pub current: String,
    /// Obstacle answer.
    pub obstacle: String,
}

/// Current step of the guided onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum GuidedStep {
    /// Reflecting on one life area.
    Reflection {
        /// Index into [`LifeArea::ALL`].
        area_index: usize,
        /// Which of the three prompts is outstanding.
        prompt: ReflectionPrompt,
    },
    /// Choosing the reminder interval after all areas are done.
    IntervalSelection,
}

/// Progress signal returned while recording guided reflections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidedProgress {
    /// More reflection prompts remain.
    Continue,
    /// All areas are reflected; the interval selection is next.
    AwaitingInterval,
}

/// Guided onboarding: three reflection prompts for each of the six
/// life areas, then interval selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedOnboarding {
    /// Current step.
    pub step: GuidedStep,
    /// Completed per-area reflections.
    pub completed: Vec<AreaReflection>,
}

impl GuidedOnboarding {
    /// Starts the flow at the first area's ideal-state prompt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: GuidedStep::Reflection {
                area_index: 0,
                prompt: ReflectionPrompt::Ideal,
            },
            completed: Vec::new(),
        }
    }

    /// Returns the life area currently being reflected, if any.
    #[must_use]
    pub fn current_area(&self) -> Option<LifeArea> {
        match &self.step {
            GuidedStep::Reflection { area_index, .. } => {
                LifeArea::ALL.get(*area_index).copied()
            }
            GuidedStep::IntervalSelection => None,
        }
    }

    /// Records one reflection answer and advances the prompt sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WizardValidationError::BlankAnswer`] when the answer
    /// is empty after trimming; the step does not advance.
    pub fn record_reflection(
        &mut self,
        answer: &str,
    ) -> Result<GuidedProgress, WizardValidationError> {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return Err(WizardValidationError::BlankAnswer);
        }
        let GuidedStep::Reflection { area_index, prompt } = self.step.clone() else {
            return Ok(GuidedProgress::AwaitingInterval);
        };
        self.step = match prompt {
            ReflectionPrompt::Ideal => GuidedStep::Reflection {
                area_index,
                prompt: ReflectionPrompt::Current {
                    ideal: trimmed.to_owned(),
                },
            },
            ReflectionPrompt::Current { ideal } => GuidedStep::Reflection {
                area_index,
                prompt: ReflectionPrompt::Obstacle {
                    ideal,
                    current: trimmed.to_owned(),
                },
            },
            ReflectionPrompt::Obstacle { ideal, current } => {
                if let Some(area) = LifeArea::ALL.get(area_index).copied() {
                    self.completed.push(AreaReflection {
                        area,
                        ideal,
                        current,
                        obstacle: trimmed.to_owned(),
                    });
                }
                let next_index = area_index + 1;
                if next_index < LifeArea::ALL.len() {
                    GuidedStep::Reflection {
                        area_index: next_index,
                        prompt: ReflectionPrompt::Ideal,
                    }
                } else {
                    GuidedStep::IntervalSelection
                }
            }
        };
        Ok(match self.step {
            GuidedStep::IntervalSelection => GuidedProgress::AwaitingInterval,
            GuidedStep::Reflection { .. } => GuidedProgress::Continue,
        })
    }
}

impl Default for GuidedOnboarding {
    fn default() -> Self {
        Self::new()
    }
}

/// A goal derived from onboarding answers, awaiting creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSeed {
    /// Goal title.
    pub title: String,
    /// Life area the goal belongs to.
    pub area: LifeArea,
    /// Horizon assigned to the derived goal.
    pub horizon: Horizon,
    /// Category assigned to the derived goal.
    pub category: Category,
}

/// Derives goal seeds from completed guided reflections.
///
/// Each area with a substantive ideal-state answer seeds a goal; an
/// area whose obstacle description runs long seeds an extra goal for
/// clearing that obstacle.
#[must_use]
pub fn derive_goal_seeds(reflections: &[AreaReflection]) -> Vec<GoalSeed> {
    let mut seeds = Vec::new();
    for reflection in reflections {
        let substance = reflection
            .ideal
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .count();
        if substance >= IDEAL_GOAL_MIN_CHARS {
            seeds.push(GoalSeed {
                title: reflection.ideal.clone(),
                area: reflection.area,
                horizon: Horizon::Annum,
                category: Category::MainQuest,
            });
        }
        if reflection.obstacle.chars().count() > OBSTACLE_GOAL_THRESHOLD {
            seeds.push(GoalSeed {
                title: format!("Overcome: {}", reflection.obstacle),
                area: reflection.area,
                horizon: Horizon::Quarter,
                category: Category::SideQuest,
            });
        }
    }
    seeds
}

/// Current step of the manual onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ManualStep {
    /// Awaiting the single `life-area: goal` block.
    GoalLines,
    /// Choosing the reminder interval.
    IntervalSelection,
}

/// Manual onboarding: one free-text reply of `life-area: goal` lines,
/// then interval selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOnboarding {
    /// Current step.
    pub step: ManualStep,
}

impl ManualOnboarding {
    /// Starts the flow at the goal-lines prompt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: ManualStep::GoalLines,
        }
    }
}

impl Default for ManualOnboarding {
    fn default() -> Self {
        Self::new()
    }
}

/// One parsed `life-area: goal` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalLine {
    /// The named life area.
    pub area: LifeArea,
    /// The goal title; `None` records the area as skipped.
    pub title: Option<String>,
}

/// Parses a manual-onboarding reply into goal lines.
///
/// # Errors
///
/// Returns [`WizardValidationError::BlankAnswer`] when no line is
/// present, [`WizardValidationError::MalformedGoalLine`] for a line
/// without a colon, and [`WizardValidationError::UnknownLifeArea`] for
/// an unrecognized area name.
pub fn parse_goal_lines(text: &str) -> Result<Vec<GoalLine>, WizardValidationError> {
    let mut lines = Vec::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let (area_raw, title_raw) = line
            .split_once(':')
            .ok_or_else(|| WizardValidationError::MalformedGoalLine(line.to_owned()))?;
        let area = LifeArea::try_from(area_raw)
            .map_err(|_| WizardValidationError::UnknownLifeArea(area_raw.trim().to_owned()))?;
        let title = title_raw.trim();
        lines.push(GoalLine {
            area,
            title: (!title.is_empty()).then(|| title.to_owned()),
        });
    }
    if lines.is_empty() {
        return Err(WizardValidationError::BlankAnswer);
    }
    Ok(lines)
}

/// Parses a reminder-interval choice.
///
/// `off` disables reminders; otherwise the value is minutes.
///
/// # Errors
///
/// Returns [`WizardValidationError::UnparsableInterval`] when the
/// value is neither `off` nor a positive number of minutes.
pub fn parse_interval(value: &str) -> Result<Option<u32>, WizardValidationError> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized == "off" {
        return Ok(None);
    }
    match normalized.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(Some(minutes)),
        _ => Err(WizardValidationError::UnparsableInterval(value.to_owned())),
    }
}

/// Parses a goal selection: a one-based number into the offered list,
/// or `skip`.
///
/// Returns the zero-based index, or `None` for `skip`.
///
/// # Errors
///
/// Returns [`WizardValidationError::UnparsableGoalIndex`] for anything
/// that is neither, and [`WizardValidationError::GoalIndexOutOfRange`]
/// when the number falls outside the offered list.
pub fn parse_goal_selection(
    value: &str,
    available: usize,
) -> Result<Option<usize>, WizardValidationError> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized == "skip" {
        return Ok(None);
    }
    let index: usize = normalized
        .parse()
        .map_err(|_| WizardValidationError::UnparsableGoalIndex(value.to_owned()))?;
    if index == 0 || index > available {
        return Err(WizardValidationError::GoalIndexOutOfRange { index, available });
    }
    Ok(Some(index - 1))
}

/// Parses the four slash-separated difficulty variants.
///
/// # Errors
///
/// Returns [`WizardValidationError::WrongTierCount`] unless exactly
/// four parts are present, and
/// [`WizardValidationError::BlankTierVariant`] when one is blank.
pub fn parse_tier_variants(text: &str) -> Result<TierDescriptions, WizardValidationError> {
    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    let [easy, medium, hard, peak] = parts.as_slice() else {
        return Err(WizardValidationError::WrongTierCount(parts.len()));
    };
    for (position, part) in [easy, medium, hard, peak].iter().enumerate() {
        if part.is_empty() {
            return Err(WizardValidationError::BlankTierVariant {
                position: position + 1,
            });
        }
    }
    Ok(TierDescriptions {
        easy: (*easy).to_owned(),
        medium: (*medium).to_owned(),
        hard: (*hard).to_owned(),
        peak: (*peak).to_owned(),
    })
}

/// Current step of the organize dialog, carrying the fields committed
/// so far for the item at the head of the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum OrganizeStep {
    /// Selecting the goal the item advances.
    GoalSelect,
    /// Toggling the five priority dimensions.
    PriorityTags {
        /// The selected goal, if any.
        goal_id: Option<EntityId>,
        /// Dimensions toggled so far.
        tags: PriorityTags,
    },
    /// Choosing the life area.
    LifeArea {
        /// The selected goal, if any.
        goal_id: Option<EntityId>,
        /// The committed priority marking.
        tags: PriorityTags,
    },
    /// Choosing the horizon.
    Horizon {
        /// The selected goal, if any.
        goal_id: Option<EntityId>,
        /// The committed priority marking.
        tags: PriorityTags,
        /// The chosen life area.
        life_area: LifeArea,
    },
    /// Choosing the execution type.
    ExecutionType {
        /// The selected goal, if any.
        goal_id: Option<EntityId>,
        /// The committed priority marking.
        tags: PriorityTags,
        /// The chosen life area.
        life_area: LifeArea,
        /// The chosen horizon.
        horizon: Horizon,
    },
    /// Choosing the category, which commits the organize transition.
    Category {
        /// The selected goal, if any.
        goal_id: Option<EntityId>,
        /// The committed priority marking.
        tags: PriorityTags,
        /// The chosen life area.
        life_area: LifeArea,
        /// The chosen horizon.
        horizon: Horizon,
        /// The chosen execution type.
        execution_type: ExecutionType,
    },
}

impl OrganizeStep {
    /// Short tag naming the step, for fingerprints.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::GoalSelect => "goal_select",
            Self::PriorityTags { .. } => "priority_tags",
            Self::LifeArea { .. } => "life_area",
            Self::Horizon { .. } => "horizon",
            Self::ExecutionType { .. } => "execution_type",
            Self::Category { .. } => "category",
        }
    }
}

/// Organize dialog over a queue of captured items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizeDialog {
    /// Remaining items, current item first.
    pub queue: Vec<EntityId>,
    /// Current step for the item at the head of the queue.
    pub step: OrganizeStep,
}

impl OrganizeDialog {
    /// Starts the dialog over the given queue.
    #[must_use]
    pub const fn new(queue: Vec<EntityId>) -> Self {
        Self {
            queue,
            step: OrganizeStep::GoalSelect,
        }
    }

    /// Returns the item currently being organized, if any.
    #[must_use]
    pub fn current_item(&self) -> Option<&EntityId> {
        self.queue.first()
    }

    /// Drops the current item and resets the step for the next one.
    ///
    /// Returns the next item, if any remains.
    pub fn advance_queue(&mut self) -> Option<&EntityId> {
        if !self.queue.is_empty() {
            self.queue.remove(0);
        }
        self.step = OrganizeStep::GoalSelect;
        self.queue.first()
    }
}

/// Current step of the habit-creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum HabitStep {
    /// Awaiting the habit name.
    Name,
    /// Choosing the life area.
    LifeArea {
        /// The recorded habit name.
        name: String,
    },
    /// Awaiting the four difficulty variants.
    TierVariants {
        /// The recorded habit name.
        name: String,
        /// The chosen life area.
        life_area: LifeArea,
    },
}

impl HabitStep {
    /// Short tag naming the step, for fingerprints.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LifeArea { .. } => "life_area",
            Self::TierVariants { .. } => "tier_variants",
        }
    }
}

/// Habit creation: name, life area, difficulty variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCreation {
    /// Current step.
    pub step: HabitStep,
}

impl HabitCreation {
    /// Starts the flow at the name prompt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: HabitStep::Name,
        }
    }
}

impl Default for HabitCreation {
    fn default() -> Self {
        Self::new()
    }
}

/// The active flow, one per user at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum Flow {
    /// Guided onboarding across the six life areas.
    GuidedOnboarding(GuidedOnboarding),
    /// Manual onboarding from a single goal-lines reply.
    ManualOnboarding(ManualOnboarding),
    /// Organize dialog over queued captured items.
    Organize(OrganizeDialog),
    /// Habit creation.
    HabitCreation(HabitCreation),
}

impl Flow {
    /// Short tag naming the flow, for fingerprints.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::GuidedOnboarding(_) => "guided_onboarding",
            Self::ManualOnboarding(_) => "manual_onboarding",
            Self::Organize(_) => "organize",
            Self::HabitCreation(_) => "habit_creation",
        }
    }

    /// Tag naming the current step, for fingerprints.
    #[must_use]
    pub fn step_tag(&self) -> String {
        match self {
            Self::GuidedOnboarding(guided) => match &guided.step {
                GuidedStep::Reflection { area_index, prompt } => {
                    format!("reflect:{area_index}:{}", prompt.tag())
                }
                GuidedStep::IntervalSelection => "interval".to_owned(),
            },
            Self::ManualOnboarding(manual) => match manual.step {
                ManualStep::GoalLines => "goal_lines".to_owned(),
                ManualStep::IntervalSelection => "interval".to_owned(),
            },
            Self::Organize(dialog) => {
                let item = dialog.current_item().map_or("empty", EntityId::as_str);
                format!("{}:{item}", dialog.step.tag())
            }
            Self::HabitCreation(habit) => habit.step.tag().to_owned(),
        }
    }
}

/// Per-user conversation state persisted between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Owning user.
    pub owner: OwnerId,
    /// The active flow and its step.
    pub flow: Flow,
    /// Whether a prompt is outstanding.
    pub phase: PromptPhase,
    /// Fingerprint of the last applied answer, for duplicate
    /// suppression.
    pub last_fingerprint: Option<StepFingerprint>,
    /// Last persistence timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ConversationState {
    /// Creates fresh state for a newly started flow.
    #[must_use]
    pub fn new(owner: OwnerId, flow: Flow, clock: &impl Clock) -> Self {
        Self {
            owner,
            flow,
            phase: PromptPhase::Idle,
            last_fingerprint: None,
            updated_at: clock.utc(),
        }
    }

    /// Marks the current step's prompt as issued.
    pub fn mark_prompted(&mut self, clock: &impl Clock) {
        self.phase = PromptPhase::AwaitingInput;
        self.updated_at = clock.utc();
    }

    /// Records the fingerprint of an applied answer.
    pub fn record_applied(&mut self, fingerprint: StepFingerprint, clock: &impl Clock) {
        self.last_fingerprint = Some(fingerprint);
        self.updated_at = clock.utc();
    }
}
