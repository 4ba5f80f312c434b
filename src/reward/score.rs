//! Stage scoring functions.
//!
//! Every function here is pure and deterministic: declarative inputs in,
//! integer score out. Persistence and aggregate updates belong to the
//! lifecycle service; nothing in this module performs I/O or reads a
//! clock.

use chrono::{DateTime, Utc};

use super::{Category, DifficultyTier, Horizon, Mood};

/// Flat score for capturing a raw activity.
const CAPTURE_BASE: i64 = 5;
/// Extra capture score when a reference link is attached.
const CAPTURE_LINK_BONUS: i64 = 3;

/// Organize base value before the category multiplier.
const ORGANIZE_BASE: f64 = 10.0;
/// Minimum organize score after all adjustments.
const ORGANIZE_MIN: i64 = 5;
/// Flat bonus for linking the activity to a goal.
const ORGANIZE_GOAL_BONUS: f64 = 2.0;
/// Flat bonus for committing to a deadline.
const ORGANIZE_DEADLINE_BONUS: f64 = 2.0;
/// Flat bonus for estimating the effort.
const ORGANIZE_ESTIMATE_BONUS: f64 = 1.0;
/// Penalty for reporting a mental block during organizing.
const ORGANIZE_BLOCK_PENALTY: f64 = 2.0;
/// Score contribution per high-marked priority dimension.
const PRIORITY_HIGH_WEIGHT: i64 = 2;

/// Multiplier applied to the organize score to form the done base.
const DONE_BASE_FACTOR: f64 = 1.5;
/// Late penalty per hour past the deadline.
const LATE_PENALTY_PER_HOUR: f64 = 0.05;
/// Ceiling on the accumulated late penalty.
const LATE_PENALTY_CAP: f64 = 0.5;
/// Bonus for finishing despite a reported mental block.
const BLOCK_COMPLETION_BONUS: f64 = 5.0;
/// Bonus for an on-time finish at or under 80% of the estimate.
const SPEED_BONUS_FAST: f64 = 10.0;
/// Bonus for a finish at or under the estimate.
const SPEED_BONUS_ON_ESTIMATE: f64 = 5.0;
/// Actual/estimate ratio at or below which the fast bonus applies.
const FAST_RATIO: f64 = 0.8;

/// Share of the done score granted for evaluating.
const EVALUATE_SHARE: f64 = 0.2;
/// Minimum evaluate score.
const EVALUATE_MIN: i64 = 1;
/// Score granted per point of positive mood delta.
const MOOD_DELTA_WEIGHT: i32 = 3;
/// Ceiling on the mood-delta bonus.
const MOOD_BONUS_CAP: i32 = 10;

/// Streak multiplier gained per full seven-day run.
const STREAK_STEP_BONUS: f64 = 0.1;
/// Days per streak step.
const STREAK_STEP_DAYS: u32 = 7;
/// Ceiling on the streak multiplier.
const STREAK_MULTIPLIER_CAP: f64 = 2.0;

/// Scale midpoint used for an unset mood.
const MOOD_UNSET_VALUE: i32 = 5;

/// Score for capturing a raw activity.
#[must_use]
pub const fn capture_score(has_link: bool) -> i64 {
    if has_link {
        CAPTURE_BASE + CAPTURE_LINK_BONUS
    } else {
        CAPTURE_BASE
    }
}

/// Declarative inputs to [`organize_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeScoreInput<'a> {
    /// Category tier chosen during organizing.
    pub category: Category,
    /// Time horizon chosen during organizing.
    pub horizon: Horizon,
    /// Encoded five-character priority-tag string.
    pub priority_tags: &'a str,
    /// Whether the activity was linked to a goal.
    pub has_goal: bool,
    /// Whether a deadline was committed.
    pub has_deadline: bool,
    /// Whether an effort estimate was given.
    pub has_estimate: bool,
    /// Whether a mental block was reported.
    pub mental_block: bool,
}

/// Score for organizing a captured activity.
///
/// Base value scaled by the category multiplier, plus the horizon urgency
/// bonus, twice the high-marked priority count, flat bonuses for goal,
/// deadline, and estimate, minus the mental-block penalty; floored at the
/// organize minimum and rounded to the nearest integer.
#[must_use]
pub fn organize_score(input: &OrganizeScoreInput<'_>) -> i64 {
    let mut score = ORGANIZE_BASE * input.category.multiplier();
    score += input.horizon.urgency_bonus() as f64;
    score += (PRIORITY_HIGH_WEIGHT * i64::from(priority_tag_score(input.priority_tags))) as f64;
    if input.has_goal {
        score += ORGANIZE_GOAL_BONUS;
    }
    if input.has_deadline {
        score += ORGANIZE_DEADLINE_BONUS;
    }
    if input.has_estimate {
        score += ORGANIZE_ESTIMATE_BONUS;
    }
    if input.mental_block {
        score -= ORGANIZE_BLOCK_PENALTY;
    }
    (score.round() as i64).max(ORGANIZE_MIN)
}

/// Declarative inputs to [`done_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoneScoreInput {
    /// Score recorded at the organize stage.
    pub organize_score: i64,
    /// When the activity was completed.
    pub completed_at: DateTime<Utc>,
    /// Deadline committed during organizing, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Whether a mental block was reported during organizing.
    pub mental_block: bool,
    /// Measured execution minutes, if a session was timed.
    pub actual_minutes: Option<i64>,
    /// Estimated execution minutes, if one was given.
    pub estimate_minutes: Option<u32>,
}

/// Outcome of scoring a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoneScoreOutcome {
    /// Final completion score.
    pub score: i64,
    /// Whether the completion landed past the deadline.
    pub is_late: bool,
    /// Bonus-currency units earned by a notably fast on-time finish.
    pub bonus_currency: u32,
}

/// Score for completing an activity.
///
/// The base is the organize score times 1.5. A completion past the
/// deadline is marked late and penalised 5% per hour, capped at 50%.
/// Finishing despite a reported mental block earns a flat bonus. When
/// both actual and estimated minutes are known, an on-time finish at or
/// under 80% of the estimate earns the larger speed bonus plus one
/// bonus-currency unit; a finish at or under the estimate earns the
/// smaller one. The final score never drops below 1.
#[must_use]
pub fn done_score(input: &DoneScoreInput) -> DoneScoreOutcome {
    let base = input.organize_score as f64 * DONE_BASE_FACTOR;

    let (is_late, late_penalty) = match input.deadline {
        Some(deadline) if input.completed_at > deadline => {
            let hours_late = (input.completed_at - deadline).num_seconds() as f64 / 3600.0;
            (true, (hours_late * LATE_PENALTY_PER_HOUR).min(LATE_PENALTY_CAP))
        }
        _ => (false, 0.0),
    };

    let block_bonus = if input.mental_block {
        BLOCK_COMPLETION_BONUS
    } else {
        0.0
    };

    let (speed_bonus, bonus_currency) = match (input.actual_minutes, input.estimate_minutes) {
        (Some(actual), Some(estimate)) if estimate > 0 => {
            let ratio = actual as f64 / f64::from(estimate);
            if ratio <= FAST_RATIO && !is_late {
                (SPEED_BONUS_FAST, 1)
            } else if ratio <= 1.0 {
                (SPEED_BONUS_ON_ESTIMATE, 0)
            } else {
                (0.0, 0)
            }
        }
        _ => (0.0, 0),
    };

    let score = (base * (1.0 - late_penalty) + block_bonus + speed_bonus)
        .round()
        .max(1.0) as i64;

    DoneScoreOutcome {
        score,
        is_late,
        bonus_currency,
    }
}

/// Score for evaluating a completed activity.
///
/// 20% of the done score, rounded, plus a bonus only for a positive
/// mood delta: three points per delta point, capped at ten. The result
/// is floored at 1.
#[must_use]
pub fn evaluate_score(done_score: i64, mood_delta: i32) -> i64 {
    let share = (done_score as f64 * EVALUATE_SHARE).round() as i64;
    let mood_bonus = if mood_delta > 0 {
        i64::from((MOOD_DELTA_WEIGHT * mood_delta).min(MOOD_BONUS_CAP))
    } else {
        0
    };
    (share + mood_bonus).max(EVALUATE_MIN)
}

/// Score for one logged habit session.
///
/// Tier base multiplied by the streak bonus: +10% per full seven-day
/// streak, capped at 2.0x.
#[must_use]
pub fn habit_score(tier: DifficultyTier, current_streak: u32) -> i64 {
    let steps = current_streak / STREAK_STEP_DAYS;
    let multiplier = (1.0 + f64::from(steps) * STREAK_STEP_BONUS).min(STREAK_MULTIPLIER_CAP);
    (tier.base_score() as f64 * multiplier).round() as i64
}

/// Difference between two mood readings on the 0..=10 scale.
///
/// An unset reading counts as the midpoint 5.
#[must_use]
pub fn mood_delta(before: Option<Mood>, after: Option<Mood>) -> i32 {
    let score_of = |mood: Option<Mood>| mood.map_or(MOOD_UNSET_VALUE, Mood::scale_value);
    score_of(after) - score_of(before)
}

/// Number of high-marked dimensions in a priority-tag string.
///
/// Counts uppercase letters among the first five characters; lowercase
/// and non-letter characters do not count.
#[must_use]
pub fn priority_tag_score(tag_string: &str) -> u32 {
    tag_string
        .chars()
        .take(5)
        .filter(|ch| ch.is_alphabetic() && ch.is_uppercase())
        .count() as u32
}
