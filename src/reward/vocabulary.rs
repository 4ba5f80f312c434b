//! Scoring vocabulary: the fixed classification enums every quest entity
//! carries and the reward engine consumes.
//!
//! Each enum offers a canonical storage representation (`as_str`), a
//! fallible parse (`TryFrom<&str>`), and the scoring accessor the reward
//! functions read. Parsing is lenient about case and surrounding
//! whitespace because values round-trip through free-text transports.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned while parsing a vocabulary label from transport or
/// persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} label: '{value}'")]
pub struct ParseLabelError {
    /// Vocabulary kind that rejected the value.
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// One of the six fixed personal domains used to classify goals,
/// activities, and habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeArea {
    /// Body, health, movement.
    Physical,
    /// Learning, attention, inner state.
    Mind,
    /// Work and craft.
    Vocation,
    /// Money and material footing.
    Financial,
    /// Relationships and community.
    Social,
    /// Play and recovery.
    Leisure,
}

impl LifeArea {
    /// Every life area in canonical presentation order.
    pub const ALL: [Self; 6] = [
        Self::Physical,
        Self::Mind,
        Self::Vocation,
        Self::Financial,
        Self::Social,
        Self::Leisure,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Mind => "mind",
            Self::Vocation => "vocation",
            Self::Financial => "financial",
            Self::Social => "social",
            Self::Leisure => "leisure",
        }
    }
}

impl TryFrom<&str> for LifeArea {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(Self::Physical),
            "mind" => Ok(Self::Mind),
            "vocation" => Ok(Self::Vocation),
            "financial" => Ok(Self::Financial),
            "social" => Ok(Self::Social),
            "leisure" => Ok(Self::Leisure),
            _ => Err(ParseLabelError::new("life area", value)),
        }
    }
}

impl fmt::Display for LifeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The time frame a goal or activity targets.
///
/// Nearer horizons earn a larger organize-score bonus; `Someday` earns
/// none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// Due within the day.
    Today,
    /// Due within the week.
    Week,
    /// Due within the month.
    Month,
    /// Due within the quarter.
    Quarter,
    /// Due within the year.
    Annum,
    /// No committed time frame.
    Someday,
}

impl Horizon {
    /// Every horizon from nearest to furthest.
    pub const ALL: [Self; 6] = [
        Self::Today,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Annum,
        Self::Someday,
    ];

    /// Urgency bonus added to the organize score.
    #[must_use]
    pub const fn urgency_bonus(self) -> i64 {
        match self {
            Self::Today => 5,
            Self::Week => 4,
            Self::Month => 3,
            Self::Quarter => 2,
            Self::Annum => 1,
            Self::Someday => 0,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Annum => "annum",
            Self::Someday => "someday",
        }
    }
}

impl TryFrom<&str> for Horizon {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "annum" => Ok(Self::Annum),
            "someday" => Ok(Self::Someday),
            _ => Err(ParseLabelError::new("horizon", value)),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Five-tier activity classification driving the organize multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Directly advances a declared goal.
    MainQuest,
    /// Worthwhile but off the critical path.
    SideQuest,
    /// Keeps life running; neither gains nor losses.
    Maintenance,
    /// Deliberate rest and restoration.
    Recovery,
    /// Time spent to no discernible end.
    VoidFiller,
}

impl Category {
    /// Every category from highest to lowest multiplier.
    pub const ALL: [Self; 5] = [
        Self::MainQuest,
        Self::SideQuest,
        Self::Maintenance,
        Self::Recovery,
        Self::VoidFiller,
    ];

    /// Organize-score multiplier for this tier.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::MainQuest => 2.0,
            Self::SideQuest => 1.5,
            Self::Maintenance => 1.0,
            Self::Recovery => 0.8,
            Self::VoidFiller => 0.5,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainQuest => "main_quest",
            Self::SideQuest => "side_quest",
            Self::Maintenance => "maintenance",
            Self::Recovery => "recovery",
            Self::VoidFiller => "void_filler",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "main_quest" => Ok(Self::MainQuest),
            "side_quest" => Ok(Self::SideQuest),
            "maintenance" => Ok(Self::Maintenance),
            "recovery" => Ok(Self::Recovery),
            "void_filler" => Ok(Self::VoidFiller),
            _ => Err(ParseLabelError::new("category", value)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an activity is expected to be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionType {
    /// Needs an uninterrupted focus block.
    Focus,
    /// Done in minutes whenever a gap opens.
    Quick,
    /// Recurring upkeep.
    Routine,
    /// Requires going somewhere or queueing on someone.
    Errand,
}

impl ExecutionType {
    /// Every execution type in presentation order.
    pub const ALL: [Self; 4] = [Self::Focus, Self::Quick, Self::Routine, Self::Errand];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Quick => "quick",
            Self::Routine => "routine",
            Self::Errand => "errand",
        }
    }
}

impl TryFrom<&str> for ExecutionType {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(Self::Focus),
            "quick" => Ok(Self::Quick),
            "routine" => Ok(Self::Routine),
            "errand" => Ok(Self::Errand),
            _ => Err(ParseLabelError::new("execution type", value)),
        }
    }
}

impl fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Habit difficulty tier; each habit describes itself at all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    /// The floor version that keeps the streak alive.
    Easy,
    /// The ordinary day's version.
    Medium,
    /// A demanding session.
    Hard,
    /// The full-commitment version.
    Peak,
}

impl DifficultyTier {
    /// Every tier from lightest to heaviest.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Peak];

    /// Fixed base score for a logged session at this tier.
    #[must_use]
    pub const fn base_score(self) -> i64 {
        match self {
            Self::Easy => 5,
            Self::Medium => 10,
            Self::Hard => 15,
            Self::Peak => 20,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Peak => "peak",
        }
    }
}

impl TryFrom<&str> for DifficultyTier {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "peak" => Ok(Self::Peak),
            _ => Err(ParseLabelError::new("difficulty tier", value)),
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mood label on the eleven-point ordered scale the evaluate stage uses.
///
/// `scale_value` runs from 0 (most negative) to 10 (most positive); an
/// unset mood reads as the midpoint 5 (see [`super::mood_delta`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Scale 0.
    Despairing,
    /// Scale 1.
    Drained,
    /// Scale 2.
    Low,
    /// Scale 3.
    Frustrated,
    /// Scale 4.
    Restless,
    /// Scale 5.
    Neutral,
    /// Scale 6.
    Settled,
    /// Scale 7.
    Engaged,
    /// Scale 8.
    Bright,
    /// Scale 9.
    Energised,
    /// Scale 10.
    Radiant,
}

impl Mood {
    /// Every mood from most negative to most positive.
    pub const ALL: [Self; 11] = [
        Self::Despairing,
        Self::Drained,
        Self::Low,
        Self::Frustrated,
        Self::Restless,
        Self::Neutral,
        Self::Settled,
        Self::Engaged,
        Self::Bright,
        Self::Energised,
        Self::Radiant,
    ];

    /// Position of this label on the 0..=10 scale.
    #[must_use]
    pub const fn scale_value(self) -> i32 {
        match self {
            Self::Despairing => 0,
            Self::Drained => 1,
            Self::Low => 2,
            Self::Frustrated => 3,
            Self::Restless => 4,
            Self::Neutral => 5,
            Self::Settled => 6,
            Self::Engaged => 7,
            Self::Bright => 8,
            Self::Energised => 9,
            Self::Radiant => 10,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Despairing => "despairing",
            Self::Drained => "drained",
            Self::Low => "low",
            Self::Frustrated => "frustrated",
            Self::Restless => "restless",
            Self::Neutral => "neutral",
            Self::Settled => "settled",
            Self::Engaged => "engaged",
            Self::Bright => "bright",
            Self::Energised => "energised",
            Self::Radiant => "radiant",
        }
    }
}

impl TryFrom<&str> for Mood {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "despairing" => Ok(Self::Despairing),
            "drained" => Ok(Self::Drained),
            "low" => Ok(Self::Low),
            "frustrated" => Ok(Self::Frustrated),
            "restless" => Ok(Self::Restless),
            "neutral" => Ok(Self::Neutral),
            "settled" => Ok(Self::Settled),
            "engaged" => Ok(Self::Engaged),
            "bright" => Ok(Self::Bright),
            "energised" => Ok(Self::Energised),
            "radiant" => Ok(Self::Radiant),
            _ => Err(ParseLabelError::new("mood", value)),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
