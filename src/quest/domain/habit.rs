//! Habit records: recurring templates with streak tracking.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::reward::{DifficultyTier, LifeArea, habit_score};

use super::error::QuestDomainError;
use super::ids::{EntityId, OwnerId};

/// The habit described at each of the four difficulty tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDescriptions {
    /// The floor version that keeps the streak alive.
    pub easy: String,
    /// The ordinary day's version.
    pub medium: String,
    /// A demanding session.
    pub hard: String,
    /// The full-commitment version.
    pub peak: String,
}

impl TierDescriptions {
    /// Returns the description for one tier.
    #[must_use]
    pub fn for_tier(&self, tier: DifficultyTier) -> &str {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
            DifficultyTier::Peak => &self.peak,
        }
    }
}

/// A recurring habit template.
///
/// The streak counts consecutive logged sessions and never resets
/// automatically; lapse detection is not this record's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Human-readable identifier (`HAB-NNNN`).
    pub id: EntityId,
    /// Owning user.
    pub owner: OwnerId,
    /// What the habit is called.
    pub name: String,
    /// Life area the habit belongs to.
    pub life_area: LifeArea,
    /// Descriptions at each difficulty tier.
    pub tiers: TierDescriptions,
    /// Current streak counter.
    pub streak: u32,
    /// Longest streak ever reached.
    pub max_streak: u32,
    /// When the habit was created.
    pub created_at: DateTime<Utc>,
    /// Latest log timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// Creates a new habit with a zero streak.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyHabitName`] when the name is
    /// blank after trimming.
    pub fn new(
        id: EntityId,
        owner: OwnerId,
        name: impl Into<String>,
        life_area: LifeArea,
        tiers: TierDescriptions,
        clock: &impl Clock,
    ) -> Result<Self, QuestDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuestDomainError::EmptyHabitName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id,
            owner,
            name,
            life_area,
            tiers,
            streak: 0,
            max_streak: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Logs one session at the given tier.
    ///
    /// Increments the streak, refreshes the maximum, and returns the
    /// session score computed from the incremented streak.
    pub fn log_session(&mut self, tier: DifficultyTier, clock: &impl Clock) -> i64 {
        self.streak += 1;
        self.max_streak = self.max_streak.max(self.streak);
        self.updated_at = clock.utc();
        habit_score(tier, self.streak)
    }
}
