//! Goal records: declared targets that activities reference.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::reward::{Category, Horizon, LifeArea};

use super::error::QuestDomainError;
use super::ids::{EntityId, OwnerId};

/// Goal lifecycle status.
///
/// Status changes are plain field patches with no scoring side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Being pursued.
    Active,
    /// Reached.
    Completed,
    /// Deliberately shelved.
    Paused,
    /// Given up.
    Abandoned,
}

impl GoalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared target belonging to a life area and a time horizon.
///
/// Activities reference goals by their human-readable identifier; the
/// goal does not own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Human-readable identifier (`GOAL-NNNN`).
    pub id: EntityId,
    /// Owning user.
    pub owner: OwnerId,
    /// What the goal is.
    pub title: String,
    /// Life area the goal belongs to.
    pub life_area: LifeArea,
    /// Time horizon the goal targets.
    pub horizon: Horizon,
    /// Category tier applied to activities advancing this goal by
    /// default.
    pub category: Category,
    /// Current status.
    pub status: GoalStatus,
    /// When the goal was declared.
    pub created_at: DateTime<Utc>,
    /// Latest status-change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Declares a new active goal.
    ///
    /// # Errors
    ///
    /// Returns [`QuestDomainError::EmptyGoalTitle`] when the title is
    /// blank after trimming.
    pub fn new(
        id: EntityId,
        owner: OwnerId,
        title: impl Into<String>,
        life_area: LifeArea,
        horizon: Horizon,
        category: Category,
        clock: &impl Clock,
    ) -> Result<Self, QuestDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuestDomainError::EmptyGoalTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id,
            owner,
            title,
            life_area,
            horizon,
            category,
            status: GoalStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Patches the goal status.
    pub fn set_status(&mut self, status: GoalStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }

    /// Returns `true` when the goal is still being pursued.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, GoalStatus::Active)
    }
}
