//! User profile: aggregate totals and per-user settings.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::ids::OwnerId;

/// Vitality value every profile starts with.
const VITALITY_START: u32 = 100;
/// Vitality lost on each late completion.
const VITALITY_LATE_PENALTY: u32 = 10;

/// Rank computed from the running total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Below 100 points.
    Wanderer,
    /// 100 to 499 points.
    Seeker,
    /// 500 to 1499 points.
    Adept,
    /// 1500 to 4999 points.
    Veteran,
    /// 5000 points and beyond.
    Paragon,
}

impl Rank {
    /// Returns the rank for a running total score.
    #[must_use]
    pub const fn for_score(total: i64) -> Self {
        match total {
            i64::MIN..100 => Self::Wanderer,
            100..500 => Self::Seeker,
            500..1500 => Self::Adept,
            1500..5000 => Self::Veteran,
            _ => Self::Paragon,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wanderer => "wanderer",
            Self::Seeker => "seeker",
            Self::Adept => "adept",
            Self::Veteran => "veteran",
            Self::Paragon => "paragon",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reminder preferences and delivery bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Minutes between reminders; `None` disables them.
    pub interval_minutes: Option<u32>,
    /// When the last reminder was delivered.
    pub last_reminder_at: Option<DateTime<Utc>>,
}

/// Per-user aggregate record.
///
/// Created on first contact, mutated on every scoring event, never
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    owner: OwnerId,
    total_score: i64,
    vitality: u32,
    bonus_currency: u32,
    settings: ReminderSettings,
    created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates the profile recorded on a user's first contact.
    #[must_use]
    pub fn new(owner: OwnerId, clock: &impl Clock) -> Self {
        Self {
            owner,
            total_score: 0,
            vitality: VITALITY_START,
            bonus_currency: 0,
            settings: ReminderSettings::default(),
            created_at: clock.utc(),
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the running total score.
    #[must_use]
    pub const fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Returns the vitality counter.
    #[must_use]
    pub const fn vitality(&self) -> u32 {
        self.vitality
    }

    /// Returns the bonus-currency balance.
    #[must_use]
    pub const fn bonus_currency(&self) -> u32 {
        self.bonus_currency
    }

    /// Returns the reminder settings.
    #[must_use]
    pub const fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    /// Returns the first-contact timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the rank for the current total.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        Rank::for_score(self.total_score)
    }

    /// Adds a stage score to the running total.
    pub const fn add_score(&mut self, delta: i64) {
        self.total_score += delta;
    }

    /// Applies the fixed vitality penalty for a late completion,
    /// flooring at zero.
    pub const fn apply_late_penalty(&mut self) {
        self.vitality = self.vitality.saturating_sub(VITALITY_LATE_PENALTY);
    }

    /// Credits earned bonus currency.
    pub const fn add_bonus_currency(&mut self, delta: u32) {
        self.bonus_currency += delta;
    }

    /// Sets the reminder interval; `None` disables reminders.
    pub const fn set_reminder_interval(&mut self, minutes: Option<u32>) {
        self.settings.interval_minutes = minutes;
    }

    /// Stamps the last reminder delivery time.
    pub fn mark_reminded(&mut self, clock: &impl Clock) {
        self.settings.last_reminder_at = Some(clock.utc());
    }

    /// Returns `true` when a reminder is due at `now`.
    ///
    /// A profile with no interval is never due; a profile never
    /// reminded is due immediately.
    #[must_use]
    pub fn reminder_due(&self, now: DateTime<Utc>) -> bool {
        let Some(interval) = self.settings.interval_minutes else {
            return false;
        };
        self.settings.last_reminder_at.is_none_or(|last| {
            now - last >= chrono::Duration::minutes(i64::from(interval))
        })
    }
}
