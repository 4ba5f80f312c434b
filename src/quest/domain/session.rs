//! Focus-session records: optional analytics for one execution attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntityId, FocusSessionId, OwnerId};

/// Analytic record of one completed focus session on an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique identifier for this record.
    pub id: FocusSessionId,
    /// Owning user.
    pub owner: OwnerId,
    /// Activity the session executed.
    pub activity_id: EntityId,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session finished.
    pub finished_at: DateTime<Utc>,
    /// Measured duration in whole minutes.
    pub minutes: i64,
}

impl FocusSession {
    /// Creates a session record from measured execution timestamps.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        activity_id: EntityId,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FocusSessionId::new(),
            owner,
            activity_id,
            started_at,
            finished_at,
            minutes: (finished_at - started_at).num_minutes().max(0),
        }
    }
}
