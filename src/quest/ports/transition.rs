//! Atomic persistence of scored lifecycle transitions.
//!
//! Every scoring transition touches two records at once: the item being
//! advanced and its owner's aggregate profile. The sink persists both
//! as one unit. A failure must leave neither written, so no partially
//! scored item can ever be observed.

use async_trait::async_trait;

use crate::quest::domain::{Activity, FocusSession, Habit, UserProfile};

use super::repository::QuestRepositoryResult;

/// One atomic unit of lifecycle persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionRecord {
    /// A newly captured activity and the profile credited with its
    /// capture score.
    ///
    /// Implementations must verify the allocated identifier is still
    /// free inside the same atomic unit, surfacing collisions as
    /// [`super::QuestRepositoryError::DuplicateEntity`].
    NewActivity {
        /// The captured activity.
        activity: Activity,
        /// The credited owner profile.
        profile: UserProfile,
    },

    /// An advanced activity, the owner profile when the transition
    /// scored, and the focus-session record when one finished.
    ActivityChange {
        /// The advanced activity.
        activity: Activity,
        /// The updated owner profile; `None` for unscored transitions.
        profile: Option<UserProfile>,
        /// Focus-session analytics recorded by `finish_focus`.
        session: Option<FocusSession>,
    },

    /// A habit with its streak advanced and the credited owner profile.
    HabitLogged {
        /// The habit after the logged session.
        habit: Habit,
        /// The credited owner profile.
        profile: UserProfile,
    },
}

/// Port applying one transition record atomically.
#[async_trait]
pub trait TransitionSink: Send + Sync {
    /// Persists the record as a single atomic unit.
    ///
    /// # Errors
    ///
    /// Returns a repository error when any part of the unit cannot be
    /// written; in that case none of it may be.
    async fn apply(&self, record: TransitionRecord) -> QuestRepositoryResult<()>;
}
