//! Background reminder sweep.
//!
//! Walks every stored profile and emits a reminder for each user whose
//! interval has elapsed, skipping anyone with an active wizard flow so
//! prompts never interleave. One user's failure is logged and isolated;
//! it never blocks the rest of the sweep.

use std::sync::Arc;

use mockable::Clock;

use crate::quest::domain::{ActivityStatus, OwnerId, UserProfile};
use crate::quest::ports::QuestStore;
use crate::wizard::domain::Reply;
use crate::wizard::ports::ConversationStateRepository;

/// Outcome of one reminder sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Reminders to deliver, one per due user.
    pub reminders: Vec<(OwnerId, Reply)>,
    /// Users skipped because a wizard flow was active.
    pub skipped_active: usize,
    /// Users whose reminder failed and was isolated.
    pub failures: usize,
}

/// Periodic reminder service.
pub struct ReminderService<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    states: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> ReminderService<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    /// Creates a reminder service over the given stores.
    #[must_use]
    pub const fn new(states: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            states,
            store,
            clock,
        }
    }

    /// Runs one sweep over every stored profile.
    pub async fn sweep(&self) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        let profiles = match self.store.profiles().await {
            Ok(profiles) => profiles,
            Err(err) => {
                tracing::error!(error = %err, "reminder sweep could not list profiles");
                outcome.failures += 1;
                return outcome;
            }
        };
        let now = self.clock.utc();
        for profile in profiles {
            if !profile.reminder_due(now) {
                continue;
            }
            match self.remind(&profile).await {
                Ok(Some(reply)) => outcome
                    .reminders
                    .push((profile.owner().clone(), reply)),
                Ok(None) => outcome.skipped_active += 1,
                Err(err) => {
                    tracing::warn!(
                        owner = %profile.owner(),
                        error = %err,
                        "reminder failed for user; continuing sweep"
                    );
                    outcome.failures += 1;
                }
            }
        }
        outcome
    }

    /// Builds and records one user's reminder.
    ///
    /// Returns `None` when the user has an active wizard flow.
    async fn remind(
        &self,
        profile: &UserProfile,
    ) -> Result<Option<Reply>, Box<dyn std::error::Error + Send + Sync>> {
        let owner = profile.owner();
        if self.states.load(owner).await?.is_some() {
            return Ok(None);
        }
        let ready = self
            .store
            .activities_by_status(owner, ActivityStatus::Organized)
            .await?;
        let reply = if ready.is_empty() {
            Reply::message("Nothing is queued up. Capture something worth doing?")
        } else {
            Reply::message(format!(
                "{} items are ready. Start a focus session on one?",
                ready.len()
            ))
        };
        let mut stamped = profile.clone();
        stamped.mark_reminded(&*self.clock);
        self.store.upsert_profile(&stamped).await?;
        Ok(Some(reply))
    }
}
