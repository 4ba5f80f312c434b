//! Reminder sweep tests.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::ensure;
use mockall::mock;
use rstest::rstest;

use crate::quest::adapters::memory::InMemoryQuestStore;
use crate::quest::domain::{OwnerId, UserProfile};
use crate::quest::ports::ProfileRepository;
use crate::test_support::FixedClock;
use crate::wizard::adapters::InMemoryConversationStore;
use crate::wizard::domain::ConversationState;
use crate::wizard::ports::{
    ConversationStateRepository, WizardStateError, WizardStateResult,
};
use crate::wizard::services::{ReminderService, WizardEngine};

mock! {
    StateRepo {}

    #[async_trait]
    impl ConversationStateRepository for StateRepo {
        async fn load(&self, owner: &OwnerId) -> WizardStateResult<Option<ConversationState>>;
        async fn save(&self, state: &ConversationState) -> WizardStateResult<()>;
        async fn clear(&self, owner: &OwnerId) -> WizardStateResult<()>;
    }
}

async fn seeded_profile(
    store: &InMemoryQuestStore,
    clock: &FixedClock,
    owner: &str,
) -> UserProfile {
    let mut profile = UserProfile::new(OwnerId::new(owner), clock);
    profile.set_reminder_interval(Some(30));
    store
        .upsert_profile(&profile)
        .await
        .expect("profile upsert should succeed");
    profile
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_users_are_reminded_and_stamped() -> eyre::Result<()> {
    let states = Arc::new(InMemoryConversationStore::new());
    let store = Arc::new(InMemoryQuestStore::new());
    let clock = Arc::new(FixedClock::reference());
    seeded_profile(&store, &clock, "user-1").await;
    let service = ReminderService::new(
        Arc::clone(&states),
        Arc::clone(&store),
        Arc::clone(&clock),
    );

    let first = service.sweep().await;
    ensure!(first.reminders.len() == 1);
    ensure!(first.skipped_active == 0);
    ensure!(first.failures == 0);

    // Stamped: an immediate second sweep finds nobody due.
    let second = service.sweep().await;
    ensure!(second.reminders.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_with_an_active_flow_are_skipped() -> eyre::Result<()> {
    let states = Arc::new(InMemoryConversationStore::new());
    let store = Arc::new(InMemoryQuestStore::new());
    let clock = Arc::new(FixedClock::reference());
    seeded_profile(&store, &clock, "user-1").await;

    // Put the user mid-flow through the real engine.
    let engine = WizardEngine::new(
        Arc::clone(&states),
        Arc::clone(&store),
        Arc::clone(&clock),
    );
    engine
        .start_guided_onboarding(&OwnerId::new("user-1"))
        .await?;

    let service = ReminderService::new(states, store, clock);
    let outcome = service.sweep().await;

    ensure!(outcome.reminders.is_empty());
    ensure!(outcome.skipped_active == 1);
    ensure!(outcome.failures == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_failing_user_never_blocks_the_sweep() -> eyre::Result<()> {
    let store = Arc::new(InMemoryQuestStore::new());
    let clock = Arc::new(FixedClock::reference());
    seeded_profile(&store, &clock, "user-1").await;
    seeded_profile(&store, &clock, "user-2").await;

    let mut states = MockStateRepo::new();
    states.expect_load().returning(|owner| {
        if owner.as_str() == "user-1" {
            Err(WizardStateError::persistence(std::io::Error::other(
                "state shard offline",
            )))
        } else {
            Ok(None)
        }
    });
    let service = ReminderService::new(Arc::new(states), store, clock);

    let outcome = service.sweep().await;

    ensure!(outcome.failures == 1);
    ensure!(outcome.reminders.len() == 1);
    ensure!(
        outcome
            .reminders
            .first()
            .map(|(owner, _)| owner.as_str().to_owned())
            == Some("user-2".to_owned())
    );
    Ok(())
}
