//! Wizard engine tests over the in-memory adapters.

use std::sync::Arc;

use eyre::{bail, ensure};
use rstest::{fixture, rstest};

use crate::quest::adapters::memory::InMemoryQuestStore;
use crate::quest::domain::{ActivityStatus, OwnerId};
use crate::quest::ports::{
    ActivityRepository, GoalRepository, HabitRepository, ProfileRepository,
};
use crate::quest::services::{CaptureRequest, CreateGoalRequest, QuestLifecycleService};
use crate::reward::{Category, Horizon, LifeArea};
use crate::test_support::FixedClock;
use crate::wizard::adapters::InMemoryConversationStore;
use crate::wizard::domain::{InboundEvent, Reply};
use crate::wizard::services::WizardEngine;

type TestEngine = WizardEngine<InMemoryConversationStore, InMemoryQuestStore, FixedClock>;

struct Harness {
    states: Arc<InMemoryConversationStore>,
    store: Arc<InMemoryQuestStore>,
    clock: Arc<FixedClock>,
    engine: TestEngine,
}

#[fixture]
fn harness() -> Harness {
    let states = Arc::new(InMemoryConversationStore::new());
    let store = Arc::new(InMemoryQuestStore::new());
    let clock = Arc::new(FixedClock::reference());
    let engine = WizardEngine::new(
        Arc::clone(&states),
        Arc::clone(&store),
        Arc::clone(&clock),
    );
    Harness {
        states,
        store,
        clock,
        engine,
    }
}

fn owner() -> OwnerId {
    OwnerId::new("user-1")
}

fn lifecycle_service(harness: &Harness) -> QuestLifecycleService<InMemoryQuestStore, FixedClock> {
    QuestLifecycleService::new(Arc::clone(&harness.store), Arc::clone(&harness.clock))
}

async fn answer(harness: &Harness, text: &str) -> eyre::Result<Vec<Reply>> {
    let handled = harness
        .engine
        .handle(&InboundEvent::text(owner(), text))
        .await?;
    handled.ok_or_else(|| eyre::eyre!("expected an active flow"))
}

async fn choose(harness: &Harness, value: &str) -> eyre::Result<Vec<Reply>> {
    let handled = harness
        .engine
        .handle(&InboundEvent::choice(owner(), value))
        .await?;
    handled.ok_or_else(|| eyre::eyre!("expected an active flow"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn events_without_an_active_flow_are_not_consumed(harness: Harness) -> eyre::Result<()> {
    let handled = harness
        .engine
        .handle(&InboundEvent::text(owner(), "buy milk"))
        .await?;

    ensure!(handled.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guided_onboarding_derives_goals_and_sets_interval(harness: Harness) -> eyre::Result<()> {
    let started = harness.engine.start_guided_onboarding(&owner()).await?;
    ensure!(started.len() == 2, "intro and first prompt expected");

    // Six areas, three prompts each. One substantive ideal seeds a goal;
    // the rest stay under the threshold.
    for area_index in 0..6 {
        let ideal = if area_index == 0 { "run a marathon next spring" } else { "ok" };
        answer(&harness, ideal).await?;
        answer(&harness, "mixed").await?;
        answer(&harness, "time").await?;
    }

    let done = choose(&harness, "60").await?;
    ensure!(done.len() == 1);
    ensure!(done.first().map(Reply::text).unwrap_or_default().contains("1 goals declared"));

    let goals = harness.store.goals(&owner()).await?;
    ensure!(goals.len() == 1);
    ensure!(goals.first().map(|g| g.life_area) == Some(LifeArea::Physical));

    let profile = harness
        .store
        .profile(&owner())
        .await?
        .ok_or_else(|| eyre::eyre!("profile should exist"))?;
    ensure!(profile.settings().interval_minutes == Some(60));

    ensure!(!harness.engine.has_active_flow(&owner()).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_guided_answer_reprompts_without_advancing(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_guided_onboarding(&owner()).await?;

    let replies = answer(&harness, "   ").await?;

    ensure!(replies.len() == 2, "error notice plus restated prompt");
    ensure!(
        replies
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("empty")
    );

    // The step did not advance: the next real answer is still the first
    // area's ideal state.
    let after = answer(&harness, "strong and rested").await?;
    ensure!(
        after
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("actually going")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_submissions_are_suppressed_by_fingerprint(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_guided_onboarding(&owner()).await?;

    let first = answer(&harness, "strong and rested").await?;
    ensure!(!first.is_empty());

    // The transport retries the same event; it must not double-apply or
    // re-prompt.
    let retried = answer(&harness, "strong and rested").await?;
    ensure!(retried.is_empty());

    // A different answer at the new step still lands normally.
    let next = answer(&harness, "tired most days").await?;
    ensure!(!next.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn starting_twice_does_not_reissue_the_prompt(harness: Harness) -> eyre::Result<()> {
    let first = harness.engine.start_guided_onboarding(&owner()).await?;
    ensure!(!first.is_empty());

    let second = harness.engine.start_guided_onboarding(&owner()).await?;
    ensure!(second.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interrupted_flow_resumes_from_the_persisted_step(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_guided_onboarding(&owner()).await?;
    answer(&harness, "strong and rested").await?;

    // A different engine instance over the same stores, as after a
    // process restart.
    let resumed_engine = WizardEngine::new(
        Arc::clone(&harness.states),
        Arc::clone(&harness.store),
        Arc::clone(&harness.clock),
    );
    let prompt = resumed_engine.resume_prompt(&owner()).await?;
    ensure!(
        prompt
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("actually going"),
        "resume must restate the persisted step, not the first one"
    );

    let handled = resumed_engine
        .handle(&InboundEvent::text(owner(), "tired most days"))
        .await?;
    ensure!(handled.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_onboarding_counts_declared_and_skipped(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_manual_onboarding(&owner()).await?;

    let replies = answer(
        &harness,
        "physical: run three times a week\nmind:\nsocial: call my parents",
    )
    .await?;
    ensure!(
        replies
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("Declared 2 goals, skipped 1 areas")
    );

    choose(&harness, "off").await?;

    let goals = harness.store.goals(&owner()).await?;
    ensure!(goals.len() == 2);
    ensure!(!harness.engine.has_active_flow(&owner()).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_onboarding_reprompts_on_malformed_lines(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_manual_onboarding(&owner()).await?;

    let replies = answer(&harness, "no colon here").await?;

    ensure!(replies.len() == 2);
    ensure!(harness.engine.has_active_flow(&owner()).await?);
    ensure!(harness.store.goals(&owner()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn organize_dialog_walks_the_queue_to_completion(harness: Harness) -> eyre::Result<()> {
    let lifecycle = lifecycle_service(&harness);
    let first = lifecycle
        .capture(CaptureRequest::new(owner(), "Draft the essay"))
        .await?;
    let second = lifecycle
        .capture(CaptureRequest::new(owner(), "Book the dentist"))
        .await?;
    let goal = lifecycle
        .create_goal(CreateGoalRequest::new(
            owner(),
            "Publish twelve essays",
            LifeArea::Mind,
            Horizon::Annum,
            Category::MainQuest,
        ))
        .await?;

    let started = harness.engine.start_organize(&owner()).await?;
    ensure!(
        started
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("Draft the essay")
    );

    // First item: goal 1, urgency high, mind / today / focus / main quest.
    choose(&harness, "1").await?;
    choose(&harness, "urgency").await?;
    let committed = choose(&harness, "done").await?;
    ensure!(
        committed
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("life area")
    );
    choose(&harness, "mind").await?;
    choose(&harness, "today").await?;
    choose(&harness, "focus").await?;
    let after_first = choose(&harness, "main_quest").await?;
    ensure!(
        after_first
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("organized (+")
    );
    ensure!(
        after_first
            .iter()
            .any(|reply| reply.text().contains("Book the dentist")),
        "the next queued item is introduced"
    );

    // Second item: no goal, nothing toggled.
    choose(&harness, "skip").await?;
    choose(&harness, "done").await?;
    choose(&harness, "physical").await?;
    choose(&harness, "week").await?;
    choose(&harness, "errand").await?;
    let finished = choose(&harness, "maintenance").await?;
    ensure!(
        finished
            .iter()
            .any(|reply| reply.text().contains("every captured item"))
    );
    ensure!(!harness.engine.has_active_flow(&owner()).await?);

    let stored_first = harness
        .store
        .activity(&owner(), first.activity.id())
        .await?
        .ok_or_else(|| eyre::eyre!("first activity should exist"))?;
    ensure!(stored_first.status() == ActivityStatus::Organized);
    let Some(details) = stored_first.organize_details() else {
        bail!("organize fields should be recorded");
    };
    ensure!(details.goal_id.as_ref() == Some(&goal.id));
    ensure!(details.priority_tags.urgency);
    ensure!(!details.priority_tags.impact);

    let stored_second = harness
        .store
        .activity(&owner(), second.activity.id())
        .await?
        .ok_or_else(|| eyre::eyre!("second activity should exist"))?;
    ensure!(stored_second.status() == ActivityStatus::Organized);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn organize_with_nothing_captured_starts_no_flow(harness: Harness) -> eyre::Result<()> {
    let replies = harness.engine.start_organize(&owner()).await?;

    ensure!(
        replies
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("Nothing captured")
    );
    ensure!(!harness.engine.has_active_flow(&owner()).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unparsable_goal_selection_reprompts(harness: Harness) -> eyre::Result<()> {
    let lifecycle = lifecycle_service(&harness);
    lifecycle
        .capture(CaptureRequest::new(owner(), "Mystery item"))
        .await?;
    harness.engine.start_organize(&owner()).await?;

    let replies = choose(&harness, "the first one").await?;

    ensure!(replies.len() == 2, "error notice plus restated prompt");
    ensure!(
        replies
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("goal number")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn habit_creation_collects_name_area_and_variants(harness: Harness) -> eyre::Result<()> {
    harness.engine.start_habit_creation(&owner()).await?;

    answer(&harness, "Morning pages").await?;
    choose(&harness, "mind").await?;

    // A wrong variant count re-prompts before the flow completes.
    let rejected = answer(&harness, "one/two/three").await?;
    ensure!(rejected.len() == 2);

    let created = answer(&harness, "one line / half a page / a page / three pages").await?;
    ensure!(
        created
            .first()
            .map(Reply::text)
            .unwrap_or_default()
            .contains("HAB-0001")
    );

    let habits = harness.store.habits(&owner()).await?;
    ensure!(habits.len() == 1);
    let Some(habit) = habits.first() else {
        bail!("habit should exist");
    };
    ensure!(habit.name == "Morning pages");
    ensure!(habit.life_area == LifeArea::Mind);
    ensure!(habit.tiers.peak == "three pages");
    ensure!(!harness.engine.has_active_flow(&owner()).await?);
    Ok(())
}
