//! End-to-end lifecycle journeys over the public API.

mod support;

use std::sync::Arc;

use chrono::Duration;
use eyre::ensure;
use mockable::Clock;
use rstest::{fixture, rstest};

use questline::quest::adapters::memory::InMemoryQuestStore;
use questline::quest::domain::{ActivityStatus, OrganizeDetails, OwnerId};
use questline::quest::ports::ProfileRepository;
use questline::quest::services::{
    CaptureRequest, EvaluateRequest, QuestLifecycleService, QuestQueryService,
};
use questline::reward::{Category, ExecutionType, Horizon, LifeArea, Mood};
use support::FixedClock;

struct Harness {
    store: Arc<InMemoryQuestStore>,
    clock: Arc<FixedClock>,
    lifecycle: QuestLifecycleService<InMemoryQuestStore, FixedClock>,
    queries: QuestQueryService<InMemoryQuestStore>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryQuestStore::new());
    let clock = Arc::new(FixedClock::reference());
    Harness {
        store: Arc::clone(&store),
        clock: Arc::clone(&clock),
        lifecycle: QuestLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
        queries: QuestQueryService::new(store),
    }
}

fn owner() -> OwnerId {
    OwnerId::new("user-1")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn on_time_fast_journey_sums_scores_and_awards_one_spark(
    harness: Harness,
) -> eyre::Result<()> {
    let captured = harness
        .lifecycle
        .capture(CaptureRequest::new(owner(), "Ship the quarterly report"))
        .await?;
    let id = captured.activity.id().clone();

    let mut details = OrganizeDetails::required(
        LifeArea::Vocation,
        Horizon::Week,
        ExecutionType::Focus,
        Category::MainQuest,
    );
    details.estimate_minutes = Some(60);
    details.deadline = Some(harness.clock.utc() + Duration::hours(8));
    let organized = harness.lifecycle.organize(&owner(), &id, details).await?;

    harness.lifecycle.start_focus(&owner(), &id).await?;
    harness.clock.advance(Duration::minutes(40));
    let finished = harness.lifecycle.finish_focus(&owner(), &id).await?;
    ensure!(!finished.is_late);
    ensure!(finished.bonus_currency == 1);

    let evaluated = harness
        .lifecycle
        .evaluate(EvaluateRequest {
            owner: &owner(),
            activity_id: &id,
            pre_mood: Some(Mood::Restless),
            post_mood: Mood::Bright,
        })
        .await?;

    let expected = captured.score_delta
        + organized.score_delta
        + finished.score_delta
        + evaluated.score_delta;
    ensure!(evaluated.activity.total_score() == expected);

    let summary = harness.queries.summary(&owner()).await?;
    ensure!(summary.total_score == expected);
    ensure!(summary.bonus_currency == 1);
    ensure!(summary.counts.complete == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_the_deadline_costs_vitality(harness: Harness) -> eyre::Result<()> {
    let captured = harness
        .lifecycle
        .capture(CaptureRequest::new(owner(), "Renew the insurance"))
        .await?;
    let id = captured.activity.id().clone();

    let mut details = OrganizeDetails::required(
        LifeArea::Financial,
        Horizon::Today,
        ExecutionType::Errand,
        Category::Maintenance,
    );
    details.deadline = Some(harness.clock.utc() + Duration::hours(1));
    harness.lifecycle.organize(&owner(), &id, details).await?;
    harness.lifecycle.start_focus(&owner(), &id).await?;
    harness.clock.advance(Duration::hours(3));

    let finished = harness.lifecycle.finish_focus(&owner(), &id).await?;

    ensure!(finished.is_late);
    ensure!(finished.activity.status() == ActivityStatus::CompleteLate);
    ensure!(finished.vitality == 90);

    let profile = harness
        .store
        .profile(&owner())
        .await?
        .ok_or_else(|| eyre::eyre!("profile should exist"))?;
    ensure!(profile.vitality() == 90);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn captures_allocate_a_monotone_id_sequence(harness: Harness) -> eyre::Result<()> {
    for expected in ["ACT-0001", "ACT-0002", "ACT-0003", "ACT-0004", "ACT-0005"] {
        let outcome = harness
            .lifecycle
            .capture(CaptureRequest::new(owner(), format!("item {expected}")))
            .await?;
        ensure!(outcome.activity.id().as_str() == expected);
    }
    Ok(())
}
