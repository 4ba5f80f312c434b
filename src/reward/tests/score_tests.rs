//! Scoring function tests, including the worked examples from the
//! product scoring tables.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;

use crate::reward::{
    Category, DifficultyTier, DoneScoreInput, Horizon, Mood, OrganizeScoreInput, capture_score,
    done_score, evaluate_score, habit_score, mood_delta, organize_score, priority_tag_score,
};

fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap()
}

fn done_input(organize: i64, completed_at: DateTime<Utc>) -> DoneScoreInput {
    DoneScoreInput {
        organize_score: organize,
        completed_at,
        deadline: None,
        mental_block: false,
        actual_minutes: None,
        estimate_minutes: None,
    }
}

#[rstest]
#[case(false, 5)]
#[case(true, 8)]
fn capture_score_adds_link_bonus(#[case] has_link: bool, #[case] expected: i64) {
    assert_eq!(capture_score(has_link), expected);
}

#[rstest]
#[case("IiCUp", 3)]
#[case("iicup", 0)]
#[case("IICUP", 5)]
#[case("", 0)]
#[case("12-!@", 0)]
#[case("IICUPIICUP", 5)]
fn priority_tag_score_counts_uppercase_in_first_five(
    #[case] tag_string: &str,
    #[case] expected: u32,
) {
    assert_eq!(priority_tag_score(tag_string), expected);
}

#[rstest]
fn organize_score_combines_all_components() {
    // 10 * 2.0 (main quest) + 5 (today) + 2 * 3 highs + 2 goal + 2
    // deadline + 1 estimate - 2 block = 34.
    let input = OrganizeScoreInput {
        category: Category::MainQuest,
        horizon: Horizon::Today,
        priority_tags: "IiCUp",
        has_goal: true,
        has_deadline: true,
        has_estimate: true,
        mental_block: true,
    };
    assert_eq!(organize_score(&input), 34);
}

#[rstest]
fn organize_score_floors_at_minimum() {
    let input = OrganizeScoreInput {
        category: Category::VoidFiller,
        horizon: Horizon::Someday,
        priority_tags: "iicup",
        has_goal: false,
        has_deadline: false,
        has_estimate: false,
        mental_block: true,
    };
    // 10 * 0.5 - 2 = 3, floored to 5.
    assert_eq!(organize_score(&input), 5);
}

#[rstest]
#[case(Horizon::Today, 5)]
#[case(Horizon::Week, 4)]
#[case(Horizon::Month, 3)]
#[case(Horizon::Quarter, 2)]
#[case(Horizon::Annum, 1)]
#[case(Horizon::Someday, 0)]
fn organize_score_applies_horizon_bonus(#[case] horizon: Horizon, #[case] expected_bonus: i64) {
    let input = OrganizeScoreInput {
        category: Category::Maintenance,
        horizon,
        priority_tags: "iicup",
        has_goal: false,
        has_deadline: false,
        has_estimate: false,
        mental_block: false,
    };
    assert_eq!(organize_score(&input), 10 + expected_bonus);
}

#[rstest]
fn done_score_two_hours_late_loses_ten_percent() {
    let deadline = reference_instant();
    let input = DoneScoreInput {
        deadline: Some(deadline),
        ..done_input(20, deadline + Duration::hours(2))
    };

    let outcome = done_score(&input);

    assert_eq!(outcome.score, 27);
    assert!(outcome.is_late);
    assert_eq!(outcome.bonus_currency, 0);
}

#[rstest]
fn done_score_late_penalty_caps_at_half() {
    let deadline = reference_instant();
    let input = DoneScoreInput {
        deadline: Some(deadline),
        ..done_input(20, deadline + Duration::hours(200))
    };

    let outcome = done_score(&input);

    assert_eq!(outcome.score, 15);
    assert!(outcome.is_late);
}

#[rstest]
fn done_score_on_time_fast_finish_awards_currency() {
    let completed_at = reference_instant();
    let input = DoneScoreInput {
        deadline: Some(completed_at + Duration::hours(1)),
        actual_minutes: Some(40),
        estimate_minutes: Some(60),
        ..done_input(20, completed_at)
    };

    let outcome = done_score(&input);

    // 30 + 10 speed bonus, ratio 40/60 <= 0.8.
    assert_eq!(outcome.score, 40);
    assert!(!outcome.is_late);
    assert_eq!(outcome.bonus_currency, 1);
}

#[rstest]
fn done_score_under_estimate_but_late_earns_no_currency() {
    let deadline = reference_instant();
    let input = DoneScoreInput {
        deadline: Some(deadline),
        actual_minutes: Some(40),
        estimate_minutes: Some(60),
        ..done_input(20, deadline + Duration::hours(2))
    };

    let outcome = done_score(&input);

    // Fast ratio loses the fast bonus when late; the smaller on-estimate
    // bonus still applies: 30 * 0.9 + 5 = 32.
    assert_eq!(outcome.score, 32);
    assert!(outcome.is_late);
    assert_eq!(outcome.bonus_currency, 0);
}

#[rstest]
fn done_score_within_estimate_earns_smaller_bonus() {
    let completed_at = reference_instant();
    let input = DoneScoreInput {
        actual_minutes: Some(55),
        estimate_minutes: Some(60),
        ..done_input(20, completed_at)
    };

    let outcome = done_score(&input);

    assert_eq!(outcome.score, 35);
    assert_eq!(outcome.bonus_currency, 0);
}

#[rstest]
fn done_score_block_completion_bonus_applies() {
    let completed_at = reference_instant();
    let input = DoneScoreInput {
        mental_block: true,
        ..done_input(20, completed_at)
    };

    assert_eq!(done_score(&input).score, 35);
}

#[rstest]
fn done_score_never_drops_below_one() {
    let deadline = reference_instant();
    let input = DoneScoreInput {
        deadline: Some(deadline),
        ..done_input(1, deadline + Duration::hours(100))
    };

    assert_eq!(done_score(&input).score, 1);
}

#[rstest]
#[case(30, 0, 6)]
#[case(30, -4, 6)]
#[case(30, 2, 12)]
#[case(30, 8, 16)]
#[case(1, -3, 1)]
fn evaluate_score_cases(#[case] done: i64, #[case] delta: i32, #[case] expected: i64) {
    assert_eq!(evaluate_score(done, delta), expected);
}

#[rstest]
#[case(DifficultyTier::Easy, 14, 6)]
#[case(DifficultyTier::Easy, 6, 5)]
#[case(DifficultyTier::Medium, 7, 11)]
#[case(DifficultyTier::Hard, 0, 15)]
#[case(DifficultyTier::Peak, 70, 40)]
#[case(DifficultyTier::Peak, 700, 40)]
fn habit_score_applies_streak_multiplier(
    #[case] tier: DifficultyTier,
    #[case] streak: u32,
    #[case] expected: i64,
) {
    assert_eq!(habit_score(tier, streak), expected);
}

#[rstest]
#[case(Some(Mood::Low), Some(Mood::Bright), 6)]
#[case(Some(Mood::Bright), Some(Mood::Low), -6)]
#[case(None, Some(Mood::Radiant), 5)]
#[case(Some(Mood::Despairing), None, 5)]
#[case(None, None, 0)]
fn mood_delta_uses_midpoint_for_unset(
    #[case] before: Option<Mood>,
    #[case] after: Option<Mood>,
    #[case] expected: i32,
) {
    assert_eq!(mood_delta(before, after), expected);
}
