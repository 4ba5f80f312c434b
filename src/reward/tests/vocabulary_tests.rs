//! Vocabulary parsing and scoring-accessor tests.

use rstest::rstest;

use crate::reward::{Category, DifficultyTier, ExecutionType, Horizon, LifeArea, Mood};

#[rstest]
fn life_area_round_trips_canonical_labels() {
    for area in LifeArea::ALL {
        assert_eq!(LifeArea::try_from(area.as_str()), Ok(area));
    }
}

#[rstest]
fn parsing_is_case_and_whitespace_tolerant() {
    assert_eq!(LifeArea::try_from("  Physical "), Ok(LifeArea::Physical));
    assert_eq!(Horizon::try_from("WEEK"), Ok(Horizon::Week));
    assert_eq!(Category::try_from("Main_Quest"), Ok(Category::MainQuest));
    assert_eq!(DifficultyTier::try_from(" peak"), Ok(DifficultyTier::Peak));
    assert_eq!(ExecutionType::try_from("Focus"), Ok(ExecutionType::Focus));
    assert_eq!(Mood::try_from("Radiant"), Ok(Mood::Radiant));
}

#[rstest]
fn unknown_labels_are_rejected() {
    assert!(LifeArea::try_from("astral").is_err());
    assert!(Horizon::try_from("decade").is_err());
    assert!(Category::try_from("epic").is_err());
    assert!(DifficultyTier::try_from("legendary").is_err());
    assert!(ExecutionType::try_from("teleport").is_err());
    assert!(Mood::try_from("quantum").is_err());
}

#[rstest]
fn category_multipliers_run_from_double_to_half() {
    let multipliers: Vec<f64> = Category::ALL.iter().map(|c| c.multiplier()).collect();
    assert_eq!(multipliers, vec![2.0, 1.5, 1.0, 0.8, 0.5]);
}

#[rstest]
fn difficulty_bases_increase_by_tier() {
    let bases: Vec<i64> = DifficultyTier::ALL.iter().map(|t| t.base_score()).collect();
    assert_eq!(bases, vec![5, 10, 15, 20]);
}

#[rstest]
fn mood_scale_covers_eleven_points_in_order() {
    let values: Vec<i32> = Mood::ALL.iter().map(|m| m.scale_value()).collect();
    assert_eq!(values, (0..=10).collect::<Vec<i32>>());
}

#[rstest]
fn horizon_bonus_shrinks_with_distance() {
    let bonuses: Vec<i64> = Horizon::ALL.iter().map(|h| h.urgency_bonus()).collect();
    assert_eq!(bonuses, vec![5, 4, 3, 2, 1, 0]);
}
