//! Identifier allocation tests.

use rstest::rstest;

use crate::quest::domain::{EntityId, EntityKind, next_identifier};

fn ids(raw: &[&str]) -> Vec<EntityId> {
    raw.iter().map(|value| EntityId::new(*value)).collect()
}

#[rstest]
fn first_allocation_is_one_zero_padded() {
    let id = next_identifier(EntityKind::Activity, &[]);
    assert_eq!(id.as_str(), "ACT-0001");
}

#[rstest]
#[case(EntityKind::Activity, "ACT-0001")]
#[case(EntityKind::Goal, "GOAL-0001")]
#[case(EntityKind::Habit, "HAB-0001")]
fn prefix_follows_entity_kind(#[case] kind: EntityKind, #[case] expected: &str) {
    assert_eq!(next_identifier(kind, &[]).as_str(), expected);
}

#[rstest]
fn allocation_is_one_greater_than_the_maximum() {
    let existing = ids(&["ACT-0001", "ACT-0007", "ACT-0003"]);
    let id = next_identifier(EntityKind::Activity, existing.iter());
    assert_eq!(id.as_str(), "ACT-0008");
}

#[rstest]
fn gaps_from_deleted_entities_never_cause_reuse() {
    // 0002 and 0004 deleted; the next id still advances past the max.
    let existing = ids(&["ACT-0001", "ACT-0003", "ACT-0005"]);
    let id = next_identifier(EntityKind::Activity, existing.iter());
    assert_eq!(id.as_str(), "ACT-0006");
}

#[rstest]
#[case("ACT-abcd")]
#[case("ACT-")]
#[case("malformed")]
fn malformed_suffixes_read_as_zero(#[case] bad: &str) {
    let existing = ids(&[bad]);
    let id = next_identifier(EntityKind::Activity, existing.iter());
    assert_eq!(id.as_str(), "ACT-0001");
}

#[rstest]
fn sequential_allocations_never_duplicate() {
    let mut existing: Vec<EntityId> = Vec::new();
    let mut previous_max = 0;
    for _ in 0..50 {
        let id = next_identifier(EntityKind::Goal, existing.iter());
        assert_eq!(id.numeric_suffix(), previous_max + 1);
        assert!(existing.iter().all(|seen| seen != &id));
        previous_max = id.numeric_suffix();
        existing.push(id);
    }
}

#[rstest]
fn suffix_grows_past_four_digits_without_truncation() {
    let existing = ids(&["ACT-9999"]);
    let id = next_identifier(EntityKind::Activity, existing.iter());
    assert_eq!(id.as_str(), "ACT-10000");
    assert_eq!(id.numeric_suffix(), 10_000);
}
