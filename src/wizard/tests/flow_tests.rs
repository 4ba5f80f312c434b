//! Flow-advance and parsing tests, plus persistence round-trips.

use rstest::rstest;

use crate::quest::domain::OwnerId;
use crate::reward::{Category, Horizon, LifeArea};
use crate::test_support::FixedClock;
use crate::wizard::domain::{
    AreaReflection, ConversationState, Flow, GuidedOnboarding, GuidedProgress, GuidedStep,
    ReflectionPrompt, StepFingerprint, WizardValidationError, derive_goal_seeds,
    parse_goal_lines, parse_goal_selection, parse_interval, parse_tier_variants,
};

fn reflection(area: LifeArea, ideal: &str, obstacle: &str) -> AreaReflection {
    AreaReflection {
        area,
        ideal: ideal.to_owned(),
        current: "somewhere in the middle".to_owned(),
        obstacle: obstacle.to_owned(),
    }
}

#[rstest]
fn guided_flow_walks_all_six_areas_in_order() {
    let mut guided = GuidedOnboarding::new();
    assert_eq!(guided.current_area(), Some(LifeArea::Physical));

    let mut last = GuidedProgress::Continue;
    for round in 0..18 {
        last = guided
            .record_reflection(&format!("answer {round}"))
            .expect("non-blank answers should record");
    }

    assert_eq!(last, GuidedProgress::AwaitingInterval);
    assert_eq!(guided.step, GuidedStep::IntervalSelection);
    assert_eq!(guided.completed.len(), 6);
    let areas: Vec<LifeArea> = guided.completed.iter().map(|r| r.area).collect();
    assert_eq!(areas, LifeArea::ALL.to_vec());
}

#[rstest]
fn guided_flow_rejects_blank_answers_without_advancing() {
    let mut guided = GuidedOnboarding::new();

    let result = guided.record_reflection("   ");

    assert_eq!(result, Err(WizardValidationError::BlankAnswer));
    assert_eq!(
        guided.step,
        GuidedStep::Reflection {
            area_index: 0,
            prompt: ReflectionPrompt::Ideal,
        }
    );
}

#[rstest]
fn guided_partial_answers_ride_along_with_the_step() {
    let mut guided = GuidedOnboarding::new();
    guided
        .record_reflection("strong and rested")
        .expect("ideal should record");

    assert_eq!(
        guided.step,
        GuidedStep::Reflection {
            area_index: 0,
            prompt: ReflectionPrompt::Current {
                ideal: "strong and rested".to_owned(),
            },
        }
    );
}

#[rstest]
fn goal_seeds_need_substantive_ideals() {
    let reflections = vec![
        reflection(LifeArea::Physical, "run a marathon", "time"),
        reflection(LifeArea::Mind, "ok", "time"),
    ];

    let seeds = derive_goal_seeds(&reflections);

    assert_eq!(seeds.len(), 1);
    assert_eq!(
        seeds.first().map(|s| (s.title.as_str(), s.area)),
        Some(("run a marathon", LifeArea::Physical))
    );
    assert_eq!(seeds.first().map(|s| s.horizon), Some(Horizon::Annum));
    assert_eq!(seeds.first().map(|s| s.category), Some(Category::MainQuest));
}

#[rstest]
fn long_obstacles_seed_an_extra_goal() {
    let obstacle = "I keep saying yes to every meeting and never protect mornings";
    let reflections = vec![reflection(LifeArea::Vocation, "deep, focused work", obstacle)];

    let seeds = derive_goal_seeds(&reflections);

    assert_eq!(seeds.len(), 2);
    assert_eq!(
        seeds.get(1).map(|s| s.title.clone()),
        Some(format!("Overcome: {obstacle}"))
    );
    assert_eq!(seeds.get(1).map(|s| s.category), Some(Category::SideQuest));
}

#[rstest]
fn goal_lines_parse_areas_titles_and_skips() {
    let text = "physical: run three times a week\nmind:\nSocial: call my parents";

    let lines = parse_goal_lines(text).expect("well-formed lines should parse");

    assert_eq!(lines.len(), 3);
    assert_eq!(lines.first().map(|l| l.area), Some(LifeArea::Physical));
    assert_eq!(lines.get(1).and_then(|l| l.title.clone()), None);
    assert_eq!(
        lines.get(2).and_then(|l| l.title.clone()),
        Some("call my parents".to_owned())
    );
}

#[rstest]
fn goal_lines_reject_malformed_and_unknown_areas() {
    assert_eq!(
        parse_goal_lines("just some words"),
        Err(WizardValidationError::MalformedGoalLine(
            "just some words".to_owned()
        ))
    );
    assert_eq!(
        parse_goal_lines("astral: levitate"),
        Err(WizardValidationError::UnknownLifeArea("astral".to_owned()))
    );
    assert_eq!(parse_goal_lines("  \n \n"), Err(WizardValidationError::BlankAnswer));
}

#[rstest]
#[case("30", Some(30))]
#[case(" 60 ", Some(60))]
#[case("off", None)]
#[case("OFF", None)]
fn intervals_parse_minutes_and_off(#[case] raw: &str, #[case] expected: Option<u32>) {
    assert_eq!(parse_interval(raw), Ok(expected));
}

#[rstest]
#[case("soonish")]
#[case("0")]
#[case("-5")]
fn unusable_intervals_are_rejected(#[case] raw: &str) {
    assert_eq!(
        parse_interval(raw),
        Err(WizardValidationError::UnparsableInterval(raw.to_owned()))
    );
}

#[rstest]
#[case("skip", 3, Ok(None))]
#[case("2", 3, Ok(Some(1)))]
#[case("3", 3, Ok(Some(2)))]
fn goal_selection_accepts_skip_and_one_based_numbers(
    #[case] raw: &str,
    #[case] available: usize,
    #[case] expected: Result<Option<usize>, WizardValidationError>,
) {
    assert_eq!(parse_goal_selection(raw, available), expected);
}

#[rstest]
fn goal_selection_rejects_junk_and_out_of_range() {
    assert_eq!(
        parse_goal_selection("the first one", 3),
        Err(WizardValidationError::UnparsableGoalIndex(
            "the first one".to_owned()
        ))
    );
    assert_eq!(
        parse_goal_selection("0", 3),
        Err(WizardValidationError::GoalIndexOutOfRange {
            index: 0,
            available: 3,
        })
    );
    assert_eq!(
        parse_goal_selection("4", 3),
        Err(WizardValidationError::GoalIndexOutOfRange {
            index: 4,
            available: 3,
        })
    );
}

#[rstest]
fn tier_variants_require_exactly_four_parts() {
    let tiers = parse_tier_variants("walk 5 min / walk 20 min / run 5k / run 10k")
        .expect("four variants should parse");
    assert_eq!(tiers.easy, "walk 5 min");
    assert_eq!(tiers.peak, "run 10k");

    assert_eq!(
        parse_tier_variants("a/b/c"),
        Err(WizardValidationError::WrongTierCount(3))
    );
    assert_eq!(
        parse_tier_variants("a/b//d"),
        Err(WizardValidationError::BlankTierVariant { position: 3 })
    );
}

#[rstest]
fn fingerprints_distinguish_step_and_payload_but_not_whitespace() {
    let owner = OwnerId::new("user-1");
    let base = StepFingerprint::compute(&owner, "organize", "life_area:ACT-0001", "mind");

    assert_eq!(
        base,
        StepFingerprint::compute(&owner, "organize", "life_area:ACT-0001", "  mind  ")
    );
    assert_ne!(
        base,
        StepFingerprint::compute(&owner, "organize", "life_area:ACT-0001", "social")
    );
    assert_ne!(
        base,
        StepFingerprint::compute(&owner, "organize", "horizon:ACT-0001", "mind")
    );
    assert_ne!(
        base,
        StepFingerprint::compute(&OwnerId::new("user-2"), "organize", "life_area:ACT-0001", "mind")
    );
}

#[rstest]
fn conversation_state_round_trips_through_json() {
    let clock = FixedClock::reference();
    let mut guided = GuidedOnboarding::new();
    guided
        .record_reflection("strong and rested")
        .expect("ideal should record");
    let state = ConversationState::new(
        OwnerId::new("user-1"),
        Flow::GuidedOnboarding(guided),
        &clock,
    );

    let encoded = serde_json::to_string(&state).expect("state should serialize");
    let decoded: ConversationState =
        serde_json::from_str(&encoded).expect("state should deserialize");

    assert_eq!(decoded, state);
}
