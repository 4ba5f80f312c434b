//! Validation errors for wizard input.
//!
//! Every variant corresponds to an input the user can correct; the
//! engine answers them by restating the current prompt rather than
//! advancing or silently ignoring the event.

use thiserror::Error;

/// Malformed or out-of-range wizard input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardValidationError {
    /// A free-text answer was empty after trimming.
    #[error("that answer is empty; write a few words")]
    BlankAnswer,

    /// A goal selection was neither a number nor `skip`.
    #[error("could not read a goal number from '{0}'; reply with a number or 'skip'")]
    UnparsableGoalIndex(String),

    /// A goal number fell outside the listed range.
    #[error("goal number {index} is out of range; {available} goals are listed")]
    GoalIndexOutOfRange {
        /// The selected number.
        index: usize,
        /// How many goals were offered.
        available: usize,
    },

    /// A choice value matched none of the offered options.
    #[error("'{value}' is not one of the offered {expected} options")]
    UnknownChoice {
        /// What was being chosen.
        expected: &'static str,
        /// The unmatched value.
        value: String,
    },

    /// A manual-onboarding line was not in `life-area: goal` form.
    #[error("line '{0}' is not in 'life-area: goal' form")]
    MalformedGoalLine(String),

    /// A manual-onboarding line named an unknown life area.
    #[error("unknown life area '{0}'; use one of the six fixed areas")]
    UnknownLifeArea(String),

    /// Difficulty variants did not split into exactly four parts.
    #[error("expected four '/'-separated difficulty variants, found {0}")]
    WrongTierCount(usize),

    /// A difficulty variant was blank.
    #[error("difficulty variant {position} is blank")]
    BlankTierVariant {
        /// One-based position of the blank variant.
        position: usize,
    },

    /// A reminder-interval selection was unusable.
    #[error("could not read a reminder interval from '{0}'; pick one of the offered options")]
    UnparsableInterval(String),
}
