//! Domain model for the conversation wizard.
//!
//! Flows, steps, transport shapes, and validation live here; the
//! engine in [`crate::wizard::services`] drives them against the
//! lifecycle services.

mod error;
mod event;
mod fingerprint;
mod flow;

pub use error::WizardValidationError;
pub use event::{ChoiceOption, InboundEvent, Reply};
pub use fingerprint::StepFingerprint;
pub use flow::{
    AreaReflection, ConversationState, Flow, GoalLine, GoalSeed, GuidedOnboarding,
    GuidedProgress, GuidedStep, HabitCreation, HabitStep, ManualOnboarding, ManualStep,
    OrganizeDialog, OrganizeStep, PromptPhase, ReflectionPrompt, derive_goal_seeds,
    parse_goal_lines, parse_goal_selection, parse_interval, parse_tier_variants,
};
