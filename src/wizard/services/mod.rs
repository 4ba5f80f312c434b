//! Application services for the conversation wizard.

mod engine;
mod reminders;
mod router;

pub use engine::{WizardEngine, WizardEngineError, WizardEngineResult};
pub use reminders::{ReminderService, SweepOutcome};
pub use router::EventRouter;
