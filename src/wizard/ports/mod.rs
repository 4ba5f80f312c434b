//! Port contracts for the conversation wizard.

pub mod state;

pub use state::{ConversationStateRepository, WizardStateError, WizardStateResult};
