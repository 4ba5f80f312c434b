//! Conversation-state persistence port.
//!
//! Wizard turns may arrive arbitrarily far apart and be served by
//! different process instances, so state is persisted after every step
//! rather than held in process memory.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::quest::domain::OwnerId;
use crate::wizard::domain::ConversationState;

/// Result type for conversation-state operations.
pub type WizardStateResult<T> = Result<T, WizardStateError>;

/// Errors returned by conversation-state store implementations.
#[derive(Debug, Clone, Error)]
pub enum WizardStateError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// Stored state could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl WizardStateError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Persistence contract for per-user conversation state.
#[async_trait]
pub trait ConversationStateRepository: Send + Sync {
    /// Loads the owner's active conversation state.
    ///
    /// Returns `None` when no flow is active.
    async fn load(&self, owner: &OwnerId) -> WizardStateResult<Option<ConversationState>>;

    /// Persists the owner's conversation state, replacing any previous
    /// one.
    async fn save(&self, state: &ConversationState) -> WizardStateResult<()>;

    /// Clears the owner's conversation state.
    ///
    /// Clearing an absent state is not an error.
    async fn clear(&self, owner: &OwnerId) -> WizardStateResult<()>;
}
