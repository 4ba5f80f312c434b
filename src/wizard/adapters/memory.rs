//! In-memory conversation-state store for wizard tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::quest::domain::OwnerId;
use crate::wizard::domain::ConversationState;
use crate::wizard::ports::{ConversationStateRepository, WizardStateError, WizardStateResult};

/// Thread-safe in-memory conversation-state store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    state: Arc<RwLock<HashMap<OwnerId, ConversationState>>>,
}

impl InMemoryConversationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStateRepository for InMemoryConversationStore {
    async fn load(&self, owner: &OwnerId) -> WizardStateResult<Option<ConversationState>> {
        let state = self.state.read().map_err(|err| {
            WizardStateError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(owner).cloned())
    }

    async fn save(&self, conversation: &ConversationState) -> WizardStateResult<()> {
        let mut state = self.state.write().map_err(|err| {
            WizardStateError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert(conversation.owner.clone(), conversation.clone());
        Ok(())
    }

    async fn clear(&self, owner: &OwnerId) -> WizardStateResult<()> {
        let mut state = self.state.write().map_err(|err| {
            WizardStateError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.remove(owner);
        Ok(())
    }
}
