//! Transport boundary shapes.
//!
//! The core consumes inbound events and emits replies in these abstract
//! forms; rendering them to any particular wire format is the
//! transport's concern.

use serde::{Deserialize, Serialize};

use crate::quest::domain::OwnerId;

/// One inbound event from the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Free text typed by the user.
    Text {
        /// Sending user.
        owner: OwnerId,
        /// The typed text.
        content: String,
    },
    /// A discrete labeled choice the user selected.
    Choice {
        /// Sending user.
        owner: OwnerId,
        /// The selected choice value.
        value: String,
    },
}

impl InboundEvent {
    /// Creates a free-text event.
    pub fn text(owner: OwnerId, content: impl Into<String>) -> Self {
        Self::Text {
            owner,
            content: content.into(),
        }
    }

    /// Creates a discrete-choice event.
    pub fn choice(owner: OwnerId, value: impl Into<String>) -> Self {
        Self::Choice {
            owner,
            value: value.into(),
        }
    }

    /// Returns the sending user.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        match self {
            Self::Text { owner, .. } | Self::Choice { owner, .. } => owner,
        }
    }

    /// Returns the textual payload, whichever kind the event is.
    #[must_use]
    pub fn payload(&self) -> &str {
        match self {
            Self::Text { content, .. } => content,
            Self::Choice { value, .. } => value,
        }
    }
}

/// One selectable option offered with a choice reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value delivered back when the option is selected.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Creates an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One outbound reply for the transport to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// A rendered message.
    Message {
        /// The message text.
        text: String,
    },
    /// A prompt with a set of labeled choices.
    Choices {
        /// The prompt text.
        text: String,
        /// The offered options.
        options: Vec<ChoiceOption>,
    },
}

impl Reply {
    /// Creates a plain message reply.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// Creates a choice-prompt reply.
    pub fn choices(text: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self::Choices {
            text: text.into(),
            options,
        }
    }

    /// Returns the reply text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message { text } | Self::Choices { text, .. } => text,
        }
    }
}
