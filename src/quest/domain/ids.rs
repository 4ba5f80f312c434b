//! Identifier types for the quest domain.
//!
//! Entities carry two kinds of identity: the owning user's opaque
//! [`OwnerId`] assigned by the transport, and a human-readable
//! [`EntityId`] of the form `PREFIX-NNNN` allocated sequentially per
//! (owner, entity kind).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of the owning user, as assigned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner identity from a transport-assigned value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identity as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of entity a human-readable identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Tracked activity.
    Activity,
    /// Declared goal.
    Goal,
    /// Recurring habit.
    Habit,
}

impl EntityKind {
    /// Identifier prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Activity => "ACT",
            Self::Goal => "GOAL",
            Self::Habit => "HAB",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Human-readable entity identifier of the form `PREFIX-NNNN`.
///
/// The numeric suffix is unique and monotonic per (owner, entity kind);
/// see [`next_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Reconstructs an identifier from its stored representation.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of the identifier.
    ///
    /// Malformed or non-numeric suffixes read as 0 so that a single
    /// corrupt identifier never blocks allocation.
    #[must_use]
    pub fn numeric_suffix(&self) -> u32 {
        self.0
            .rsplit_once('-')
            .map_or(0, |(_, suffix)| suffix.parse().unwrap_or(0))
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocates the next identifier for the given kind.
///
/// Scans the owner's existing identifiers of that kind, takes the
/// maximum numeric suffix, and returns `PREFIX-(max+1)` zero-padded to
/// four digits. Callers must run the scan and the subsequent insertion
/// as one atomic unit against the store; see
/// [`crate::quest::ports::TransitionSink`].
#[must_use]
pub fn next_identifier<'a>(
    kind: EntityKind,
    existing: impl IntoIterator<Item = &'a EntityId>,
) -> EntityId {
    let max_suffix = existing
        .into_iter()
        .map(EntityId::numeric_suffix)
        .max()
        .unwrap_or(0);
    EntityId(format!("{}-{:04}", kind.prefix(), max_suffix + 1))
}

/// Unique identifier for a focus-session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusSessionId(Uuid);

impl FocusSessionId {
    /// Creates a new random session identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for FocusSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FocusSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
