//! Step fingerprints for duplicate-submission suppression.
//!
//! A retried inbound event carries the same owner, flow, step, and
//! payload as the original; hashing the four identifies it without
//! storing raw answers alongside the conversation state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::quest::domain::OwnerId;

/// SHA-256 fingerprint of one applied wizard answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepFingerprint(String);

impl StepFingerprint {
    /// Computes the fingerprint of an answer at a step.
    ///
    /// The payload is trimmed first, so retries differing only in
    /// surrounding whitespace still match.
    #[must_use]
    pub fn compute(owner: &OwnerId, flow_tag: &str, step_tag: &str, payload: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(owner.as_str().as_bytes());
        hasher.update([0x1f]);
        hasher.update(flow_tag.as_bytes());
        hasher.update([0x1f]);
        hasher.update(step_tag.as_bytes());
        hasher.update([0x1f]);
        hasher.update(payload.trim().as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Returns the fingerprint as hex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
