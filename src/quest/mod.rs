//! Quest lifecycle management for Questline.
//!
//! This context owns the tracked entities (activities, goals, habits,
//! focus sessions, and the per-user profile) and the four-stage
//! lifecycle every activity moves through. Each scoring transition
//! computes its reward through [`crate::reward`] and persists the item
//! together with the owner's totals as one atomic unit. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
