//! Conversation wizard for Questline.
//!
//! Collects the inputs lifecycle transitions require through multi-step
//! dialogs: onboarding (guided or manual), the organize dialog, and
//! habit creation. One flow is active per user at a time; its state is
//! persisted after every step because turns arrive over an
//! asynchronous transport and may be served by different process
//! instances. The module follows hexagonal architecture:
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
