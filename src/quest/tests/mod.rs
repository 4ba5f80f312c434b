//! Unit tests for the quest lifecycle.
//!
//! Tests are organised by concern: identifier allocation, domain
//! records, activity state transitions, service orchestration, and the
//! read-side queries.

mod ids_tests;
