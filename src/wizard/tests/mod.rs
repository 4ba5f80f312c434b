//! Unit tests for the conversation wizard.

mod engine_tests;
mod flow_tests;
mod reminder_tests;
