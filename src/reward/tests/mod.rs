//! Unit tests for the reward engine.
//!
//! Scoring functions are pure, so every case here is a direct
//! input/output table.

mod score_tests;
mod vocabulary_tests;
