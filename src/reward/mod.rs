//! Reward engine: pure scoring for the quest lifecycle.
//!
//! Each lifecycle stage (capture, organize, done, evaluate) and each
//! habit session has a scoring function here. All of them are stateless
//! and deterministic: the lifecycle service feeds them declarative inputs
//! and persists whatever they return. This module also owns the scoring
//! vocabulary (life areas, horizons, categories, execution types,
//! difficulty tiers, moods) and the five-dimension priority-tag encoding.

mod score;
mod tags;
mod vocabulary;

pub use score::{
    DoneScoreInput, DoneScoreOutcome, OrganizeScoreInput, capture_score, done_score,
    evaluate_score, habit_score, mood_delta, organize_score, priority_tag_score,
};
pub use tags::{
    ParsePriorityDimensionError, ParsePriorityTagsError, PriorityDimension, PriorityTags,
};
pub use vocabulary::{
    Category, DifficultyTier, ExecutionType, Horizon, LifeArea, Mood, ParseLabelError,
};

#[cfg(test)]
mod tests;
