//! Application services for the quest lifecycle.

mod lifecycle;
mod queries;

pub use lifecycle::{
    CaptureOutcome, CaptureRequest, CreateGoalRequest, CreateHabitRequest, EvaluateOutcome,
    EvaluateRequest, FinishFocusOutcome, HabitLogOutcome, OrganizeOutcome, QuestLifecycleError,
    QuestLifecycleResult, QuestLifecycleService, SplitOutcome,
};
pub use queries::{QuestQueryService, StatusCounts, Summary};
