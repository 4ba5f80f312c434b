//! Inbound event routing.
//!
//! An event is handed to the wizard engine when a flow is active;
//! otherwise it is a direct command: capture, a read command, or a
//! flow-starting command. Store and transport failures are logged and
//! surfaced as an opaque failure notice, never as a crash.

use std::sync::Arc;

use mockable::Clock;

use crate::quest::domain::OwnerId;
use crate::quest::ports::QuestStore;
use crate::quest::services::{
    CaptureRequest, QuestLifecycleService, QuestQueryService, Summary,
};
use crate::wizard::domain::{InboundEvent, Reply};
use crate::wizard::ports::ConversationStateRepository;

use super::engine::{WizardEngine, WizardEngineResult};

/// Routes inbound events between the wizard and direct commands.
pub struct EventRouter<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    engine: WizardEngine<R, S, C>,
    lifecycle: QuestLifecycleService<S, C>,
    queries: QuestQueryService<S>,
}

impl<R, S, C> EventRouter<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    /// Creates a router over the given stores.
    #[must_use]
    pub fn new(states: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            engine: WizardEngine::new(states, Arc::clone(&store), Arc::clone(&clock)),
            lifecycle: QuestLifecycleService::new(Arc::clone(&store), clock),
            queries: QuestQueryService::new(store),
        }
    }

    /// Returns the wizard engine backing this router.
    #[must_use]
    pub const fn engine(&self) -> &WizardEngine<R, S, C> {
        &self.engine
    }

    /// Dispatches one inbound event and returns the replies to render.
    ///
    /// Failures are logged and replaced with an opaque failure notice.
    pub async fn dispatch(&self, event: &InboundEvent) -> Vec<Reply> {
        match self.try_dispatch(event).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::error!(owner = %event.owner(), error = %err, "event dispatch failed");
                vec![Reply::message("Something went wrong; nothing was saved.")]
            }
        }
    }

    async fn try_dispatch(&self, event: &InboundEvent) -> WizardEngineResult<Vec<Reply>> {
        if let Some(replies) = self.engine.handle(event).await? {
            return Ok(replies);
        }
        match event {
            InboundEvent::Choice { .. } => Ok(vec![Reply::message(
                "No dialog is waiting for a choice right now.",
            )]),
            InboundEvent::Text { owner, content } => self.dispatch_command(owner, content).await,
        }
    }

    async fn dispatch_command(
        &self,
        owner: &OwnerId,
        content: &str,
    ) -> WizardEngineResult<Vec<Reply>> {
        let trimmed = content.trim();
        let command = trimmed.to_ascii_lowercase();
        match command.as_str() {
            "" => Ok(vec![Reply::message("Send some text to capture it.")]),
            "status" => self.status_reply(owner).await,
            "goals" => self.goals_reply(owner).await,
            "habits" => self.habits_reply(owner).await,
            "ready" => self.ready_reply(owner).await,
            "onboard" => self.engine.start_guided_onboarding(owner).await,
            "onboard manual" => self.engine.start_manual_onboarding(owner).await,
            "organize" => self.engine.start_organize(owner).await,
            "habit" => self.engine.start_habit_creation(owner).await,
            "continue" => self.engine.resume_prompt(owner).await,
            _ => self.capture_reply(owner, trimmed).await,
        }
    }

    async fn capture_reply(
        &self,
        owner: &OwnerId,
        content: &str,
    ) -> WizardEngineResult<Vec<Reply>> {
        let (text, link) = split_link(content);
        let mut request = CaptureRequest::new(owner.clone(), text);
        if let Some(link) = link {
            request = request.with_link(link);
        }
        let outcome = self.lifecycle.capture(request).await?;
        Ok(vec![Reply::message(format!(
            "Captured {} (+{}).",
            outcome.activity.id(),
            outcome.score_delta
        ))])
    }

    async fn status_reply(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        let summary = self.queries.summary(owner).await?;
        Ok(vec![Reply::message(render_summary(&summary))])
    }

    async fn goals_reply(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        let goals = self.queries.goals(owner).await?;
        if goals.is_empty() {
            return Ok(vec![Reply::message(
                "No goals yet; send 'onboard' to declare some.",
            )]);
        }
        let lines: Vec<String> = goals
            .iter()
            .map(|goal| format!("{} [{}] {}", goal.id, goal.status, goal.title))
            .collect();
        Ok(vec![Reply::message(lines.join("\n"))])
    }

    async fn habits_reply(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        let habits = self.queries.habits(owner).await?;
        if habits.is_empty() {
            return Ok(vec![Reply::message(
                "No habits yet; send 'habit' to create one.",
            )]);
        }
        let lines: Vec<String> = habits
            .iter()
            .map(|habit| {
                format!(
                    "{} {} (streak {}, best {})",
                    habit.id, habit.name, habit.streak, habit.max_streak
                )
            })
            .collect();
        Ok(vec![Reply::message(lines.join("\n"))])
    }

    async fn ready_reply(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        let ready = self.queries.ready_items(owner).await?;
        if ready.is_empty() {
            return Ok(vec![Reply::message(
                "Nothing is ready; capture something or send 'organize'.",
            )]);
        }
        let lines: Vec<String> = ready
            .iter()
            .map(|activity| format!("{} {}", activity.id(), activity.text()))
            .collect();
        Ok(vec![Reply::message(lines.join("\n"))])
    }
}

/// Splits the first http(s) token out of captured text as its link.
fn split_link(content: &str) -> (String, Option<String>) {
    let mut link = None;
    let mut words = Vec::new();
    for word in content.split_whitespace() {
        if link.is_none() && (word.starts_with("http://") || word.starts_with("https://")) {
            link = Some(word.to_owned());
        } else {
            words.push(word);
        }
    }
    if words.is_empty() {
        // A bare link still needs capture text.
        (content.trim().to_owned(), None)
    } else {
        (words.join(" "), link)
    }
}

fn render_summary(summary: &Summary) -> String {
    format!(
        "{} | score {} | vitality {} | sparks {}\ncaptured {} / ready {} / in progress {} / done {} ({} late) / abandoned {}",
        summary.rank,
        summary.total_score,
        summary.vitality,
        summary.bonus_currency,
        summary.counts.captured,
        summary.counts.organized,
        summary.counts.in_progress,
        summary.counts.complete + summary.counts.complete_late,
        summary.counts.complete_late,
        summary.counts.abandoned,
    )
}
