//! The wizard engine: one active multi-step dialog per user.
//!
//! The engine loads the persisted conversation state for every inbound
//! event, applies the answer to the typed flow, persists the advanced
//! state, and emits the next prompt. Validation failures re-issue the
//! current prompt and never advance the step; duplicate submissions of
//! an already-applied answer are suppressed by fingerprint. Completing
//! a flow's final step invokes the lifecycle service and clears the
//! stored state.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::quest::domain::{EntityId, Goal, OrganizeDetails, OwnerId};
use crate::quest::ports::{QuestRepositoryError, QuestStore};
use crate::quest::services::{
    CreateGoalRequest, CreateHabitRequest, QuestLifecycleError, QuestLifecycleService,
    QuestQueryService,
};
use crate::reward::{
    Category, ExecutionType, Horizon, LifeArea, PriorityDimension, PriorityTags,
};
use crate::wizard::domain::{
    ChoiceOption, ConversationState, Flow, GuidedOnboarding, GuidedProgress, GuidedStep,
    HabitCreation, HabitStep, InboundEvent, ManualOnboarding, ManualStep, OrganizeDialog,
    OrganizeStep, PromptPhase, ReflectionPrompt, Reply, StepFingerprint, WizardValidationError,
    derive_goal_seeds, parse_goal_lines, parse_goal_selection, parse_interval,
    parse_tier_variants,
};
use crate::wizard::ports::{ConversationStateRepository, WizardStateError};

/// Errors returned by the wizard engine.
#[derive(Debug, Error)]
pub enum WizardEngineError {
    /// Conversation-state store failure.
    #[error(transparent)]
    State(#[from] WizardStateError),
    /// Lifecycle operation failure.
    #[error(transparent)]
    Lifecycle(#[from] QuestLifecycleError),
    /// Quest store lookup failure.
    #[error(transparent)]
    Repository(#[from] QuestRepositoryError),
}

/// Result type for wizard engine operations.
pub type WizardEngineResult<T> = Result<T, WizardEngineError>;

/// Drives multi-step dialogs and feeds their results to the lifecycle.
pub struct WizardEngine<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    states: Arc<R>,
    lifecycle: QuestLifecycleService<S, C>,
    queries: QuestQueryService<S>,
    clock: Arc<C>,
}

impl<R, S, C> WizardEngine<R, S, C>
where
    R: ConversationStateRepository,
    S: QuestStore,
    C: Clock + Send + Sync,
{
    /// Creates a new wizard engine over the given stores.
    #[must_use]
    pub fn new(states: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            states,
            lifecycle: QuestLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            queries: QuestQueryService::new(store),
            clock,
        }
    }

    /// Returns `true` when the owner has an active flow.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError::State`] when the state store fails.
    pub async fn has_active_flow(&self, owner: &OwnerId) -> WizardEngineResult<bool> {
        Ok(self.states.load(owner).await?.is_some())
    }

    /// Starts guided onboarding.
    ///
    /// A start request while a flow is already awaiting input is a
    /// retried duplicate and is suppressed.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store operation fails.
    pub async fn start_guided_onboarding(
        &self,
        owner: &OwnerId,
    ) -> WizardEngineResult<Vec<Reply>> {
        if self.is_start_suppressed(owner).await? {
            return Ok(Vec::new());
        }
        let guided = GuidedOnboarding::new();
        let prompt = Self::guided_prompt(&guided);
        let mut state =
            ConversationState::new(owner.clone(), Flow::GuidedOnboarding(guided), &*self.clock);
        state.mark_prompted(&*self.clock);
        self.states.save(&state).await?;
        Ok(vec![
            Reply::message(
                "Let's walk your six life areas. For each one I'll ask for the ideal state, \
                 the current state, and what stands between them.",
            ),
            prompt,
        ])
    }

    /// Starts manual onboarding.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store operation fails.
    pub async fn start_manual_onboarding(
        &self,
        owner: &OwnerId,
    ) -> WizardEngineResult<Vec<Reply>> {
        if self.is_start_suppressed(owner).await? {
            return Ok(Vec::new());
        }
        let mut state = ConversationState::new(
            owner.clone(),
            Flow::ManualOnboarding(ManualOnboarding::new()),
            &*self.clock,
        );
        state.mark_prompted(&*self.clock);
        self.states.save(&state).await?;
        Ok(vec![Self::manual_prompt()])
    }

    /// Starts the organize dialog over the owner's captured items.
    ///
    /// With nothing captured, no flow starts and a notice is returned.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store operation fails.
    pub async fn start_organize(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        if self.is_start_suppressed(owner).await? {
            return Ok(Vec::new());
        }
        let captured = self.queries.captured_items(owner).await?;
        if captured.is_empty() {
            return Ok(vec![Reply::message("Nothing captured to organize.")]);
        }
        let queue: Vec<EntityId> = captured
            .iter()
            .map(|activity| activity.id().clone())
            .collect();
        let dialog = OrganizeDialog::new(queue);
        let replies = self.organize_item_intro(owner, &dialog).await?;
        let mut state =
            ConversationState::new(owner.clone(), Flow::Organize(dialog), &*self.clock);
        state.mark_prompted(&*self.clock);
        self.states.save(&state).await?;
        Ok(replies)
    }

    /// Starts habit creation.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store operation fails.
    pub async fn start_habit_creation(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        if self.is_start_suppressed(owner).await? {
            return Ok(Vec::new());
        }
        let mut state = ConversationState::new(
            owner.clone(),
            Flow::HabitCreation(HabitCreation::new()),
            &*self.clock,
        );
        state.mark_prompted(&*self.clock);
        self.states.save(&state).await?;
        Ok(vec![Reply::message("What should the habit be called?")])
    }

    /// Handles one inbound event against the owner's active flow.
    ///
    /// Returns `None` when no flow is active, so the caller can route
    /// the event as a direct command. A duplicate of the last applied
    /// answer returns an empty reply set.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store or lifecycle
    /// operation fails.
    pub async fn handle(&self, event: &InboundEvent) -> WizardEngineResult<Option<Vec<Reply>>> {
        let owner = event.owner().clone();
        let Some(mut state) = self.states.load(&owner).await? else {
            return Ok(None);
        };
        let candidate = StepFingerprint::compute(
            &owner,
            state.flow.tag(),
            &state.flow.step_tag(),
            event.payload(),
        );
        if state.last_fingerprint.as_ref() == Some(&candidate) {
            return Ok(Some(Vec::new()));
        }
        let replies = match state.flow.clone() {
            Flow::GuidedOnboarding(guided) => {
                self.handle_guided(&mut state, guided, event).await?
            }
            Flow::ManualOnboarding(manual) => {
                self.handle_manual(&mut state, manual, event).await?
            }
            Flow::Organize(dialog) => self.handle_organize(&mut state, dialog, event).await?,
            Flow::HabitCreation(habit) => self.handle_habit(&mut state, habit, event).await?,
        };
        Ok(Some(replies))
    }

    /// Re-issues the prompt for the owner's current step, for explicit
    /// resumption after an interruption.
    ///
    /// # Errors
    ///
    /// Returns [`WizardEngineError`] when a store operation fails.
    pub async fn resume_prompt(&self, owner: &OwnerId) -> WizardEngineResult<Vec<Reply>> {
        let Some(mut state) = self.states.load(owner).await? else {
            return Ok(Vec::new());
        };
        let prompt = match &state.flow {
            Flow::GuidedOnboarding(guided) => Self::guided_prompt(guided),
            Flow::ManualOnboarding(manual) => match manual.step {
                ManualStep::GoalLines => Self::manual_prompt(),
                ManualStep::IntervalSelection => Self::interval_prompt(),
            },
            Flow::Organize(dialog) => self.organize_step_prompt(owner, dialog).await?,
            Flow::HabitCreation(habit) => Self::habit_prompt(habit),
        };
        state.mark_prompted(&*self.clock);
        self.states.save(&state).await?;
        Ok(vec![prompt])
    }

    async fn is_start_suppressed(&self, owner: &OwnerId) -> WizardEngineResult<bool> {
        Ok(self
            .states
            .load(owner)
            .await?
            .is_some_and(|state| state.phase == PromptPhase::AwaitingInput))
    }

    /// Persists an advanced flow, fingerprinting the applied payload
    /// against the new step so a transport retry of the same payload is
    /// recognised there.
    async fn advance(
        &self,
        state: &mut ConversationState,
        flow: Flow,
        payload: &str,
    ) -> WizardEngineResult<()> {
        state.flow = flow;
        let fingerprint = StepFingerprint::compute(
            &state.owner,
            state.flow.tag(),
            &state.flow.step_tag(),
            payload,
        );
        state.record_applied(fingerprint, &*self.clock);
        state.mark_prompted(&*self.clock);
        self.states.save(state).await?;
        Ok(())
    }

    /// Persists an advanced flow without recording a fingerprint, for
    /// self-inverse steps (priority toggles) where a retry cannot be
    /// told apart from an intentional repeat.
    async fn advance_unfingerprinted(
        &self,
        state: &mut ConversationState,
        flow: Flow,
    ) -> WizardEngineResult<()> {
        state.flow = flow;
        state.last_fingerprint = None;
        state.mark_prompted(&*self.clock);
        self.states.save(state).await?;
        Ok(())
    }

    async fn handle_guided(
        &self,
        state: &mut ConversationState,
        mut guided: GuidedOnboarding,
        event: &InboundEvent,
    ) -> WizardEngineResult<Vec<Reply>> {
        let owner = event.owner().clone();
        match guided.step.clone() {
            GuidedStep::Reflection { .. } => {
                match guided.record_reflection(event.payload()) {
                    Err(err) => Ok(Self::revalidate(&err, Self::guided_prompt(&guided))),
                    Ok(progress) => {
                        let prompt = match progress {
                            GuidedProgress::Continue => Self::guided_prompt(&guided),
                            GuidedProgress::AwaitingInterval => Self::interval_prompt(),
                        };
                        self.advance(state, Flow::GuidedOnboarding(guided), event.payload())
                            .await?;
                        Ok(vec![prompt])
                    }
                }
            }
            GuidedStep::IntervalSelection => match parse_interval(event.payload()) {
                Err(err) => Ok(Self::revalidate(&err, Self::interval_prompt())),
                Ok(minutes) => {
                    let seeds = derive_goal_seeds(&guided.completed);
                    let mut declared = 0usize;
                    for seed in seeds {
                        self.lifecycle
                            .create_goal(CreateGoalRequest::new(
                                owner.clone(),
                                seed.title,
                                seed.area,
                                seed.horizon,
                                seed.category,
                            ))
                            .await?;
                        declared += 1;
                    }
                    self.lifecycle
                        .set_reminder_interval(&owner, minutes)
                        .await?;
                    self.states.clear(&owner).await?;
                    Ok(vec![Reply::message(format!(
                        "Onboarding complete: {declared} goals declared. Capture anything \
                         on your mind and I'll keep score."
                    ))])
                }
            },
        }
    }

    async fn handle_manual(
        &self,
        state: &mut ConversationState,
        mut manual: ManualOnboarding,
        event: &InboundEvent,
    ) -> WizardEngineResult<Vec<Reply>> {
        let owner = event.owner().clone();
        match manual.step {
            ManualStep::GoalLines => match parse_goal_lines(event.payload()) {
                Err(err) => Ok(Self::revalidate(&err, Self::manual_prompt())),
                Ok(lines) => {
                    let mut declared = 0usize;
                    let mut skipped = 0usize;
                    for line in lines {
                        match line.title {
                            None => skipped += 1,
                            Some(title) => {
                                self.lifecycle
                                    .create_goal(CreateGoalRequest::new(
                                        owner.clone(),
                                        title,
                                        line.area,
                                        Horizon::Annum,
                                        Category::MainQuest,
                                    ))
                                    .await?;
                                declared += 1;
                            }
                        }
                    }
                    manual.step = ManualStep::IntervalSelection;
                    self.advance(state, Flow::ManualOnboarding(manual), event.payload())
                        .await?;
                    Ok(vec![
                        Reply::message(format!(
                            "Declared {declared} goals, skipped {skipped} areas."
                        )),
                        Self::interval_prompt(),
                    ])
                }
            },
            ManualStep::IntervalSelection => match parse_interval(event.payload()) {
                Err(err) => Ok(Self::revalidate(&err, Self::interval_prompt())),
                Ok(minutes) => {
                    self.lifecycle
                        .set_reminder_interval(&owner, minutes)
                        .await?;
                    self.states.clear(&owner).await?;
                    Ok(vec![Reply::message(
                        "Onboarding complete. Capture anything on your mind and I'll keep \
                         score.",
                    )])
                }
            },
        }
    }

    async fn handle_organize(
        &self,
        state: &mut ConversationState,
        mut dialog: OrganizeDialog,
        event: &InboundEvent,
    ) -> WizardEngineResult<Vec<Reply>> {
        let owner = event.owner().clone();
        let Some(item_id) = dialog.current_item().cloned() else {
            self.states.clear(&owner).await?;
            return Ok(vec![Reply::message("Nothing left to organize.")]);
        };
        match dialog.step.clone() {
            OrganizeStep::GoalSelect => {
                let goals = self.queries.active_goals(&owner).await?;
                match parse_goal_selection(event.payload(), goals.len()) {
                    Err(err) => Ok(Self::revalidate(&err, Self::goal_select_prompt(&goals))),
                    Ok(selection) => {
                        let goal_id = selection
                            .and_then(|index| goals.get(index))
                            .map(|goal| goal.id.clone());
                        let tags = PriorityTags::none();
                        let prompt = Self::priority_prompt(&tags);
                        dialog.step = OrganizeStep::PriorityTags { goal_id, tags };
                        self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                        Ok(vec![prompt])
                    }
                }
            }
            OrganizeStep::PriorityTags { goal_id, mut tags } => {
                let value = event.payload().trim().to_ascii_lowercase();
                if value == "done" {
                    let prompt = Self::life_area_prompt();
                    dialog.step = OrganizeStep::LifeArea { goal_id, tags };
                    self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                    return Ok(vec![prompt]);
                }
                match PriorityDimension::try_from(value.as_str()) {
                    Err(_) => Ok(Self::revalidate(
                        &WizardValidationError::UnknownChoice {
                            expected: "priority dimension",
                            value,
                        },
                        Self::priority_prompt(&tags),
                    )),
                    Ok(dimension) => {
                        tags.toggle(dimension);
                        let prompt = Self::priority_prompt(&tags);
                        dialog.step = OrganizeStep::PriorityTags { goal_id, tags };
                        self.advance_unfingerprinted(state, Flow::Organize(dialog)).await?;
                        Ok(vec![prompt])
                    }
                }
            }
            OrganizeStep::LifeArea { goal_id, tags } => {
                match LifeArea::try_from(event.payload()) {
                    Err(_) => Ok(Self::revalidate(
                        &WizardValidationError::UnknownChoice {
                            expected: "life area",
                            value: event.payload().to_owned(),
                        },
                        Self::life_area_prompt(),
                    )),
                    Ok(life_area) => {
                        let prompt = Self::horizon_prompt();
                        dialog.step = OrganizeStep::Horizon {
                            goal_id,
                            tags,
                            life_area,
                        };
                        self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                        Ok(vec![prompt])
                    }
                }
            }
            OrganizeStep::Horizon {
                goal_id,
                tags,
                life_area,
            } => match Horizon::try_from(event.payload()) {
                Err(_) => Ok(Self::revalidate(
                    &WizardValidationError::UnknownChoice {
                        expected: "horizon",
                        value: event.payload().to_owned(),
                    },
                    Self::horizon_prompt(),
                )),
                Ok(horizon) => {
                    let prompt = Self::execution_prompt();
                    dialog.step = OrganizeStep::ExecutionType {
                        goal_id,
                        tags,
                        life_area,
                        horizon,
                    };
                    self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                    Ok(vec![prompt])
                }
            },
            OrganizeStep::ExecutionType {
                goal_id,
                tags,
                life_area,
                horizon,
            } => match ExecutionType::try_from(event.payload()) {
                Err(_) => Ok(Self::revalidate(
                    &WizardValidationError::UnknownChoice {
                        expected: "execution type",
                        value: event.payload().to_owned(),
                    },
                    Self::execution_prompt(),
                )),
                Ok(execution_type) => {
                    let prompt = Self::category_prompt();
                    dialog.step = OrganizeStep::Category {
                        goal_id,
                        tags,
                        life_area,
                        horizon,
                        execution_type,
                    };
                    self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                    Ok(vec![prompt])
                }
            },
            OrganizeStep::Category {
                goal_id,
                tags,
                life_area,
                horizon,
                execution_type,
            } => match Category::try_from(event.payload()) {
                Err(_) => Ok(Self::revalidate(
                    &WizardValidationError::UnknownChoice {
                        expected: "category",
                        value: event.payload().to_owned(),
                    },
                    Self::category_prompt(),
                )),
                Ok(category) => {
                    let details = OrganizeDetails {
                        goal_id,
                        priority_tags: tags,
                        life_area,
                        horizon,
                        execution_type,
                        category,
                        estimate_minutes: None,
                        deadline: None,
                        depends_on: None,
                        mental_block: false,
                    };
                    let mut replies =
                        match self.lifecycle.organize(&owner, &item_id, details).await {
                            Ok(outcome) => vec![Reply::message(format!(
                                "{item_id} organized (+{}).",
                                outcome.score_delta
                            ))],
                            Err(err) => {
                                tracing::warn!(
                                    owner = %owner,
                                    activity = %item_id,
                                    error = %err,
                                    "organize transition failed; skipping item"
                                );
                                vec![Reply::message(format!(
                                    "Could not organize {item_id}; moving on."
                                ))]
                            }
                        };
                    if dialog.advance_queue().is_some() {
                        replies.extend(self.organize_item_intro(&owner, &dialog).await?);
                        self.advance(state, Flow::Organize(dialog), event.payload()).await?;
                    } else {
                        self.states.clear(&owner).await?;
                        replies.push(Reply::message("That's every captured item organized."));
                    }
                    Ok(replies)
                }
            },
        }
    }

    async fn handle_habit(
        &self,
        state: &mut ConversationState,
        mut habit: HabitCreation,
        event: &InboundEvent,
    ) -> WizardEngineResult<Vec<Reply>> {
        let owner = event.owner().clone();
        match habit.step.clone() {
            HabitStep::Name => {
                let name = event.payload().trim();
                if name.is_empty() {
                    return Ok(Self::revalidate(
                        &WizardValidationError::BlankAnswer,
                        Reply::message("What should the habit be called?"),
                    ));
                }
                habit.step = HabitStep::LifeArea {
                    name: name.to_owned(),
                };
                self.advance(state, Flow::HabitCreation(habit), event.payload()).await?;
                Ok(vec![Self::life_area_prompt()])
            }
            HabitStep::LifeArea { name } => match LifeArea::try_from(event.payload()) {
                Err(_) => Ok(Self::revalidate(
                    &WizardValidationError::UnknownChoice {
                        expected: "life area",
                        value: event.payload().to_owned(),
                    },
                    Self::life_area_prompt(),
                )),
                Ok(life_area) => {
                    habit.step = HabitStep::TierVariants { name, life_area };
                    self.advance(state, Flow::HabitCreation(habit), event.payload()).await?;
                    Ok(vec![Self::tier_variants_prompt()])
                }
            },
            HabitStep::TierVariants { name, life_area } => {
                match parse_tier_variants(event.payload()) {
                    Err(err) => Ok(Self::revalidate(&err, Self::tier_variants_prompt())),
                    Ok(tiers) => {
                        let created = self
                            .lifecycle
                            .create_habit(CreateHabitRequest {
                                owner: owner.clone(),
                                name,
                                life_area,
                                tiers,
                            })
                            .await?;
                        self.states.clear(&owner).await?;
                        Ok(vec![Reply::message(format!(
                            "Habit {} created. Log a session any time to build the streak.",
                            created.id
                        ))])
                    }
                }
            }
        }
    }

    async fn organize_item_intro(
        &self,
        owner: &OwnerId,
        dialog: &OrganizeDialog,
    ) -> WizardEngineResult<Vec<Reply>> {
        let Some(item_id) = dialog.current_item() else {
            return Ok(vec![Reply::message("Nothing left to organize.")]);
        };
        let headline = self
            .queries
            .activity(owner, item_id)
            .await?
            .map_or_else(
                || format!("Organizing {item_id}."),
                |activity| format!("Organizing {item_id}: {}", activity.text()),
            );
        let goals = self.queries.active_goals(owner).await?;
        Ok(vec![
            Reply::message(headline),
            Self::goal_select_prompt(&goals),
        ])
    }

    async fn organize_step_prompt(
        &self,
        owner: &OwnerId,
        dialog: &OrganizeDialog,
    ) -> WizardEngineResult<Reply> {
        match &dialog.step {
            OrganizeStep::GoalSelect => {
                let goals = self.queries.active_goals(owner).await?;
                Ok(Self::goal_select_prompt(&goals))
            }
            OrganizeStep::PriorityTags { tags, .. } => Ok(Self::priority_prompt(tags)),
            OrganizeStep::LifeArea { .. } => Ok(Self::life_area_prompt()),
            OrganizeStep::Horizon { .. } => Ok(Self::horizon_prompt()),
            OrganizeStep::ExecutionType { .. } => Ok(Self::execution_prompt()),
            OrganizeStep::Category { .. } => Ok(Self::category_prompt()),
        }
    }

    fn revalidate(err: &WizardValidationError, prompt: Reply) -> Vec<Reply> {
        vec![Reply::message(err.to_string()), prompt]
    }

    fn guided_prompt(guided: &GuidedOnboarding) -> Reply {
        match &guided.step {
            GuidedStep::IntervalSelection => Self::interval_prompt(),
            GuidedStep::Reflection { prompt, .. } => {
                let area = guided
                    .current_area()
                    .map_or_else(|| "life".to_owned(), |area| area.to_string());
                match prompt {
                    ReflectionPrompt::Ideal => Reply::message(format!(
                        "Picture your {area} life at its best. What does it look like?"
                    )),
                    ReflectionPrompt::Current { .. } => Reply::message(format!(
                        "And today, how is your {area} life actually going?"
                    )),
                    ReflectionPrompt::Obstacle { .. } => Reply::message(format!(
                        "What most stands between the two in your {area} life?"
                    )),
                }
            }
        }
    }

    fn manual_prompt() -> Reply {
        Reply::message(
            "Send one line per area, in 'life-area: goal' form. Leave a goal blank to \
             skip that area. Areas: physical, mind, vocation, financial, social, leisure.",
        )
    }

    fn interval_prompt() -> Reply {
        Reply::choices(
            "How often should I check in on your ready items?",
            vec![
                ChoiceOption::new("30", "Every 30 minutes"),
                ChoiceOption::new("60", "Hourly"),
                ChoiceOption::new("180", "Every 3 hours"),
                ChoiceOption::new("1440", "Daily"),
                ChoiceOption::new("off", "No reminders"),
            ],
        )
    }

    fn goal_select_prompt(goals: &[Goal]) -> Reply {
        let mut options: Vec<ChoiceOption> = goals
            .iter()
            .enumerate()
            .map(|(index, goal)| {
                ChoiceOption::new((index + 1).to_string(), goal.title.clone())
            })
            .collect();
        options.push(ChoiceOption::new("skip", "No goal"));
        Reply::choices("Which goal does this advance?", options)
    }

    fn priority_prompt(tags: &PriorityTags) -> Reply {
        let options = PriorityDimension::ALL
            .into_iter()
            .map(|dimension| {
                let marker = if tags.is_high(dimension) { "high" } else { "low" };
                ChoiceOption::new(
                    dimension.as_str(),
                    format!("{dimension} ({marker})"),
                )
            })
            .chain(std::iter::once(ChoiceOption::new("done", "Done")))
            .collect();
        Reply::choices(
            format!("Toggle what weighs on this item (now {tags}), then pick Done."),
            options,
        )
    }

    fn life_area_prompt() -> Reply {
        Reply::choices(
            "Which life area does this belong to?",
            LifeArea::ALL
                .into_iter()
                .map(|area| ChoiceOption::new(area.as_str(), area.as_str()))
                .collect(),
        )
    }

    fn horizon_prompt() -> Reply {
        Reply::choices(
            "What horizon is this for?",
            Horizon::ALL
                .into_iter()
                .map(|horizon| ChoiceOption::new(horizon.as_str(), horizon.as_str()))
                .collect(),
        )
    }

    fn execution_prompt() -> Reply {
        Reply::choices(
            "How will this get done?",
            ExecutionType::ALL
                .into_iter()
                .map(|execution| ChoiceOption::new(execution.as_str(), execution.as_str()))
                .collect(),
        )
    }

    fn category_prompt() -> Reply {
        Reply::choices(
            "And what kind of quest is it?",
            Category::ALL
                .into_iter()
                .map(|category| ChoiceOption::new(category.as_str(), category.as_str()))
                .collect(),
        )
    }

    fn habit_prompt(habit: &HabitCreation) -> Reply {
        match &habit.step {
            HabitStep::Name => Reply::message("What should the habit be called?"),
            HabitStep::LifeArea { .. } => Self::life_area_prompt(),
            HabitStep::TierVariants { .. } => Self::tier_variants_prompt(),
        }
    }

    fn tier_variants_prompt() -> Reply {
        Reply::message(
            "Describe the habit at four levels, slash-separated: easy/medium/hard/peak.",
        )
    }
}
