use async_trait::async_trait;
use combat_core::UnitId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{
    Collaborators, CombatCommand, CommandError, Result, RuntimeError, StateMachineError,
};
use crate::config::RuntimeConfig;
use crate::encounter::Encounter;
use crate::events::{CombatEvent, EventBus};

/// Identifies a state for events, logs and errors.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    InitTurn,
    PlayerSelected,
    EnemySelected,
    PlayerPerformAction,
    EnemyPerformAction,
    TurnOver,
    DisplayPostCombatStats,
}

/// One state of the combat state machine.
///
/// `enter` may suspend (waiting on a collaborator or a scheduling tick). The
/// machine drops the suspended future if the encounter is aborted, so nothing
/// a state awaits can complete after the state was left.
#[async_trait]
pub trait CombatState: Send {
    fn kind(&self) -> StateKind;

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()>;

    /// Handles a command received while this state is active and idle.
    async fn handle(&mut self, ctx: &mut StateContext<'_>, command: CombatCommand) -> Result<()> {
        let _ = ctx;
        Err(CommandError::NotAccepted {
            state: self.kind(),
            command: command.to_string(),
        }
        .into())
    }

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {}
}

/// Records `next` as the pending transition unless one is already queued.
pub(crate) fn request_transition(
    pending: &mut Option<Box<dyn CombatState>>,
    next: Box<dyn CombatState>,
) -> Result<()> {
    if let Some(queued) = pending.as_ref() {
        return Err(StateMachineError::TransitionInFlight {
            pending: queued.kind(),
        }
        .into());
    }
    *pending = Some(next);
    Ok(())
}

/// What a state may touch while it runs.
pub struct StateContext<'a> {
    pub encounter: &'a mut Encounter,
    pub collaborators: &'a Collaborators,
    pub events: &'a EventBus,
    pub config: &'a RuntimeConfig,
    pending: &'a mut Option<Box<dyn CombatState>>,
}

impl<'a> StateContext<'a> {
    pub(crate) fn new(
        encounter: &'a mut Encounter,
        collaborators: &'a Collaborators,
        events: &'a EventBus,
        config: &'a RuntimeConfig,
        pending: &'a mut Option<Box<dyn CombatState>>,
    ) -> Self {
        Self {
            encounter,
            collaborators,
            events,
            config,
            pending,
        }
    }

    /// Queues a transition to `S`, applied once the current state returns.
    ///
    /// Fails with [`StateMachineError::TransitionInFlight`] when a transition
    /// is already queued.
    pub fn change_state<S>(&mut self) -> Result<()>
    where
        S: CombatState + Default + 'static,
    {
        request_transition(self.pending, Box::new(S::default()))
    }

    pub fn pending_state(&self) -> Option<StateKind> {
        self.pending.as_ref().map(|state| state.kind())
    }

    pub fn publish(&self, event: CombatEvent) {
        self.events.publish(event);
    }

    /// The unit whose turn is in progress.
    pub fn actor(&self, state: StateKind) -> Result<UnitId> {
        self.encounter
            .highlighted_unit
            .ok_or_else(|| StateMachineError::MissingHighlightedUnit { state }.into())
    }

    /// Reports a rejected command without stopping the encounter.
    pub(crate) fn reject(&self, state: StateKind, command: CombatCommand, err: &RuntimeError) {
        warn!(state = %state, command = %command, error = %err, "command rejected");
        self.publish(CombatEvent::CommandRejected {
            state,
            reason: err.to_string(),
        });
    }
}
