//! The combat state machine.
//!
//! Exactly one state is active at a time. States never switch directly: they
//! queue a transition through [`StateContext::change_state`], and the machine
//! applies it after the active state's `enter` or `handle` returns, running
//! the old state's `exit` before the new state's `enter`.
mod context;
mod selection;
pub mod states;

pub use context::{CombatState, StateContext, StateKind};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{
    Collaborators, CombatCommand, CombatHandle, Result, RuntimeError, StateMachineError,
};
use crate::config::RuntimeConfig;
use crate::encounter::{Encounter, EncounterOutcome, EncounterSummary};
use crate::events::{CombatEvent, EventBus};
use context::request_transition;
use states::{DisplayPostCombatStats, InitTurn};

enum EnterOutcome {
    Finished(Result<()>),
    Aborted,
}

/// Drives one encounter from the first turn to the post-combat report.
pub struct CombatStateMachine {
    encounter: Encounter,
    collaborators: Collaborators,
    config: RuntimeConfig,
    events: EventBus,
    commands: mpsc::Receiver<CombatCommand>,
    current: Option<Box<dyn CombatState>>,
    pending: Option<Box<dyn CombatState>>,
}

impl CombatStateMachine {
    /// Creates an idle machine together with the handle that steers it.
    pub fn new(
        encounter: Encounter,
        collaborators: Collaborators,
        config: RuntimeConfig,
    ) -> (Self, CombatHandle) {
        let (command_tx, commands) = mpsc::channel(config.command_buffer_size.max(1));
        let events = EventBus::with_capacity(config.event_buffer_size);
        let handle = CombatHandle::new(command_tx, events.clone());

        let machine = Self {
            encounter,
            collaborators,
            config,
            events,
            commands,
            current: None,
            pending: None,
        };
        (machine, handle)
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut Encounter {
        &mut self.encounter
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn current_state(&self) -> Option<StateKind> {
        self.current.as_ref().map(|state| state.kind())
    }

    pub fn pending_state(&self) -> Option<StateKind> {
        self.pending.as_ref().map(|state| state.kind())
    }

    /// True once the post-combat state has been entered.
    pub fn is_finished(&self) -> bool {
        self.pending.is_none() && self.current_state() == Some(StateKind::DisplayPostCombatStats)
    }

    /// Queues a transition to `S`.
    ///
    /// Fails with [`StateMachineError::TransitionInFlight`] when another
    /// transition is still waiting to be applied.
    pub fn change_state<S>(&mut self) -> Result<()>
    where
        S: CombatState + Default + 'static,
    {
        request_transition(&mut self.pending, Box::new(S::default()))
    }

    /// Queues the first turn.
    pub fn start(&mut self) -> Result<()> {
        self.change_state::<InitTurn>()
    }

    /// Runs the encounter to completion and returns its report.
    pub async fn run(&mut self) -> Result<EncounterSummary> {
        if self.current.is_none() && self.pending.is_none() {
            self.start()?;
        }
        while !self.is_finished() {
            self.advance().await?;
        }
        self.encounter
            .summary
            .clone()
            .ok_or_else(|| StateMachineError::NotFinished.into())
    }

    /// Performs one step: applies the pending transition if there is one,
    /// otherwise waits for the next command and hands it to the active state.
    pub async fn advance(&mut self) -> Result<()> {
        if let Some(next) = self.pending.take() {
            return self.transition(next).await;
        }
        if self.current.is_none() {
            return Err(StateMachineError::NoActiveState.into());
        }
        if self.is_finished() {
            return Ok(());
        }
        let command = self
            .commands
            .recv()
            .await
            .ok_or(RuntimeError::CommandChannelClosed)?;
        self.dispatch(command).await
    }

    async fn transition(&mut self, next: Box<dyn CombatState>) -> Result<()> {
        let Self {
            encounter,
            collaborators,
            config,
            events,
            commands,
            current,
            pending,
        } = self;
        let events = &*events;

        if let Some(mut previous) = current.take() {
            let mut ctx = StateContext::new(encounter, collaborators, events, config, pending);
            previous.exit(&mut ctx);
            debug!(from = %previous.kind(), to = %next.kind(), "state transition");
        }

        let kind = next.kind();
        events.publish(CombatEvent::StateEntered { state: kind });
        let state = current.insert(next);

        let outcome = {
            let mut ctx = StateContext::new(encounter, collaborators, events, config, pending);
            let mut enter = state.enter(&mut ctx);
            let mut closed = false;
            loop {
                tokio::select! {
                    biased;
                    result = &mut enter => break EnterOutcome::Finished(result),
                    command = commands.recv(), if !closed => match command {
                        Some(CombatCommand::Abort) => break EnterOutcome::Aborted,
                        Some(command) => {
                            warn!(
                                state = %kind,
                                command = %command,
                                "command received while the state is busy"
                            );
                            events.publish(CombatEvent::CommandRejected {
                                state: kind,
                                reason: format!("{kind} is busy"),
                            });
                        }
                        None => closed = true,
                    },
                }
            }
        };

        match outcome {
            EnterOutcome::Finished(result) => result,
            EnterOutcome::Aborted => {
                info!(state = %kind, "abort cancelled the active state");
                abort(encounter, pending);
                Ok(())
            }
        }
    }

    async fn dispatch(&mut self, command: CombatCommand) -> Result<()> {
        let Self {
            encounter,
            collaborators,
            config,
            events,
            current,
            pending,
            ..
        } = self;
        let state = current.as_mut().ok_or(StateMachineError::NoActiveState)?;

        if command == CombatCommand::Abort {
            info!(state = %state.kind(), "encounter aborted");
            abort(encounter, pending);
            return Ok(());
        }

        let kind = state.kind();
        let mut ctx = StateContext::new(encounter, collaborators, events, config, pending);
        let result = state.handle(&mut ctx, command).await;
        match result {
            Err(err) if err.is_rejection() => {
                ctx.reject(kind, command, &err);
                Ok(())
            }
            other => other,
        }
    }
}

/// Ends the encounter early. Any transition queued so far is replaced.
fn abort(encounter: &mut Encounter, pending: &mut Option<Box<dyn CombatState>>) {
    encounter.outcome.get_or_insert(EncounterOutcome::Aborted);
    *pending = Some(Box::new(DisplayPostCombatStats::default()));
}
