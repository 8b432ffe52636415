//! Async orchestration of a combat encounter.
//!
//! This crate sequences an encounter built from `combat-core` rules. The
//! [`CombatStateMachine`] owns the [`Encounter`], runs exactly one state at a
//! time, and talks to the outside world through injected collaborators and a
//! command channel. Consumers hold a [`CombatHandle`] to issue commands and
//! subscribe to [`CombatEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes commands, the handle, errors and collaborator traits
//! - [`machine`] hosts the state machine and its states
//! - [`events`] provides the broadcast event bus
//! - [`providers`] ships default collaborators (intent, performer, scheduler)
//! - [`encounter`] holds the mutable encounter data and its summary
pub mod api;
pub mod config;
pub mod encounter;
pub mod events;
pub mod machine;
pub mod providers;

pub use api::{
    ActionPerformer, Collaborators, CombatCommand, CombatHandle, CommandError, IntentProvider,
    MusicController, NullMusic, NullPresentation, Presentation, Result, RuntimeError, Scheduler,
    StateMachineError,
};
pub use config::RuntimeConfig;
pub use encounter::{Encounter, EncounterOutcome, EncounterSummary, UnitReport};
pub use events::{CombatEvent, EventBus};
pub use machine::{CombatState, CombatStateMachine, StateContext, StateKind};
pub use providers::{NearestTargetIntent, ResolvingPerformer, TokioScheduler};
