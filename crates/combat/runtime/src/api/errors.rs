//! Unified error types surfaced by the runtime API.
//!
//! Rejected commands are recoverable: the machine reports them as
//! [`crate::CombatEvent::CommandRejected`] and keeps waiting. Everything else
//! stops the encounter loop.
use combat_core::{
    AbilityId, CombatError, ErrorSeverity, ItemId, PlacementError, ResolveError, UnitId,
};
use thiserror::Error;

use crate::machine::StateKind;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat command channel closed")]
    CommandChannelClosed,

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandChannelClosed | Self::StateMachine(_) => ErrorSeverity::Internal,
            Self::Command(err) => err.severity(),
            Self::Placement(err) => err.severity(),
            Self::Resolve(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "runtime.command_channel_closed",
            Self::StateMachine(err) => err.error_code(),
            Self::Command(err) => err.error_code(),
            Self::Placement(err) => err.error_code(),
            Self::Resolve(err) => err.error_code(),
        }
    }
}

/// Violations of the one-state-at-a-time contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateMachineError {
    #[error("a transition to {pending} is already in flight")]
    TransitionInFlight { pending: StateKind },

    #[error("no state is active")]
    NoActiveState,

    #[error("no unit is highlighted in {state}")]
    MissingHighlightedUnit { state: StateKind },

    #[error("no action is queued for {unit}")]
    MissingAction { unit: UnitId },

    #[error("encounter has not finished")]
    NotFinished,
}

impl CombatError for StateMachineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TransitionInFlight { .. } => "machine.transition_in_flight",
            Self::NoActiveState => "machine.no_active_state",
            Self::MissingHighlightedUnit { .. } => "machine.missing_highlighted_unit",
            Self::MissingAction { .. } => "machine.missing_action",
            Self::NotFinished => "machine.not_finished",
        }
    }
}

/// A command that cannot be honoured in the current situation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{state} does not accept '{command}'")]
    NotAccepted { state: StateKind, command: String },

    #[error("no action selected")]
    NoActionSelected,

    #[error("the selected action needs a target")]
    NoTargetSelected,

    #[error("{unit} does not know {ability}")]
    UnknownAbility { unit: UnitId, ability: AbilityId },

    #[error("{unit} carries no {item}")]
    UnknownItem { unit: UnitId, item: ItemId },

    #[error("{0} already moved this turn")]
    AlreadyMoved(UnitId),
}

impl CombatError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAbility { .. } | Self::UnknownItem { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAccepted { .. } => "command.not_accepted",
            Self::NoActionSelected => "command.no_action_selected",
            Self::NoTargetSelected => "command.no_target_selected",
            Self::UnknownAbility { .. } => "command.unknown_ability",
            Self::UnknownItem { .. } => "command.unknown_item",
            Self::AlreadyMoved(_) => "command.already_moved",
        }
    }
}

impl RuntimeError {
    /// True when the error only rejects one command and the encounter can go
    /// on.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Command(_) => true,
            Self::Placement(err) => err.severity() != ErrorSeverity::Internal,
            Self::Resolve(err) => err.severity() != ErrorSeverity::Internal,
            Self::CommandChannelClosed | Self::StateMachine(_) => false,
        }
    }
}
