//! Types downstream clients interact with.
mod collaborators;
mod command;
mod errors;
mod handle;

pub use collaborators::{
    ActionPerformer, Collaborators, IntentProvider, MusicController, NullMusic, NullPresentation,
    Presentation, Scheduler,
};
pub use command::CombatCommand;
pub use errors::{CommandError, Result, RuntimeError, StateMachineError};
pub use handle::CombatHandle;
