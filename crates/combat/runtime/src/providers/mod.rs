//! Default collaborators.
//!
//! - [`NearestTargetIntent`] walks toward the closest opposing unit and
//!   attacks it
//! - [`ResolvingPerformer`] resolves actions instantly against the board
//! - [`TokioScheduler`] yields to the tokio scheduler for one tick
mod intent;
mod performer;
mod scheduler;

pub use intent::NearestTargetIntent;
pub use performer::ResolvingPerformer;
pub use scheduler::TokioScheduler;
