//! Broadcast of what happens during an encounter.
mod bus;
mod types;

pub use bus::EventBus;
pub use types::CombatEvent;
