//! Combatants and the roster that owns them.

mod common;
mod roster;
mod unit;

pub use common::{Faction, Position, UnitId};
pub use roster::Roster;
pub use unit::{TimedModifier, Unit, UnitFlags};
