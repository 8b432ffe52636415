//! Turn sequencing.
//!
//! [`TurnOrder`] is the plain queue of acting units. [`TurnOrderController`]
//! owns the encounter's queue and applies the end-of-turn policy: a unit that
//! finishes its turn goes to the back, defeated units drop out, and
//! reinforcement orders are merged in without duplicates.

mod controller;
mod order;

pub use controller::TurnOrderController;
pub use order::TurnOrder;
