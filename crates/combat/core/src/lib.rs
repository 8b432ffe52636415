//! Deterministic combat rules for a grid-based tactics encounter.
//!
//! `combat-core` owns the pure parts of combat: unit attributes, the board,
//! abilities and items, action targeting and resolution, the turn order and
//! the proximity (threat) evaluator. Nothing in this crate performs I/O or
//! suspends; the async state machine that sequences an encounter lives in
//! `combat-runtime` and drives these APIs.
pub mod ability;
pub mod action;
pub mod attribute;
pub mod board;
pub mod config;
pub mod error;
pub mod log;
pub mod proximity;
pub mod resolution;
pub mod state;
pub mod turn;

pub use ability::{Ability, AbilityId, DamageKind, Effect, Item, ItemId, TargetType};
pub use action::{Action, ActionKind};
pub use attribute::{Attribute, AttributeCollection, AttributeKind};
pub use board::{Battlefield, MapDimensions, TileData, TileMap, world_to_tile};
pub use config::CombatConfig;
pub use error::{CombatError, ErrorSeverity, PlacementError, ResolveError};
pub use log::{ActionLog, LogEntry};
pub use proximity::{is_enemy_nearby, scan_offsets, unit_threatened};
pub use resolution::Resolution;
pub use state::{Faction, Position, Roster, TimedModifier, Unit, UnitFlags, UnitId};
pub use turn::{TurnOrder, TurnOrderController};
