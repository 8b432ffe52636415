use std::fmt;

use combat_core::{AbilityId, ItemId, Position};
use serde::{Deserialize, Serialize};

/// Input to the state machine.
///
/// Commands are the only way anything outside the machine steers an
/// encounter: a human through [`crate::CombatHandle`], or an
/// [`crate::IntentProvider`] plan replayed by the machine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatCommand {
    /// Walk the acting unit to a tile.
    Move(Position),
    /// Pick the basic attack.
    Attack,
    SelectAbility(AbilityId),
    SelectItem(ItemId),
    /// Aim the selected action at a tile.
    SelectTarget(Position),
    /// Perform the selected action.
    Confirm,
    /// Drop the selected action.
    Cancel,
    /// Raise Defense until the unit's next turn and end the turn.
    Defend,
    EndTurn,
    /// Stop the encounter, cancelling whatever the current state awaits.
    Abort,
}

impl fmt::Display for CombatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(position) => write!(f, "move {position}"),
            Self::Attack => write!(f, "attack"),
            Self::SelectAbility(id) => write!(f, "select {id}"),
            Self::SelectItem(id) => write!(f, "select {id}"),
            Self::SelectTarget(position) => write!(f, "target {position}"),
            Self::Confirm => write!(f, "confirm"),
            Self::Cancel => write!(f, "cancel"),
            Self::Defend => write!(f, "defend"),
            Self::EndTurn => write!(f, "end turn"),
            Self::Abort => write!(f, "abort"),
        }
    }
}
