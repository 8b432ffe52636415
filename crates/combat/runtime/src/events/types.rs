use std::collections::BTreeMap;

use combat_core::UnitId;
use serde::{Deserialize, Serialize};

use crate::encounter::EncounterSummary;
use crate::machine::StateKind;

/// Notification published by the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    StateEntered {
        state: StateKind,
    },
    TurnStarted {
        unit: UnitId,
        turn: u64,
    },
    /// The machine waits for a player command for `unit`.
    AwaitingCommand {
        unit: UnitId,
    },
    CommandRejected {
        state: StateKind,
        reason: String,
    },
    ActionResolved {
        actor: UnitId,
        label: String,
        damage: BTreeMap<UnitId, i32>,
    },
    UnitDefeated {
        unit: UnitId,
    },
    TensionChanged {
        tense: bool,
    },
    TurnFinished {
        unit: UnitId,
    },
    EncounterEnded {
        summary: EncounterSummary,
    },
}
