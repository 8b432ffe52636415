//! Mutable data of one encounter and its final report.
use std::collections::BTreeMap;

use combat_core::{
    Action, ActionLog, AttributeCollection, AttributeKind, Battlefield, Faction, PlacementError,
    TurnOrder, TurnOrderController, Unit, UnitId,
};
use serde::{Deserialize, Serialize};

/// How an encounter ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EncounterOutcome {
    /// Every enemy was defeated.
    Victory,
    /// Every player unit was defeated.
    Defeat,
    /// Stopped by an abort command.
    Aborted,
    /// The configured turn limit ran out.
    Stalemate,
}

/// Everything the active state reads and mutates.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub field: Battlefield,
    pub turn_order: TurnOrderController,
    /// Unit whose turn is in progress.
    pub highlighted_unit: Option<UnitId>,
    /// Action being assembled for the highlighted unit.
    pub action: Option<Action>,
    /// Most recently performed action, kept for presentation.
    pub last_action: Option<Action>,
    pub outcome: Option<EncounterOutcome>,
    pub log: ActionLog,
    pub summary: Option<EncounterSummary>,
    /// Whether opposing units were within reach after the last turn.
    pub tense: bool,
    /// Turns started so far.
    pub turn: u64,
    baseline: BTreeMap<UnitId, AttributeCollection>,
}

impl Encounter {
    /// Starts an encounter on `field` with the speed-ordered opening turn
    /// order.
    pub fn new(field: Battlefield) -> Self {
        let turn_order = TurnOrderController::from_roster(field.roster());
        Self::with_turn_order(field, turn_order)
    }

    pub fn with_turn_order(field: Battlefield, turn_order: TurnOrderController) -> Self {
        let baseline = field.roster().snapshot();
        Self {
            field,
            turn_order,
            highlighted_unit: None,
            action: None,
            last_action: None,
            outcome: None,
            log: ActionLog::new(),
            summary: None,
            tense: false,
            turn: 0,
            baseline,
        }
    }

    /// Attributes of `unit` when it joined the encounter.
    pub fn baseline(&self, unit: UnitId) -> Option<&AttributeCollection> {
        self.baseline.get(&unit)
    }

    /// Places reinforcements and merges them into the back of the turn order.
    ///
    /// Stops at the first unit that cannot be placed; units placed before it
    /// stay.
    pub fn reinforce(
        &mut self,
        units: impl IntoIterator<Item = Unit>,
    ) -> Result<(), PlacementError> {
        let mut arrivals = TurnOrder::new();
        let mut result = Ok(());
        for unit in units {
            let id = unit.id;
            let snapshot = unit.attributes.deep_copy();
            if let Err(err) = self.field.spawn(unit) {
                result = Err(err);
                break;
            }
            self.baseline.insert(id, snapshot);
            arrivals.add_unit(id);
        }
        self.turn_order.reinforce(&arrivals);
        result
    }

    pub fn highlighted(&self) -> Option<&Unit> {
        self.highlighted_unit.and_then(|id| self.field.unit(id))
    }

    /// Builds the post-combat report.
    pub fn summarize(&self) -> EncounterSummary {
        let units = self
            .field
            .roster()
            .iter()
            .map(|unit| {
                let starting = self
                    .baseline(unit.id)
                    .map_or(unit.health(), |attributes| attributes.current(AttributeKind::Health));
                UnitReport {
                    id: unit.id,
                    name: unit.name.clone(),
                    faction: unit.faction,
                    damage_dealt: self.log.damage_dealt_by(unit.id),
                    damage_taken: starting - unit.health(),
                    remaining_health: unit.health(),
                    defeated: unit.is_defeated(),
                }
            })
            .collect();

        EncounterSummary {
            outcome: self.outcome,
            turns: self.turn,
            actions: self.log.len(),
            units,
            digest: self.log.digest(),
        }
    }
}

/// Per-unit line of the post-combat report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReport {
    pub id: UnitId,
    pub name: String,
    pub faction: Faction,
    pub damage_dealt: i64,
    /// Health lost since joining; negative when healed above the start.
    pub damage_taken: i32,
    pub remaining_health: i32,
    pub defeated: bool,
}

/// Post-combat report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub outcome: Option<EncounterOutcome>,
    pub turns: u64,
    pub actions: usize,
    pub units: Vec<UnitReport>,
    /// Digest of the action log; equal digests mean identical encounters.
    pub digest: [u8; 32],
}

impl EncounterSummary {
    pub fn survivors(&self, faction: Faction) -> impl Iterator<Item = &UnitReport> {
        self.units
            .iter()
            .filter(move |unit| unit.faction == faction && !unit.defeated)
    }
}
