use async_trait::async_trait;
use combat_core::{Position, Unit, UnitId};

use crate::api::{CombatCommand, IntentProvider, Result};
use crate::encounter::Encounter;

/// Closes in on the nearest opposing unit and attacks it with the basic
/// attack.
///
/// Ties between targets go to the lower id; ties between destination tiles go
/// to the first tile in row-major order. The plan only depends on the board,
/// so replays of the same encounter repeat the same moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestTargetIntent;

impl NearestTargetIntent {
    fn nearest_target<'a>(actor: &Unit, encounter: &'a Encounter) -> Option<&'a Unit> {
        encounter
            .field
            .roster()
            .iter()
            .filter(|unit| !unit.is_defeated() && actor.faction.opposes(unit.faction))
            .min_by_key(|unit| (actor.position.distance(unit.position), unit.id))
    }

    /// Reachable free tile closest to `target`, or the actor's own tile.
    fn approach(actor: &Unit, target: Position, encounter: &Encounter) -> Position {
        let field = &encounter.field;
        field
            .tiles_within(actor.position, actor.movement())
            .into_iter()
            .filter(|tile| field.occupant_at(*tile).is_none_or(|id| id == actor.id))
            .min_by_key(|tile| tile.distance(target))
            .unwrap_or(actor.position)
    }
}

#[async_trait]
impl IntentProvider for NearestTargetIntent {
    async fn plan(&self, unit: UnitId, encounter: &Encounter) -> Result<Vec<CombatCommand>> {
        let Some(actor) = encounter.field.unit(unit) else {
            return Ok(vec![CombatCommand::EndTurn]);
        };
        let Some(target) = Self::nearest_target(actor, encounter) else {
            return Ok(vec![CombatCommand::EndTurn]);
        };

        let range = actor.weapon_range();
        let attack = [
            CombatCommand::Attack,
            CombatCommand::SelectTarget(target.position),
            CombatCommand::Confirm,
        ];
        if actor.position.distance(target.position) <= range {
            return Ok(attack.to_vec());
        }

        let destination = Self::approach(actor, target.position, encounter);
        let mut plan = Vec::with_capacity(4);
        if destination != actor.position && !actor.has_moved() {
            plan.push(CombatCommand::Move(destination));
        }
        if destination.distance(target.position) <= range {
            plan.extend(attack);
        } else {
            plan.push(CombatCommand::EndTurn);
        }
        Ok(plan)
    }
}
