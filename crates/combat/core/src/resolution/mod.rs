//! Targeting and resolution of actions against the battlefield.
//!
//! Resolution runs in three steps, each of which may be repeated:
//!
//! 1. [`select_target`] / [`collect_targets`] validate the aim and gather the
//!    units caught by the action, queueing a damage preview for each.
//! 2. [`resolve`] recomputes the per-target damage and effect maps from the
//!    current attributes. Re-running it yields the same maps.
//! 3. [`apply`] writes the maps into the roster: health loss, effects,
//!    defeats and item consumption.

mod damage;

pub use damage::ability_damage;

use crate::ability::{Effect, TargetType};
use crate::action::{Action, ActionKind};
use crate::attribute::AttributeKind;
use crate::board::{Battlefield, TileMap};
use crate::error::ResolveError;
use crate::state::{Position, UnitId};

/// Outcome of applying a resolved action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Targets whose health reached zero, in id order.
    pub defeated: Vec<UnitId>,
    /// Health actually removed across all targets.
    pub total_damage: u32,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.defeated.is_empty() && self.total_damage == 0
    }
}

/// Aims `action` at `tile` and gathers its targets.
///
/// Returns the number of units caught.
pub fn select_target(
    action: &mut Action,
    actor: UnitId,
    field: &Battlefield,
    tile: Position,
) -> Result<usize, ResolveError> {
    if action.is_self_only() {
        return Err(ResolveError::SelfOnly);
    }
    let unit = field.unit(actor).ok_or(ResolveError::UnknownUnit(actor))?;
    if !field.is_inside_boundary(tile.x, tile.z) {
        return Err(ResolveError::OutOfBoundary { tile });
    }
    let distance = unit.position.distance(tile);
    let range = action.range(unit);
    if distance > range {
        return Err(ResolveError::OutOfRange {
            tile,
            distance,
            range,
        });
    }
    action.target_tile = Some(tile);
    collect_targets(action, actor, field)
}

/// Rebuilds the target list from the action's current aim.
///
/// Self-only actions target the actor. Other actions catch every living unit
/// within the area of effect around the target tile whose faction matches the
/// ability's target type; without a target tile nothing is caught.
pub fn collect_targets(
    action: &mut Action,
    actor: UnitId,
    field: &Battlefield,
) -> Result<usize, ResolveError> {
    let unit = field.unit(actor).ok_or(ResolveError::UnknownUnit(actor))?;
    action.clear_targets();

    let caught: Vec<UnitId> = if action.is_self_only() {
        vec![actor]
    } else if let Some(tile) = action.target_tile {
        let wants_allies = action
            .as_ability()
            .is_some_and(|ability| ability.target_type == TargetType::Ally);
        field
            .units_within(tile, action.aoe_range(unit))
            .into_iter()
            .filter(|id| {
                field.unit(*id).is_some_and(|other| {
                    if wants_allies {
                        other.faction == unit.faction
                    } else {
                        unit.faction.opposes(other.faction)
                    }
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    for target in &caught {
        let damage = preview_damage(action, actor, *target, field)?;
        action.add_target(*target, damage);
    }
    Ok(caught.len())
}

fn preview_damage(
    action: &Action,
    actor: UnitId,
    target: UnitId,
    field: &Battlefield,
) -> Result<i32, ResolveError> {
    let ActionKind::Ability(ability) = action.kind() else {
        return Ok(0);
    };
    let attacker = field.unit(actor).ok_or(ResolveError::UnknownUnit(actor))?;
    let defender = field.unit(target).ok_or(ResolveError::UnknownUnit(target))?;
    Ok(ability_damage(ability, attacker, defender))
}

/// Computes the damage and effect maps for the current targets.
///
/// Both maps are cleared first, so resolving twice gives the same result. An
/// action without targets resolves to empty maps.
pub fn resolve(
    action: &mut Action,
    actor: UnitId,
    field: &Battlefield,
) -> Result<(), ResolveError> {
    action.clear_results();
    let targets = action.targets().to_vec();
    action.clear_targets();

    let effects = match action.kind() {
        ActionKind::Ability(ability) => ability.effects.clone(),
        ActionKind::Item(item) => item.effects.clone(),
    };
    for target in targets {
        let damage = preview_damage(action, actor, target, field)?;
        action.add_target(target, damage);
        action.add_damage_by_unit(target, damage);
        action.add_effects_by_unit(target, effects.clone());
    }
    Ok(())
}

/// Writes a resolved action into the battlefield.
///
/// Damage lands first. Targets reduced to zero health are defeated and leave
/// their tile; survivors then receive the action's effects. Item actions use
/// up one of the item.
pub fn apply(
    action: &Action,
    actor: UnitId,
    field: &mut Battlefield,
) -> Result<Resolution, ResolveError> {
    if field.unit(actor).is_none() {
        return Err(ResolveError::UnknownUnit(actor));
    }
    let mut resolution = Resolution::default();

    for (&target, &damage) in action.damage_by_unit() {
        let unit = field
            .unit_mut(target)
            .ok_or(ResolveError::UnknownUnit(target))?;
        // Units without Health cannot be wounded; effects still land.
        if let Some(health) = unit.attributes.get_mut(AttributeKind::Health) {
            resolution.total_damage += health.deplete(damage.max(0) as u32);
            if health.current() <= 0 && !unit.is_defeated() {
                unit.mark_defeated();
                let position = unit.position;
                field.clear_tile(position);
                resolution.defeated.push(target);
                continue;
            }
        }

        for effect in effects_for(action, target) {
            apply_effect(*effect, actor, target, field)?;
        }
    }

    if let ActionKind::Item(item) = action.kind() {
        if let Some(unit) = field.unit_mut(actor) {
            unit.consume_item(item.id);
        }
    }
    Ok(resolution)
}

fn effects_for(action: &Action, target: UnitId) -> &[Effect] {
    action
        .effects_by_unit()
        .get(&target)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn apply_effect(
    effect: Effect,
    actor: UnitId,
    target: UnitId,
    field: &mut Battlefield,
) -> Result<(), ResolveError> {
    let unit = field
        .unit_mut(target)
        .ok_or(ResolveError::UnknownUnit(target))?;
    match effect {
        Effect::Restore { attribute, amount } => {
            if let Some(value) = unit.attributes.get_mut(attribute) {
                value.restore(amount);
            }
        }
        Effect::Modify {
            attribute,
            amount,
            turns,
        } => {
            unit.apply_modifier(attribute, amount, turns);
        }
        Effect::Drain { attribute, amount } => {
            let drained = unit
                .attributes
                .get_mut(attribute)
                .map_or(0, |value| value.deplete(amount));
            if let Some(value) = field
                .unit_mut(actor)
                .and_then(|unit| unit.attributes.get_mut(attribute))
            {
                value.restore(drained);
            }
        }
    }
    Ok(())
}
