//! Turning commands into an action for the acting unit.
//!
//! Both human input (through [`super::states::PlayerSelected`]) and intent
//! plans go through [`apply_command`], so a plan can do exactly what a player
//! could.
use combat_core::{
    AbilityId, Action, AttributeKind, LogEntry, PlacementError, Position, UnitId, resolution,
};
use tracing::{debug, warn};

use super::context::{CombatState, StateContext, StateKind};
use super::states::TurnOver;
use crate::api::{CombatCommand, CommandError, Result};

/// What the selecting state does after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectionFlow {
    /// Keep selecting.
    Continue,
    /// Perform the queued action.
    Perform,
    /// End the turn without an action.
    EndTurn,
}

pub(crate) fn apply_command(
    ctx: &mut StateContext<'_>,
    actor: UnitId,
    state: StateKind,
    command: CombatCommand,
) -> Result<SelectionFlow> {
    let presentation = &ctx.collaborators.presentation;
    match command {
        CombatCommand::Move(to) => {
            let field = &mut ctx.encounter.field;
            let unit = field.unit(actor).ok_or(PlacementError::UnknownUnit(actor))?;
            if unit.has_moved() {
                return Err(CommandError::AlreadyMoved(actor).into());
            }
            field.move_unit(actor, to)?;
            if let Some(unit) = field.unit_mut(actor) {
                unit.set_moved(true);
            }
            let encounter = &mut *ctx.encounter;
            if let Some(action) = encounter.action.as_mut() {
                action.path.push(to);
                action.target_tile = None;
                if action.is_self_only() {
                    // The actor is still the target; refresh its preview.
                    resolution::collect_targets(action, actor, &encounter.field)?;
                } else {
                    action.clear_targets();
                    presentation.show_head_to_head(false);
                }
            }
            presentation.remove_highlighted_tiles();
            debug!(unit = %actor, to = %to, "unit moved");
            Ok(SelectionFlow::Continue)
        }
        CombatCommand::Attack => {
            let ability = ctx
                .encounter
                .field
                .unit(actor)
                .and_then(|unit| unit.find_ability(AbilityId::ATTACK))
                .ok_or(PlacementError::UnknownUnit(actor))?;
            select_action(ctx, actor, Action::ability(ability))
        }
        CombatCommand::SelectAbility(id) => {
            let ability = ctx
                .encounter
                .field
                .unit(actor)
                .and_then(|unit| unit.find_ability(id))
                .ok_or(CommandError::UnknownAbility { unit: actor, ability: id })?;
            select_action(ctx, actor, Action::ability(ability))
        }
        CombatCommand::SelectItem(id) => {
            let item = ctx
                .encounter
                .field
                .unit(actor)
                .and_then(|unit| unit.item(id))
                .cloned()
                .ok_or(CommandError::UnknownItem { unit: actor, item: id })?;
            select_action(ctx, actor, Action::item(item))
        }
        CombatCommand::SelectTarget(tile) => {
            let encounter = &mut *ctx.encounter;
            let action = encounter
                .action
                .as_mut()
                .ok_or(CommandError::NoActionSelected)?;
            let caught = resolution::select_target(action, actor, &encounter.field, tile)?;
            presentation.show_head_to_head(caught > 0);
            debug!(unit = %actor, tile = %tile, caught, "target selected");
            Ok(SelectionFlow::Continue)
        }
        CombatCommand::Confirm => {
            let action = ctx
                .encounter
                .action
                .as_ref()
                .ok_or(CommandError::NoActionSelected)?;
            if !action.is_self_only() && action.target_tile.is_none() {
                return Err(CommandError::NoTargetSelected.into());
            }
            Ok(SelectionFlow::Perform)
        }
        CombatCommand::Cancel => {
            ctx.encounter.action = None;
            presentation.remove_highlighted_tiles();
            presentation.clear_head_to_head();
            presentation.show_cursor_and_tile_selector(false);
            Ok(SelectionFlow::Continue)
        }
        CombatCommand::Defend => {
            let combat = &ctx.config.combat;
            let unit = ctx
                .encounter
                .field
                .unit_mut(actor)
                .ok_or(PlacementError::UnknownUnit(actor))?;
            if !unit.apply_modifier(
                AttributeKind::Defense,
                combat.defend_bonus,
                combat.defend_turns,
            ) {
                debug!(unit = %actor, "defend bonus not applied");
            }
            let turn = ctx.encounter.turn;
            ctx.encounter.action = None;
            ctx.encounter.log.record(LogEntry {
                turn,
                actor,
                label: "Defend".into(),
                damage: Vec::new(),
            });
            Ok(SelectionFlow::EndTurn)
        }
        CombatCommand::EndTurn => Ok(SelectionFlow::EndTurn),
        CombatCommand::Abort => Err(CommandError::NotAccepted {
            state,
            command: command.to_string(),
        }
        .into()),
    }
}

/// Queues `action` for `actor` and shows where it can reach.
///
/// Self-only actions gather their target immediately and wait for a
/// confirmation.
fn select_action(
    ctx: &mut StateContext<'_>,
    actor: UnitId,
    mut action: Action,
) -> Result<SelectionFlow> {
    let field = &ctx.encounter.field;
    let unit = field.unit(actor).ok_or(PlacementError::UnknownUnit(actor))?;
    let presentation = &ctx.collaborators.presentation;

    if action.is_self_only() {
        resolution::collect_targets(&mut action, actor, field)?;
        presentation.highlight_tiles(&[unit.position]);
    } else {
        let tiles: Vec<Position> = field.tiles_within(unit.position, action.range(unit));
        presentation.highlight_tiles(&tiles);
        presentation.show_cursor_and_tile_selector(true);
    }
    debug!(unit = %actor, action = %action, "action selected");
    ctx.encounter.action = Some(action);
    Ok(SelectionFlow::Continue)
}

/// Replays `plan` for `actor`, switching to `P` when the plan confirms an
/// action.
///
/// Rejected commands are reported and skipped. A plan that neither confirms
/// nor ends the turn ends it anyway.
pub(crate) fn follow_plan<P>(
    ctx: &mut StateContext<'_>,
    actor: UnitId,
    state: StateKind,
    plan: Vec<CombatCommand>,
) -> Result<()>
where
    P: CombatState + Default + 'static,
{
    for command in plan {
        match apply_command(ctx, actor, state, command) {
            Ok(SelectionFlow::Continue) => {}
            Ok(SelectionFlow::Perform) => return ctx.change_state::<P>(),
            Ok(SelectionFlow::EndTurn) => return ctx.change_state::<TurnOver>(),
            Err(err) if err.is_rejection() => ctx.reject(state, command, &err),
            Err(err) => {
                warn!(unit = %actor, error = %err, "plan failed");
                return Err(err);
            }
        }
    }
    debug!(unit = %actor, "plan ended without ending the turn");
    ctx.encounter.action = None;
    ctx.change_state::<TurnOver>()
}
