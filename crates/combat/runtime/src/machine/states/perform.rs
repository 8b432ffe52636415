use std::sync::Arc;

use async_trait::async_trait;
use combat_core::LogEntry;
use tracing::info;

use super::TurnOver;
use crate::api::{Result, StateMachineError};
use crate::events::CombatEvent;
use crate::machine::{CombatState, StateContext, StateKind};

/// Performs the player's confirmed action.
///
/// Clears the selection UI first, then waits for the performer.
#[derive(Debug, Default)]
pub struct PlayerPerformAction;

#[async_trait]
impl CombatState for PlayerPerformAction {
    fn kind(&self) -> StateKind {
        StateKind::PlayerPerformAction
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let presentation = &ctx.collaborators.presentation;
        presentation.play_confirmation();
        presentation.clear_action_targets();
        presentation.show_head_to_head(false);
        presentation.clear_head_to_head();
        presentation.show_cursor_and_tile_selector(false);
        presentation.clear_selection_indicators();
        perform(ctx, self.kind()).await
    }
}

#[derive(Debug, Default)]
pub struct EnemyPerformAction;

#[async_trait]
impl CombatState for EnemyPerformAction {
    fn kind(&self) -> StateKind {
        StateKind::EnemyPerformAction
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let presentation = &ctx.collaborators.presentation;
        presentation.clear_action_targets();
        presentation.clear_head_to_head();
        presentation.clear_selection_indicators();
        perform(ctx, self.kind()).await
    }
}

/// Hands the queued action to the performer and records what it did.
async fn perform(ctx: &mut StateContext<'_>, state: StateKind) -> Result<()> {
    let actor = ctx.actor(state)?;
    let mut action = ctx
        .encounter
        .action
        .take()
        .ok_or(StateMachineError::MissingAction { unit: actor })?;

    let performer = Arc::clone(&ctx.collaborators.performer);
    let resolution = performer
        .perform(&mut action, actor, &mut ctx.encounter.field)
        .await?;

    let encounter = &mut *ctx.encounter;
    let damage = action.damage_by_unit().clone();
    encounter.log.record(LogEntry {
        turn: encounter.turn,
        actor,
        label: action.label().to_owned(),
        damage: damage.iter().map(|(unit, amount)| (*unit, *amount)).collect(),
    });
    info!(
        actor = %actor,
        action = %action,
        targets = damage.len(),
        total_damage = resolution.total_damage,
        "action resolved"
    );

    encounter.turn_order.remove_defeated(encounter.field.roster());
    for unit in &resolution.defeated {
        info!(unit = %unit, "unit defeated");
        ctx.events.publish(CombatEvent::UnitDefeated { unit: *unit });
    }
    ctx.publish(CombatEvent::ActionResolved {
        actor,
        label: action.label().to_owned(),
        damage,
    });
    ctx.encounter.last_action = Some(action);
    ctx.change_state::<TurnOver>()
}
