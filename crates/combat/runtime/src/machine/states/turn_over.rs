use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{TileMap, Unit, is_enemy_nearby};
use tracing::{debug, info};

use super::{DisplayPostCombatStats, InitTurn};
use crate::api::Result;
use crate::encounter::EncounterOutcome;
use crate::events::CombatEvent;
use crate::machine::{CombatState, StateContext, StateKind};

/// End-of-turn bookkeeping.
///
/// Waits one scheduling tick, updates the music tension, then either ends
/// the encounter or sends the acting unit to the back of the turn order.
#[derive(Debug, Default)]
pub struct TurnOver;

#[async_trait]
impl CombatState for TurnOver {
    fn kind(&self) -> StateKind {
        StateKind::TurnOver
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let scheduler = Arc::clone(&ctx.collaborators.scheduler);
        scheduler.next_tick().await;

        let actor = ctx.actor(self.kind())?;
        let collaborators = ctx.collaborators;
        let encounter = &mut *ctx.encounter;

        if encounter
            .field
            .unit(actor)
            .is_some_and(Unit::is_player_controlled)
        {
            collaborators.presentation.play_confirmation();
        }

        let field = &encounter.field;
        let units = encounter
            .turn_order
            .all_units()
            .iter()
            .filter_map(|id| field.unit(*id));
        let nearby = is_enemy_nearby(units, field);
        collaborators.music.transition_music(!nearby);
        if nearby != encounter.tense {
            encounter.tense = nearby;
            debug!(tense = nearby, "tension changed");
            ctx.events.publish(CombatEvent::TensionChanged { tense: nearby });
        }

        let outcome = if encounter.field.are_all_enemies_defeated() {
            Some(EncounterOutcome::Victory)
        } else if encounter.field.are_all_allies_defeated() {
            Some(EncounterOutcome::Defeat)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            info!(%outcome, turn = encounter.turn, "encounter decided");
            encounter.outcome.get_or_insert(outcome);
            return ctx.change_state::<DisplayPostCombatStats>();
        }

        if let Some(unit) = encounter.field.unit_mut(actor) {
            unit.deactivate_menu();
        }
        collaborators.presentation.remove_highlighted_tiles();
        if encounter.turn_order.finish_turn(actor) {
            ctx.events.publish(CombatEvent::TurnFinished { unit: actor });
        } else {
            debug!(unit = %actor, "acting unit already left the turn order");
        }
        encounter.highlighted_unit = None;
        ctx.change_state::<InitTurn>()
    }
}
