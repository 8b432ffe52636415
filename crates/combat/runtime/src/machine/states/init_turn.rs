use async_trait::async_trait;
use combat_core::TileMap;
use tracing::{debug, info};

use super::{DisplayPostCombatStats, EnemySelected, PlayerSelected};
use crate::api::Result;
use crate::encounter::EncounterOutcome;
use crate::events::CombatEvent;
use crate::machine::{CombatState, StateContext, StateKind};

/// Picks the next unit and prepares its turn.
///
/// Defeated units at the head of the order are dropped first. Timed
/// modifiers count down here, at the start of their owner's turn.
#[derive(Debug, Default)]
pub struct InitTurn;

#[async_trait]
impl CombatState for InitTurn {
    fn kind(&self) -> StateKind {
        StateKind::InitTurn
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let encounter = &mut *ctx.encounter;
        let dropped = encounter.turn_order.remove_defeated(encounter.field.roster());
        if !dropped.is_empty() {
            debug!(?dropped, "removed defeated units from the turn order");
        }

        let Some(unit) = encounter.turn_order.next_up() else {
            let outcome = if encounter.field.are_all_allies_defeated() {
                EncounterOutcome::Defeat
            } else if encounter.field.are_all_enemies_defeated() {
                EncounterOutcome::Victory
            } else {
                EncounterOutcome::Stalemate
            };
            info!(%outcome, "turn order is empty");
            encounter.outcome.get_or_insert(outcome);
            return ctx.change_state::<DisplayPostCombatStats>();
        };

        if let Some(max_turns) = ctx.config.max_turns
            && encounter.turn >= max_turns
        {
            info!(max_turns, "turn limit reached");
            encounter.outcome.get_or_insert(EncounterOutcome::Stalemate);
            return ctx.change_state::<DisplayPostCombatStats>();
        }

        encounter.turn += 1;
        encounter.highlighted_unit = Some(unit);
        encounter.action = None;

        let mut player = false;
        if let Some(actor) = encounter.field.unit_mut(unit) {
            let expired = actor.tick_modifiers();
            if expired > 0 {
                debug!(unit = %unit, expired, "modifiers expired");
            }
            actor.set_moved(false);
            player = actor.is_player_controlled();
            if player {
                actor.activate_menu();
            }
        }

        let turn = encounter.turn;
        debug!(unit = %unit, turn, "turn started");
        ctx.publish(CombatEvent::TurnStarted { unit, turn });

        if player {
            ctx.change_state::<PlayerSelected>()
        } else {
            ctx.change_state::<EnemySelected>()
        }
    }
}
