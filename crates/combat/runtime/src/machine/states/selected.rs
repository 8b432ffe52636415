use std::sync::Arc;

use async_trait::async_trait;

use super::{EnemyPerformAction, PlayerPerformAction, TurnOver};
use crate::api::{CombatCommand, Result};
use crate::events::CombatEvent;
use crate::machine::selection::{SelectionFlow, apply_command, follow_plan};
use crate::machine::{CombatState, StateContext, StateKind};

/// A player unit is choosing what to do.
///
/// With an autopilot configured the turn is planned immediately; otherwise
/// the state waits for commands.
#[derive(Debug, Default)]
pub struct PlayerSelected;

#[async_trait]
impl CombatState for PlayerSelected {
    fn kind(&self) -> StateKind {
        StateKind::PlayerSelected
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let actor = ctx.actor(self.kind())?;
        if let Some(autopilot) = ctx.collaborators.autopilot.as_ref().map(Arc::clone) {
            let plan = autopilot.plan(actor, ctx.encounter).await?;
            return follow_plan::<PlayerPerformAction>(ctx, actor, self.kind(), plan);
        }

        ctx.collaborators
            .presentation
            .show_cursor_and_tile_selector(true);
        ctx.publish(CombatEvent::AwaitingCommand { unit: actor });
        Ok(())
    }

    async fn handle(&mut self, ctx: &mut StateContext<'_>, command: CombatCommand) -> Result<()> {
        let actor = ctx.actor(self.kind())?;
        match apply_command(ctx, actor, self.kind(), command)? {
            SelectionFlow::Continue => Ok(()),
            SelectionFlow::Perform => ctx.change_state::<PlayerPerformAction>(),
            SelectionFlow::EndTurn => ctx.change_state::<TurnOver>(),
        }
    }
}

/// An enemy unit plans and queues its turn.
#[derive(Debug, Default)]
pub struct EnemySelected;

#[async_trait]
impl CombatState for EnemySelected {
    fn kind(&self) -> StateKind {
        StateKind::EnemySelected
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let actor = ctx.actor(self.kind())?;
        let intent = Arc::clone(&ctx.collaborators.intent);
        let plan = intent.plan(actor, ctx.encounter).await?;
        follow_plan::<EnemyPerformAction>(ctx, actor, self.kind(), plan)
    }
}
