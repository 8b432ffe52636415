use async_trait::async_trait;
use tracing::info;

use crate::api::Result;
use crate::events::CombatEvent;
use crate::machine::{CombatState, StateContext, StateKind};

/// Terminal state: builds and shows the post-combat report.
#[derive(Debug, Default)]
pub struct DisplayPostCombatStats;

#[async_trait]
impl CombatState for DisplayPostCombatStats {
    fn kind(&self) -> StateKind {
        StateKind::DisplayPostCombatStats
    }

    async fn enter(&mut self, ctx: &mut StateContext<'_>) -> Result<()> {
        let presentation = &ctx.collaborators.presentation;
        presentation.remove_highlighted_tiles();
        presentation.show_cursor_and_tile_selector(false);
        ctx.collaborators.music.transition_music(true);

        let encounter = &mut *ctx.encounter;
        if let Some(unit) = encounter.highlighted_unit.take()
            && let Some(unit) = encounter.field.unit_mut(unit)
        {
            unit.deactivate_menu();
        }
        let summary = encounter.summarize();
        info!(
            outcome = ?summary.outcome,
            turns = summary.turns,
            actions = summary.actions,
            "encounter ended"
        );
        presentation.show_post_combat_stats(&summary);
        encounter.summary = Some(summary.clone());
        ctx.publish(CombatEvent::EncounterEnded { summary });
        Ok(())
    }
}
