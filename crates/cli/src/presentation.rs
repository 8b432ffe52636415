//! Headless collaborators that turn UI and audio cues into log lines.
use combat_core::Position;
use combat_runtime::{EncounterSummary, MusicController, Presentation};
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresentation;

impl Presentation for TracingPresentation {
    fn play_confirmation(&self) {
        trace!("cue: confirmation");
    }

    fn show_cursor_and_tile_selector(&self, visible: bool) {
        trace!(visible, "cursor");
    }

    fn highlight_tiles(&self, tiles: &[Position]) {
        debug!(tiles = tiles.len(), "highlighting tiles");
    }

    fn show_post_combat_stats(&self, summary: &EncounterSummary) {
        for unit in &summary.units {
            info!(
                unit = %unit.id,
                name = %unit.name,
                dealt = unit.damage_dealt,
                taken = unit.damage_taken,
                defeated = unit.defeated,
                "post-combat"
            );
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMusic;

impl MusicController for TracingMusic {
    fn transition_music(&self, calm: bool) {
        debug!(calm, "music transition");
    }
}
