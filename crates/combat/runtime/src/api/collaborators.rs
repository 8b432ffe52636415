//! Seams between the state machine and the outside world.
//!
//! Rendering, audio, animation and decision making are not part of the
//! machine. States reach them only through [`Collaborators`], which the
//! machine receives at construction.
use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{Action, Battlefield, Position, Resolution, UnitId};

use super::command::CombatCommand;
use super::errors::Result;
use crate::encounter::{Encounter, EncounterSummary};
use crate::providers::{NearestTargetIntent, ResolvingPerformer, TokioScheduler};

/// UI-facing side effects. Every method defaults to doing nothing.
pub trait Presentation: Send + Sync {
    fn play_confirmation(&self) {}

    /// Drops target markers for the resolved action.
    fn clear_action_targets(&self) {}

    fn show_head_to_head(&self, _visible: bool) {}

    fn clear_head_to_head(&self) {}

    fn show_cursor_and_tile_selector(&self, _visible: bool) {}

    fn clear_selection_indicators(&self) {}

    fn highlight_tiles(&self, _tiles: &[Position]) {}

    fn remove_highlighted_tiles(&self) {}

    fn show_post_combat_stats(&self, _summary: &EncounterSummary) {}
}

/// Ambient music control: calm when no opposing units are close.
pub trait MusicController: Send + Sync {
    fn transition_music(&self, calm: bool);
}

/// Carries out an action: animation, targeting feedback and resolution.
///
/// The machine waits for `perform` to finish before leaving the perform
/// state. When the machine is aborted the future is dropped.
#[async_trait]
pub trait ActionPerformer: Send + Sync {
    async fn perform(
        &self,
        action: &mut Action,
        actor: UnitId,
        field: &mut Battlefield,
    ) -> Result<Resolution>;
}

/// Source of scheduling ticks for states that defer work by one step.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn next_tick(&self);
}

/// Decides what a unit does on its turn.
///
/// The returned plan is replayed command by command exactly as if a player
/// had sent it; a plan that never confirms nor ends the turn ends it
/// implicitly.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    async fn plan(&self, unit: UnitId, encounter: &Encounter) -> Result<Vec<CombatCommand>>;
}

/// Presentation that ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}

/// Music controller that ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMusic;

impl MusicController for NullMusic {
    fn transition_music(&self, _calm: bool) {}
}

/// Everything a state may call out to.
#[derive(Clone)]
pub struct Collaborators {
    pub presentation: Arc<dyn Presentation>,
    pub music: Arc<dyn MusicController>,
    pub performer: Arc<dyn ActionPerformer>,
    pub scheduler: Arc<dyn Scheduler>,
    /// Plans enemy turns.
    pub intent: Arc<dyn IntentProvider>,
    /// Plans player turns when set; otherwise the machine waits for commands.
    pub autopilot: Option<Arc<dyn IntentProvider>>,
}

impl Collaborators {
    #[must_use]
    pub fn with_presentation(mut self, presentation: Arc<dyn Presentation>) -> Self {
        self.presentation = presentation;
        self
    }

    #[must_use]
    pub fn with_music(mut self, music: Arc<dyn MusicController>) -> Self {
        self.music = music;
        self
    }

    #[must_use]
    pub fn with_performer(mut self, performer: Arc<dyn ActionPerformer>) -> Self {
        self.performer = performer;
        self
    }

    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    #[must_use]
    pub fn with_intent(mut self, intent: Arc<dyn IntentProvider>) -> Self {
        self.intent = intent;
        self
    }

    #[must_use]
    pub fn with_autopilot(mut self, autopilot: Arc<dyn IntentProvider>) -> Self {
        self.autopilot = Some(autopilot);
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            presentation: Arc::new(NullPresentation),
            music: Arc::new(NullMusic),
            performer: Arc::new(ResolvingPerformer),
            scheduler: Arc::new(TokioScheduler),
            intent: Arc::new(NearestTargetIntent),
            autopilot: None,
        }
    }
}
