use combat_core::CombatConfig;

/// Tunables for a [`crate::CombatStateMachine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Turns started before the encounter ends in a stalemate; `None` never
    /// stops early.
    pub max_turns: Option<u64>,
}

impl RuntimeConfig {
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = Some(max_turns);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            command_buffer_size: 32,
            event_buffer_size: 100,
            max_turns: None,
        }
    }
}
