/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Defense added by the Defend command.
    pub defend_bonus: i32,
    /// Number of the defender's own turn starts the Defend bonus survives.
    pub defend_turns: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of timed modifiers tracked per unit.
    pub const MAX_MODIFIERS: usize = 8;

    // ===== rule constants =====
    /// Weapon range of a unit with nothing equipped.
    pub const DEFAULT_WEAPON_RANGE: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DEFEND_BONUS: i32 = 3;
    pub const DEFAULT_DEFEND_TURNS: u32 = 1;

    pub fn new() -> Self {
        Self {
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
            defend_turns: Self::DEFAULT_DEFEND_TURNS,
        }
    }

    pub fn with_defend(defend_bonus: i32, defend_turns: u32) -> Self {
        Self {
            defend_bonus,
            defend_turns,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
