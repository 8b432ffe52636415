//! The states of an encounter.
//!
//! ```text
//! InitTurn ──► PlayerSelected ──► PlayerPerformAction ──┐
//!    ▲     └─► EnemySelected  ──► EnemyPerformAction  ──┤
//!    │                 (end turn / defend)              ▼
//!    └────────────────────────────────────────────── TurnOver ──► DisplayPostCombatStats
//! ```
mod init_turn;
mod perform;
mod post_combat;
mod selected;
mod turn_over;

pub use init_turn::InitTurn;
pub use perform::{EnemyPerformAction, PlayerPerformAction};
pub use post_combat::DisplayPostCombatStats;
pub use selected::{EnemySelected, PlayerSelected};
pub use turn_over::TurnOver;
