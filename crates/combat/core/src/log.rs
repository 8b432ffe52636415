//! Replay log of resolved actions.
//!
//! Every applied action is appended as a [`LogEntry`]. The log's
//! [`ActionLog::digest`] commits to the whole encounter, so two runs of the
//! same scenario with the same decisions produce the same digest.

use sha2::{Digest, Sha256};

use crate::state::UnitId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u64,
    pub actor: UnitId,
    pub label: String,
    /// Damage per target in target id order.
    pub damage: Vec<(UnitId, i32)>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total damage `unit` queued against its targets.
    pub fn damage_dealt_by(&self, unit: UnitId) -> i64 {
        self.entries
            .iter()
            .filter(|entry| entry.actor == unit)
            .flat_map(|entry| entry.damage.iter())
            .map(|(_, amount)| i64::from(*amount))
            .sum()
    }

    /// SHA-256 over the canonical little-endian encoding of every entry.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.entries.len() as u64).to_le_bytes());
        for entry in &self.entries {
            hasher.update(entry.turn.to_le_bytes());
            hasher.update(entry.actor.0.to_le_bytes());
            hasher.update((entry.label.len() as u32).to_le_bytes());
            hasher.update(entry.label.as_bytes());
            hasher.update((entry.damage.len() as u32).to_le_bytes());
            for (target, amount) in &entry.damage {
                hasher.update(target.0.to_le_bytes());
                hasher.update(amount.to_le_bytes());
            }
        }
        hasher.finalize().into()
    }
}
