//! Cloneable façade for steering a running encounter.
use tokio::sync::{broadcast, mpsc};

use super::command::CombatCommand;
use super::errors::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus};

/// Client-facing handle to a [`crate::CombatStateMachine`].
#[derive(Clone)]
pub struct CombatHandle {
    command_tx: mpsc::Sender<CombatCommand>,
    event_bus: EventBus,
}

impl CombatHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<CombatCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Queues a command for the machine.
    pub async fn send(&self, command: CombatCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Stops the encounter; whatever the current state awaits is cancelled.
    pub async fn abort(&self) -> Result<()> {
        self.send(CombatCommand::Abort).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.event_bus.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}
