//! Single-channel event bus.

use tokio::sync::broadcast;

use super::types::CombatEvent;

/// Best-effort broadcast of [`CombatEvent`]s.
///
/// Publishing never blocks the state machine; events sent while nobody is
/// subscribed are dropped.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: CombatEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("no subscribers for combat event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CombatEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
