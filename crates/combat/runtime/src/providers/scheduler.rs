use async_trait::async_trait;

use crate::api::Scheduler;

/// One tick is one trip through the tokio scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn next_tick(&self) {
        tokio::task::yield_now().await;
    }
}
