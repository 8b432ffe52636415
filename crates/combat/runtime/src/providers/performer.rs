use async_trait::async_trait;
use combat_core::{Action, Battlefield, Resolution, UnitId, resolution};

use crate::api::{ActionPerformer, Result};

/// Resolves and applies actions with no animation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolvingPerformer;

#[async_trait]
impl ActionPerformer for ResolvingPerformer {
    async fn perform(
        &self,
        action: &mut Action,
        actor: UnitId,
        field: &mut Battlefield,
    ) -> Result<Resolution> {
        resolution::resolve(action, actor, field)?;
        Ok(resolution::apply(action, actor, field)?)
    }
}
