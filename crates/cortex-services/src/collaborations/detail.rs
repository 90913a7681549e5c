use cortex_contracts::Relationship;
use cortex_core::{Id, OpResult};
use cortex_models::CollaborationDetail;

use crate::base::ServiceContext;
use crate::store::CollaborationStore;

/// A single collaboration, visible to its two participants only
pub struct CollaborationDetailService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> CollaborationDetailService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, collaboration_id: Id) -> OpResult<CollaborationDetail> {
        let detail = self.ctx.collaboration(collaboration_id).await?;
        self.ctx.require(&detail, Relationship::Participant)?;
        Ok(detail)
    }
}
