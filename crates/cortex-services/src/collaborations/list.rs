use cortex_core::OpResult;
use cortex_models::CollaborationOverview;

use crate::base::ServiceContext;
use crate::store::CollaborationStore;

/// listCollaborations: the caller's collaborations on both sides
pub struct ListCollaborationsService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> ListCollaborationsService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self) -> OpResult<CollaborationOverview> {
        self.ctx.store.collaboration_overview(self.ctx.caller).await
    }
}
