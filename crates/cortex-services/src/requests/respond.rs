use cortex_contracts::Relationship;
use cortex_core::{Id, OpResult};
use cortex_models::Decision;

use crate::base::ServiceContext;
use crate::lifecycle::RequestLifecycle;
use crate::store::{CollaborationStore, Resolution};

/// respondToRequest: the recipient accepts or declines, exactly once
///
/// The pending check here only short-circuits the obvious case; the store
/// re-checks it atomically, so of two racing responses exactly one wins and
/// the other gets `AlreadyResolved`.
pub struct RespondToRequestService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> RespondToRequestService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, request_id: Id, decision: Decision) -> OpResult<Resolution> {
        let request = self.ctx.request(request_id).await?;
        self.ctx.require(&request, Relationship::Recipient)?;
        RequestLifecycle::ensure_pending(&request)?;

        let resolution = self.ctx.store.resolve_request(request_id, decision).await?;
        tracing::info!(
            request_id,
            project_id = request.project_id,
            %decision,
            collaboration_id = resolution.collaboration.as_ref().map(|c| c.id),
            project_status = %resolution.project_status,
            "request resolved"
        );
        Ok(resolution)
    }
}
