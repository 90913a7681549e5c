use cortex_contracts::RequestContract;
use cortex_core::{Id, OpError, OpResult};
use cortex_models::{CollaborationRequest, NewCollaborationRequest, RequestKind};

use crate::base::{validate, ServiceContext};
use crate::lifecycle::RequestLifecycle;
use crate::store::CollaborationStore;

/// createRequest: the caller applies to join a project
///
/// The request is addressed to the project owner. It is accepted whatever
/// the project's status, so an active project can keep a backlog.
pub struct CreateRequestService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> CreateRequestService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, project_id: Id, message: Option<String>) -> OpResult<CollaborationRequest> {
        let project = self.ctx.project(project_id).await?;
        let request = NewCollaborationRequest {
            project_id,
            sender_id: self.ctx.caller,
            recipient_id: project.owner_id,
            kind: RequestKind::Application,
            message: message.unwrap_or_default(),
        };

        RequestLifecycle::check_create(&project, &request).inspect_err(|_| {
            tracing::debug!(project_id, caller_id = self.ctx.caller, "self request rejected")
        })?;
        validate(&RequestContract, &request)?;
        if self.ctx.store.find_user(self.ctx.caller).await?.is_none() {
            return Err(OpError::not_found("User", self.ctx.caller));
        }

        let created = self.ctx.store.insert_request(request).await?;
        tracing::info!(
            request_id = created.id,
            project_id,
            sender_id = created.sender_id,
            "collaboration request created"
        );
        Ok(created)
    }
}
