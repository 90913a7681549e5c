use cortex_core::OpResult;
use cortex_models::RequestView;

use crate::base::ServiceContext;
use crate::store::CollaborationStore;

/// The caller's request inboxes
pub struct InboxService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> InboxService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    /// Pending requests waiting on the caller's answer
    pub async fn incoming(&self) -> OpResult<Vec<RequestView>> {
        self.ctx.store.incoming_requests(self.ctx.caller).await
    }

    /// Everything the caller has sent, resolved or not
    pub async fn outgoing(&self) -> OpResult<Vec<RequestView>> {
        self.ctx.store.outgoing_requests(self.ctx.caller).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_models::{Decision, NewCollaborationRequest, RequestKind};

    #[tokio::test]
    async fn test_incoming_only_pending() {
        let store = MemoryStore::new();
        store.insert_user(profiled_user(1, "Owner"));
        store.insert_user(profiled_user(2, "Applicant"));
        let project = store.insert_project(new_project(1)).await.unwrap();
        let first = store
            .insert_request(NewCollaborationRequest {
                project_id: project.id,
                sender_id: 2,
                recipient_id: 1,
                kind: RequestKind::Application,
                message: String::new(),
            })
            .await
            .unwrap();
        store.resolve_request(first.id, Decision::Declined).await.unwrap();
        store
            .insert_request(NewCollaborationRequest {
                project_id: project.id,
                sender_id: 2,
                recipient_id: 1,
                kind: RequestKind::Application,
                message: "again".into(),
            })
            .await
            .unwrap();

        let incoming = InboxService::new(ServiceContext::new(&store, 1)).incoming().await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].request.message, "again");
        assert_eq!(incoming[0].sender_name, "Applicant");
        assert_eq!(incoming[0].project_name, "Harbor");

        let outgoing = InboxService::new(ServiceContext::new(&store, 2)).outgoing().await.unwrap();
        assert_eq!(outgoing.len(), 2);
    }
}
