use cortex_contracts::{CheckinContract, Relationship};
use cortex_core::{Id, OpResult};
use cortex_models::{Checkin, NewCheckin};

use crate::base::{validate, ServiceContext};
use crate::store::CollaborationStore;

/// Append a check-in; either participant may write
pub struct PostCheckinService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> PostCheckinService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, collaboration_id: Id, mut checkin: NewCheckin) -> OpResult<Checkin> {
        let detail = self.ctx.collaboration(collaboration_id).await?;
        self.ctx.require(&detail, Relationship::Participant)?;
        validate(&CheckinContract, &checkin)?;
        checkin.completed = checkin.completed.trim().to_string();
        checkin.blocked = checkin.blocked.trim().to_string();
        checkin.next_steps = checkin.next_steps.trim().to_string();

        let created = self
            .ctx
            .store
            .insert_checkin(collaboration_id, self.ctx.caller, checkin)
            .await?;
        tracing::info!(checkin_id = created.id, collaboration_id, author_id = self.ctx.caller, "check-in posted");
        Ok(created)
    }
}

/// Check-ins of a collaboration, newest first
pub struct ListCheckinsService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> ListCheckinsService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, collaboration_id: Id) -> OpResult<Vec<Checkin>> {
        let detail = self.ctx.collaboration(collaboration_id).await?;
        self.ctx.require(&detail, Relationship::Participant)?;
        self.ctx.store.checkins(collaboration_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborations::CollaborationDetailService;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_core::{Denial, OpError};
    use cortex_models::{Decision, NewCollaborationRequest, RequestKind};

    async fn collaboration(store: &MemoryStore) -> Id {
        store.insert_user(profiled_user(1, "Owner"));
        store.insert_user(profiled_user(2, "Member"));
        let project = store.insert_project(new_project(1)).await.unwrap();
        let request = store
            .insert_request(NewCollaborationRequest {
                project_id: project.id,
                sender_id: 2,
                recipient_id: 1,
                kind: RequestKind::Application,
                message: String::new(),
            })
            .await
            .unwrap();
        let resolution = store.resolve_request(request.id, Decision::Accepted).await.unwrap();
        resolution.collaboration.unwrap().id
    }

    fn note(completed: &str) -> NewCheckin {
        NewCheckin {
            completed: completed.into(),
            blocked: String::new(),
            next_steps: "ship it".into(),
        }
    }

    #[tokio::test]
    async fn test_participants_post_and_read() {
        let store = MemoryStore::new();
        let id = collaboration(&store).await;

        PostCheckinService::new(ServiceContext::new(&store, 2))
            .call(id, note("  schema done "))
            .await
            .unwrap();
        PostCheckinService::new(ServiceContext::new(&store, 1))
            .call(id, note("reviewed"))
            .await
            .unwrap();

        let checkins = ListCheckinsService::new(ServiceContext::new(&store, 2))
            .call(id)
            .await
            .unwrap();
        assert_eq!(checkins.len(), 2);
        assert_eq!(checkins[0].user_name, "Owner");
        assert_eq!(checkins[1].completed, "schema done");
    }

    #[tokio::test]
    async fn test_outsiders_denied() {
        let store = MemoryStore::new();
        let id = collaboration(&store).await;

        let err = PostCheckinService::new(ServiceContext::new(&store, 3))
            .call(id, note("sneaky"))
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotParticipant)));

        let err = CollaborationDetailService::new(ServiceContext::new(&store, 3))
            .call(id)
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotParticipant)));

        let detail = CollaborationDetailService::new(ServiceContext::new(&store, 1))
            .call(id)
            .await
            .unwrap();
        assert_eq!(detail.collaborator_name, "Member");
    }

    #[tokio::test]
    async fn test_blank_checkin_rejected() {
        let store = MemoryStore::new();
        let id = collaboration(&store).await;
        let err = PostCheckinService::new(ServiceContext::new(&store, 2))
            .call(id, note("   "))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
    }
}
