use cortex_contracts::{Relationship, RequestContract};
use cortex_core::{Id, OpError, OpResult};
use cortex_models::{CollaborationRequest, NewCollaborationRequest, RequestKind};

use crate::base::{validate, ServiceContext};
use crate::lifecycle::RequestLifecycle;
use crate::store::CollaborationStore;

/// The owner invites a candidate, typically one from the ranked list
pub struct InviteCandidateService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> InviteCandidateService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(
        self,
        project_id: Id,
        candidate_id: Id,
        message: Option<String>,
    ) -> OpResult<CollaborationRequest> {
        let project = self.ctx.project(project_id).await?;
        self.ctx.require(&project, Relationship::Owner)?;

        let request = NewCollaborationRequest {
            project_id,
            sender_id: self.ctx.caller,
            recipient_id: candidate_id,
            kind: RequestKind::Invitation,
            message: message.unwrap_or_default(),
        };
        RequestLifecycle::check_create(&project, &request)?;
        validate(&RequestContract, &request)?;
        if self.ctx.store.find_user(candidate_id).await?.is_none() {
            return Err(OpError::not_found("User", candidate_id));
        }

        let created = self.ctx.store.insert_request(request).await?;
        tracing::info!(
            request_id = created.id,
            project_id,
            candidate_id,
            "candidate invited"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_core::{ConflictKind, Denial};
    use cortex_models::Decision;

    async fn setup() -> (MemoryStore, Id) {
        let store = MemoryStore::new();
        store.insert_user(profiled_user(1, "Owner"));
        store.insert_user(profiled_user(2, "Candidate"));
        store.insert_user(profiled_user(3, "Bystander"));
        let project = store.insert_project(new_project(1)).await.unwrap();
        (store, project.id)
    }

    #[tokio::test]
    async fn test_invitation_addressed_to_candidate() {
        let (store, project_id) = setup().await;
        let request = InviteCandidateService::new(ServiceContext::new(&store, 1))
            .call(project_id, 2, None)
            .await
            .unwrap();
        assert_eq!(request.sender_id, 1);
        assert_eq!(request.recipient_id, 2);
        assert_eq!(request.candidate_id(), 2);
    }

    #[tokio::test]
    async fn test_only_owner_invites() {
        let (store, project_id) = setup().await;
        let err = InviteCandidateService::new(ServiceContext::new(&store, 3))
            .call(project_id, 2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotOwner)));
    }

    #[tokio::test]
    async fn test_collaborator_cannot_be_invited_again() {
        let (store, project_id) = setup().await;
        let invite = || InviteCandidateService::new(ServiceContext::new(&store, 1));
        let invitation = invite().call(project_id, 2, None).await.unwrap();
        store.resolve_request(invitation.id, Decision::Accepted).await.unwrap();

        let err = invite().call(project_id, 2, None).await.unwrap_err();
        assert!(matches!(err, OpError::Conflict(ConflictKind::AlreadyCollaborator)));
        assert!(store.incoming_requests(2).await.unwrap().is_empty());
        assert_eq!(store.collaborations_for_project(project_id).await.unwrap().len(), 1);

        invite().call(project_id, 3, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_invite_errors() {
        let (store, project_id) = setup().await;
        let invite = |candidate| {
            InviteCandidateService::new(ServiceContext::new(&store, 1)).call(project_id, candidate, None)
        };

        assert!(matches!(
            invite(1).await.unwrap_err(),
            OpError::Conflict(ConflictKind::SelfRequest)
        ));
        assert_eq!(invite(77).await.unwrap_err().status_code(), 404);

        invite(2).await.unwrap();
        assert!(matches!(
            invite(2).await.unwrap_err(),
            OpError::Conflict(ConflictKind::DuplicatePending)
        ));
    }
}
