use cortex_contracts::Relationship;
use cortex_core::{Id, OpResult};
use cortex_models::ProjectStatus;

use crate::base::ServiceContext;
use crate::store::{CollaborationStore, ProjectTransition};

/// updateProjectStatus: owner-only, idempotent for the current status
pub struct UpdateProjectStatusService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> UpdateProjectStatusService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, project_id: Id, status: ProjectStatus) -> OpResult<ProjectTransition> {
        let project = self.ctx.project(project_id).await?;
        self.ctx.require(&project, Relationship::Owner)?;

        let transition = self
            .ctx
            .store
            .transition_project(project_id, status)
            .await
            .inspect_err(|err| {
                tracing::debug!(project_id, from = %project.status, to = %status, %err, "transition rejected")
            })?;

        if transition.changed {
            tracing::info!(
                project_id,
                from = %project.status,
                to = %status,
                cascaded = transition.cascaded,
                "project status changed"
            );
        }
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_core::{ConflictKind, Denial, OpError};
    use cortex_models::{CollaborationStatus, Decision, NewCollaborationRequest, RequestKind};

    async fn active_project_with_member(store: &MemoryStore) -> Id {
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
        store.resolve_request(request.id, Decision::Accepted).await.unwrap();
        project.id
    }

    #[tokio::test]
    async fn test_repeated_activation_is_idempotent() {
        let store = MemoryStore::new();
        let project_id = active_project_with_member(&store).await;

        for _ in 0..2 {
            let transition = UpdateProjectStatusService::new(ServiceContext::new(&store, 1))
                .call(project_id, ProjectStatus::Active)
                .await
                .unwrap();
            assert!(!transition.changed);
            assert_eq!(transition.project.status, ProjectStatus::Active);
        }

        let collaborations = store.collaborations_for_project(project_id).await.unwrap();
        assert_eq!(collaborations.len(), 1);
        assert_eq!(collaborations[0].status, CollaborationStatus::Active);
    }

    #[tokio::test]
    async fn test_terminal_status_is_final() {
        for terminal in [ProjectStatus::Completed, ProjectStatus::Dropped] {
            let store = MemoryStore::new();
            let project_id = active_project_with_member(&store).await;
            let transition = UpdateProjectStatusService::new(ServiceContext::new(&store, 1))
                .call(project_id, terminal)
                .await
                .unwrap();
            assert_eq!(transition.cascaded, 1);

            for other in ProjectStatus::ALL.iter().filter(|s| **s != terminal) {
                let err = UpdateProjectStatusService::new(ServiceContext::new(&store, 1))
                    .call(project_id, *other)
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    OpError::Conflict(ConflictKind::InvalidTransition { .. })
                ));
            }

            let collaborations = store.collaborations_for_project(project_id).await.unwrap();
            assert_eq!(
                collaborations[0].status,
                CollaborationStatus::cascaded_from(terminal).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_non_owner_denied() {
        let store = MemoryStore::new();
        let project_id = active_project_with_member(&store).await;
        let err = UpdateProjectStatusService::new(ServiceContext::new(&store, 2))
            .call(project_id, ProjectStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotOwner)));
    }
}
