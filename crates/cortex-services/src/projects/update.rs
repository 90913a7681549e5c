use cortex_contracts::{ProjectDetailsContract, Relationship};
use cortex_core::{Id, OpResult};
use cortex_models::{ProjectDetails, ProjectStatus};

use crate::base::{validate, ServiceContext};
use crate::store::{CollaborationStore, ProjectTransition};

/// Edit a project's descriptive fields, optionally changing its status in
/// the same unit of work
///
/// Shares its validation with [`CreateProjectService`](super::CreateProjectService);
/// the status change follows the same rules as
/// [`UpdateProjectStatusService`](super::UpdateProjectStatusService).
pub struct UpdateProjectService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> UpdateProjectService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(
        self,
        project_id: Id,
        mut details: ProjectDetails,
        status: Option<ProjectStatus>,
    ) -> OpResult<ProjectTransition> {
        let project = self.ctx.project(project_id).await?;
        self.ctx.require(&project, Relationship::Owner)?;
        validate(&ProjectDetailsContract, &details)?;
        details.name = details.name.trim().to_string();

        let transition = self.ctx.store.update_project(project_id, details, status).await?;
        tracing::info!(
            project_id,
            status = %transition.project.status,
            changed = transition.changed,
            cascaded = transition.cascaded,
            "project updated"
        );
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{details, new_project};
    use cortex_core::{Denial, OpError};

    #[tokio::test]
    async fn test_edit_with_status_change() {
        let store = MemoryStore::new();
        let project = store.insert_project(new_project(1)).await.unwrap();

        let mut edited = details();
        edited.hours_per_week = 20;
        let transition = UpdateProjectService::new(ServiceContext::new(&store, 1))
            .call(project.id, edited, Some(ProjectStatus::Active))
            .await
            .unwrap();
        assert!(transition.changed);
        assert_eq!(transition.project.status, ProjectStatus::Active);
        assert_eq!(transition.project.details.hours_per_week, 20);
    }

    #[tokio::test]
    async fn test_edit_without_status_keeps_it() {
        let store = MemoryStore::new();
        let project = store.insert_project(new_project(1)).await.unwrap();
        let transition = UpdateProjectService::new(ServiceContext::new(&store, 1))
            .call(project.id, details(), None)
            .await
            .unwrap();
        assert!(!transition.changed);
        assert_eq!(transition.project.status, ProjectStatus::Open);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_edit() {
        let store = MemoryStore::new();
        let project = store.insert_project(new_project(1)).await.unwrap();
        let err = UpdateProjectService::new(ServiceContext::new(&store, 2))
            .call(project.id, details(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotOwner)));
    }
}
