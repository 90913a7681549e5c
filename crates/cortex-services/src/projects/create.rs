use cortex_contracts::ProjectDetailsContract;
use cortex_core::OpResult;
use cortex_models::{NewProject, Project, ProjectDetails};

use crate::base::{validate, ServiceContext};
use crate::store::CollaborationStore;

/// Create a project owned by the caller; it starts `open`
pub struct CreateProjectService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> CreateProjectService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, mut details: ProjectDetails) -> OpResult<Project> {
        validate(&ProjectDetailsContract, &details)?;
        details.name = details.name.trim().to_string();

        let project = self
            .ctx
            .store
            .insert_project(NewProject {
                owner_id: self.ctx.caller,
                details,
            })
            .await?;
        tracing::info!(project_id = project.id, owner_id = project.owner_id, "project created");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::details;
    use cortex_models::ProjectStatus;

    #[tokio::test]
    async fn test_new_project_is_open() {
        let store = MemoryStore::new();
        let mut input = details();
        input.name = "  Harbor  ".into();
        let project = CreateProjectService::new(ServiceContext::new(&store, 4))
            .call(input)
            .await
            .unwrap();
        assert_eq!(project.status, ProjectStatus::Open);
        assert_eq!(project.owner_id, 4);
        assert_eq!(project.details.name, "Harbor");
    }

    #[tokio::test]
    async fn test_missing_roles_rejected() {
        let store = MemoryStore::new();
        let mut input = details();
        input.roles_needed.clear();
        let err = CreateProjectService::new(ServiceContext::new(&store, 4))
            .call(input)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(store.open_projects().await.unwrap().is_empty());
    }
}
