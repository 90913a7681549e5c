use cortex_core::{Id, OpResult};
use cortex_models::{Project, ProjectView};
use serde::Deserialize;

use crate::base::ServiceContext;
use crate::store::CollaborationStore;

/// Which projects a listing covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectScope {
    /// Every open project
    #[default]
    Open,
    /// The caller's own projects, in any status
    Mine,
}

pub struct ListProjectsService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> ListProjectsService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, scope: ProjectScope) -> OpResult<Vec<Project>> {
        match scope {
            ProjectScope::Open => self.ctx.store.open_projects().await,
            ProjectScope::Mine => self.ctx.store.projects_owned_by(self.ctx.caller).await,
        }
    }
}

/// Project page, readable by any authenticated user
pub struct ShowProjectService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> ShowProjectService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, project_id: Id) -> OpResult<ProjectView> {
        let project = self.ctx.project(project_id).await?;
        let owner_name = self
            .ctx
            .store
            .find_user(project.owner_id)
            .await?
            .map(|owner| owner.name)
            .unwrap_or_default();
        let collaborators = self.ctx.store.project_members(project_id).await?;
        Ok(ProjectView {
            project,
            owner_name,
            collaborators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_models::{Decision, NewCollaborationRequest, ProjectStatus, RequestKind};

    #[tokio::test]
    async fn test_scopes() {
        let store = MemoryStore::new();
        let first = store.insert_project(new_project(1)).await.unwrap();
        let second = store.insert_project(new_project(1)).await.unwrap();
        store.insert_project(new_project(2)).await.unwrap();
        store
            .transition_project(first.id, ProjectStatus::Completed)
            .await
            .unwrap();

        let open = ListProjectsService::new(ServiceContext::new(&store, 1))
            .call(ProjectScope::Open)
            .await
            .unwrap();
        assert_eq!(open.len(), 2);

        let mine = ListProjectsService::new(ServiceContext::new(&store, 1))
            .call(ProjectScope::Mine)
            .await
            .unwrap();
        let ids: Vec<Id> = mine.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_show_lists_collaborators() {
        let store = MemoryStore::new();
        store.insert_user(profiled_user(1, "Owner"));
        store.insert_user(profiled_user(2, "Member"));
        let project = store.insert_project(new_project(1)).await.unwrap();
        let request = store
            .insert_request(NewCollaborationRequest {
                project_id: project.id,
                sender_id: 1,
                recipient_id: 2,
                kind: RequestKind::Invitation,
                message: "join us".into(),
            })
            .await
            .unwrap();
        store.resolve_request(request.id, Decision::Accepted).await.unwrap();

        let view = ShowProjectService::new(ServiceContext::new(&store, 3))
            .call(project.id)
            .await
            .unwrap();
        assert_eq!(view.owner_name, "Owner");
        assert_eq!(view.project.status, ProjectStatus::Active);
        assert_eq!(view.collaborators.len(), 1);
        assert_eq!(view.collaborators[0].name, "Member");
    }
}
