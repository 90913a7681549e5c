//! Storage contract
//!
//! Every mutating method is one atomic unit: the status write and its
//! side effects (collaboration creation, project bump, cascade) commit
//! together or not at all. Reads may observe a slightly stale snapshot.

use async_trait::async_trait;
use cortex_core::{Id, OpResult};
use cortex_models::{
    Checkin, Collaboration, CollaborationDetail, CollaborationOverview, CollaborationRequest,
    Decision, NewCheckin, NewCollaborationRequest, NewProject, ProfileUpdate, Project,
    ProjectDetails, ProjectMember, ProjectStatus, RequestView, User,
};
use serde::Serialize;

/// Outcome of resolving a pending request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub request: CollaborationRequest,
    /// Present only when the request was accepted
    pub collaboration: Option<Collaboration>,
    /// Project status after the resolution committed
    pub project_status: ProjectStatus,
}

/// Outcome of a project status change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTransition {
    pub project: Project,
    /// `false` when the project was already in the target status
    pub changed: bool,
    /// Collaborations whose status followed the project
    pub cascaded: u64,
}

#[async_trait]
pub trait CollaborationStore: Send + Sync {
    /// Cheap round trip used by readiness checks
    async fn ping(&self) -> OpResult<()>;

    // users

    async fn find_user(&self, id: Id) -> OpResult<Option<User>>;

    /// Every profile-complete user
    async fn matching_pool(&self) -> OpResult<Vec<User>>;

    /// Write a validated profile and mark it complete
    ///
    /// Accounts are provisioned by the authentication service, so the
    /// first save for an id creates its profile row.
    async fn save_profile(&self, user_id: Id, update: &ProfileUpdate) -> OpResult<User>;

    // projects

    async fn find_project(&self, id: Id) -> OpResult<Option<Project>>;

    async fn insert_project(&self, project: NewProject) -> OpResult<Project>;

    /// Open projects, newest first
    async fn open_projects(&self) -> OpResult<Vec<Project>>;

    /// Projects of one owner, newest first
    async fn projects_owned_by(&self, owner_id: Id) -> OpResult<Vec<Project>>;

    async fn project_members(&self, project_id: Id) -> OpResult<Vec<ProjectMember>>;

    /// Apply a status change under [`ProjectLifecycle`](crate::ProjectLifecycle)
    async fn transition_project(&self, id: Id, to: ProjectStatus) -> OpResult<ProjectTransition>;

    /// Replace the details and, when given, apply a status change in the
    /// same unit of work
    async fn update_project(
        &self,
        id: Id,
        details: ProjectDetails,
        status: Option<ProjectStatus>,
    ) -> OpResult<ProjectTransition>;

    // requests

    async fn find_request(&self, id: Id) -> OpResult<Option<CollaborationRequest>>;

    async fn requests_for_project(&self, project_id: Id) -> OpResult<Vec<CollaborationRequest>>;

    /// Insert a pending request; a second pending request for the same
    /// (project, candidate) fails with `DuplicatePending`
    async fn insert_request(&self, request: NewCollaborationRequest)
        -> OpResult<CollaborationRequest>;

    /// Resolve a request that is still pending
    ///
    /// Fails with `AlreadyResolved` if another writer got there first.
    /// Acceptance creates the collaboration and moves an `open` project
    /// to `active` in the same unit of work.
    async fn resolve_request(&self, id: Id, decision: Decision) -> OpResult<Resolution>;

    /// Pending requests addressed to `user_id`
    async fn incoming_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>>;

    /// All requests sent by `user_id`
    async fn outgoing_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>>;

    // collaborations

    async fn collaborations_for_project(&self, project_id: Id) -> OpResult<Vec<Collaboration>>;

    async fn collaboration_overview(&self, user_id: Id) -> OpResult<CollaborationOverview>;

    async fn collaboration_detail(&self, id: Id) -> OpResult<Option<CollaborationDetail>>;

    async fn insert_checkin(
        &self,
        collaboration_id: Id,
        author_id: Id,
        checkin: NewCheckin,
    ) -> OpResult<Checkin>;

    /// Check-ins of a collaboration, newest first
    async fn checkins(&self, collaboration_id: Id) -> OpResult<Vec<Checkin>>;
}
