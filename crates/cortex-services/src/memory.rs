//! In-memory store
//!
//! Holds everything behind one mutex; each trait method takes the lock
//! once, so every operation is atomic with respect to every other. Used
//! by the service tests and by `storage.backend = "memory"`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use cortex_core::{ConflictKind, Id, OpError, OpResult};
use cortex_models::{
    Checkin, Collaboration, CollaborationDetail, CollaborationOverview, CollaborationRequest,
    CollaborationSummary, Decision, NewCheckin, NewCollaborationRequest, NewProject,
    ProfileUpdate, Project, ProjectDetails, ProjectMember, ProjectStatus, RequestStatus,
    RequestView, User,
};
use parking_lot::Mutex;

use crate::lifecycle::{CollaborationFactory, ProjectLifecycle, RequestLifecycle, TransitionPlan};
use crate::store::{CollaborationStore, ProjectTransition, Resolution};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<Id, User>,
    projects: BTreeMap<Id, Project>,
    requests: BTreeMap<Id, CollaborationRequest>,
    collaborations: BTreeMap<Id, Collaboration>,
    checkins: BTreeMap<Id, Checkin>,
    last_id: Id,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }

    fn user_name(&self, id: Id) -> String {
        self.users.get(&id).map(|u| u.name.clone()).unwrap_or_default()
    }

    fn project(&self, id: Id) -> OpResult<&Project> {
        self.projects
            .get(&id)
            .ok_or_else(|| OpError::not_found("Project", id))
    }

    fn members_of(&self, project_id: Id) -> impl Iterator<Item = &Collaboration> {
        self.collaborations
            .values()
            .filter(move |c| c.project_id == project_id)
    }

    /// Write a planned transition; returns (changed, cascaded)
    fn apply(&mut self, project_id: Id, plan: TransitionPlan) -> (bool, u64) {
        let TransitionPlan::Apply { to, cascade } = plan else {
            return (false, 0);
        };
        if let Some(project) = self.projects.get_mut(&project_id) {
            project.status = to;
        }
        let mut cascaded = 0;
        if let Some(status) = cascade {
            for collaboration in self.collaborations.values_mut() {
                if collaboration.project_id == project_id {
                    collaboration.status = status;
                    cascaded += 1;
                }
            }
        }
        (true, cascaded)
    }

    fn request_view(&self, request: &CollaborationRequest) -> RequestView {
        RequestView {
            request: request.clone(),
            project_name: self
                .projects
                .get(&request.project_id)
                .map(|p| p.details.name.clone())
                .unwrap_or_default(),
            sender_name: self.user_name(request.sender_id),
            recipient_name: self.user_name(request.recipient_id),
        }
    }

    fn summary(&self, collaboration: &Collaboration, project: &Project, counterpart_id: Id) -> CollaborationSummary {
        CollaborationSummary {
            collaboration_id: collaboration.id,
            collab_status: collaboration.status,
            joined_at: collaboration.joined_at,
            project_id: project.id,
            project_name: project.details.name.clone(),
            project_type: project.details.project_type,
            project_status: project.status,
            hours_per_week: project.details.hours_per_week,
            duration: project.details.duration,
            goal: project.details.goal,
            counterpart_id,
            counterpart_name: self.user_name(counterpart_id),
        }
    }
}

/// Newest first, by id since ids are handed out in creation order
fn newest_first<T, F: Fn(&T) -> Id>(items: &mut [T], id: F) {
    items.sort_by_key(|item| std::cmp::Reverse(id(item)));
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user as the authentication service would
    pub fn insert_user(&self, user: User) {
        let mut state = self.state.lock();
        state.last_id = state.last_id.max(user.id);
        state.users.insert(user.id, user);
    }
}

#[async_trait]
impl CollaborationStore for MemoryStore {
    async fn ping(&self) -> OpResult<()> {
        Ok(())
    }

    async fn find_user(&self, id: Id) -> OpResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn matching_pool(&self) -> OpResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .filter(|u| u.profile_complete)
            .cloned()
            .collect())
    }

    async fn save_profile(&self, user_id: Id, update: &ProfileUpdate) -> OpResult<User> {
        let mut state = self.state.lock();
        state.last_id = state.last_id.max(user_id);
        let user = state.users.entry(user_id).or_insert_with(|| {
            let mut user = User::new(user_id, "");
            user.created_at = Some(Utc::now());
            user
        });
        user.apply_profile(update);
        Ok(user.clone())
    }

    async fn find_project(&self, id: Id) -> OpResult<Option<Project>> {
        Ok(self.state.lock().projects.get(&id).cloned())
    }

    async fn insert_project(&self, project: NewProject) -> OpResult<Project> {
        let mut state = self.state.lock();
        let id = state.next_id();
        let project = Project {
            id,
            owner_id: project.owner_id,
            details: project.details,
            status: ProjectStatus::Open,
            created_at: Some(Utc::now()),
        };
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn open_projects(&self) -> OpResult<Vec<Project>> {
        let state = self.state.lock();
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|p| p.status == ProjectStatus::Open)
            .cloned()
            .collect();
        newest_first(&mut projects, |p| p.id);
        Ok(projects)
    }

    async fn projects_owned_by(&self, owner_id: Id) -> OpResult<Vec<Project>> {
        let state = self.state.lock();
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut projects, |p| p.id);
        Ok(projects)
    }

    async fn project_members(&self, project_id: Id) -> OpResult<Vec<ProjectMember>> {
        let state = self.state.lock();
        Ok(state
            .collaborations
            .values()
            .filter(|c| c.project_id == project_id)
            .map(|c| ProjectMember {
                collaboration_id: c.id,
                user_id: c.user_id,
                name: state.user_name(c.user_id),
                role: state.users.get(&c.user_id).and_then(|u| u.role),
                status: c.status,
                joined_at: c.joined_at,
            })
            .collect())
    }

    async fn transition_project(&self, id: Id, to: ProjectStatus) -> OpResult<ProjectTransition> {
        let mut state = self.state.lock();
        let plan = ProjectLifecycle::plan(state.project(id)?.status, to)?;
        let (changed, cascaded) = state.apply(id, plan);
        Ok(ProjectTransition {
            project: state.project(id)?.clone(),
            changed,
            cascaded,
        })
    }

    async fn update_project(
        &self,
        id: Id,
        details: ProjectDetails,
        status: Option<ProjectStatus>,
    ) -> OpResult<ProjectTransition> {
        let mut state = self.state.lock();
        let current = state.project(id)?.status;
        ProjectLifecycle::ensure_editable(current)?;
        let plan = match status {
            Some(to) => ProjectLifecycle::plan(current, to)?,
            None => TransitionPlan::Unchanged,
        };
        if let Some(project) = state.projects.get_mut(&id) {
            project.details = details;
        }
        let (changed, cascaded) = state.apply(id, plan);
        Ok(ProjectTransition {
            project: state.project(id)?.clone(),
            changed,
            cascaded,
        })
    }

    async fn find_request(&self, id: Id) -> OpResult<Option<CollaborationRequest>> {
        Ok(self.state.lock().requests.get(&id).cloned())
    }

    async fn requests_for_project(&self, project_id: Id) -> OpResult<Vec<CollaborationRequest>> {
        let state = self.state.lock();
        Ok(state
            .requests
            .values()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_request(
        &self,
        request: NewCollaborationRequest,
    ) -> OpResult<CollaborationRequest> {
        let mut state = self.state.lock();
        let candidate = request.candidate_id();
        let duplicate = state.requests.values().any(|r| {
            r.project_id == request.project_id && r.is_pending() && r.candidate_id() == candidate
        });
        if duplicate {
            return Err(ConflictKind::DuplicatePending.into());
        }
        RequestLifecycle::check_candidate(candidate, state.members_of(request.project_id))?;

        let id = state.next_id();
        let request = CollaborationRequest {
            id,
            project_id: request.project_id,
            sender_id: request.sender_id,
            recipient_id: request.recipient_id,
            kind: request.kind,
            message: request.message,
            status: RequestStatus::Pending,
            created_at: Some(Utc::now()),
            responded_at: None,
        };
        state.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn resolve_request(&self, id: Id, decision: Decision) -> OpResult<Resolution> {
        let mut state = self.state.lock();
        let now = Utc::now();
        let current = state
            .requests
            .get(&id)
            .ok_or_else(|| OpError::not_found("CollaborationRequest", id))?;
        let resolved = RequestLifecycle::resolve(current, decision, now)?;
        let mut project_status = state.project(resolved.project_id)?.status;

        let mut collaboration = None;
        if decision == Decision::Accepted {
            RequestLifecycle::check_candidate(
                resolved.candidate_id(),
                state.members_of(resolved.project_id),
            )?;
            let new = CollaborationFactory::build(&resolved, project_status);
            let collaboration_id = state.next_id();
            let created = Collaboration {
                id: collaboration_id,
                project_id: new.project_id,
                user_id: new.user_id,
                status: new.status,
                joined_at: now,
            };
            state.collaborations.insert(collaboration_id, created.clone());
            collaboration = Some(created);

            if ProjectLifecycle::activates_on_accept(project_status) {
                if let Some(project) = state.projects.get_mut(&resolved.project_id) {
                    project.status = ProjectStatus::Active;
                }
                project_status = ProjectStatus::Active;
            }
        }

        state.requests.insert(id, resolved.clone());
        Ok(Resolution {
            request: resolved,
            collaboration,
            project_status,
        })
    }

    async fn incoming_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>> {
        let state = self.state.lock();
        let mut views: Vec<RequestView> = state
            .requests
            .values()
            .filter(|r| r.recipient_id == user_id && r.is_pending())
            .map(|r| state.request_view(r))
            .collect();
        newest_first(&mut views, |v| v.request.id);
        Ok(views)
    }

    async fn outgoing_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>> {
        let state = self.state.lock();
        let mut views: Vec<RequestView> = state
            .requests
            .values()
            .filter(|r| r.sender_id == user_id)
            .map(|r| state.request_view(r))
            .collect();
        newest_first(&mut views, |v| v.request.id);
        Ok(views)
    }

    async fn collaborations_for_project(&self, project_id: Id) -> OpResult<Vec<Collaboration>> {
        let state = self.state.lock();
        Ok(state
            .collaborations
            .values()
            .filter(|c| c.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn collaboration_overview(&self, user_id: Id) -> OpResult<CollaborationOverview> {
        let state = self.state.lock();
        let mut overview = CollaborationOverview::default();
        for collaboration in state.collaborations.values() {
            let Some(project) = state.projects.get(&collaboration.project_id) else {
                continue;
            };
            if project.owner_id == user_id {
                overview
                    .as_owner
                    .push(state.summary(collaboration, project, collaboration.user_id));
            }
            if collaboration.user_id == user_id {
                overview
                    .as_collaborator
                    .push(state.summary(collaboration, project, project.owner_id));
            }
        }
        newest_first(&mut overview.as_owner, |s| s.collaboration_id);
        newest_first(&mut overview.as_collaborator, |s| s.collaboration_id);
        Ok(overview)
    }

    async fn collaboration_detail(&self, id: Id) -> OpResult<Option<CollaborationDetail>> {
        let state = self.state.lock();
        let Some(collaboration) = state.collaborations.get(&id) else {
            return Ok(None);
        };
        let project = state.project(collaboration.project_id)?;
        Ok(Some(CollaborationDetail {
            collaboration: collaboration.clone(),
            project: project.clone(),
            collaborator_name: state.user_name(collaboration.user_id),
            owner_name: state.user_name(project.owner_id),
        }))
    }

    async fn insert_checkin(
        &self,
        collaboration_id: Id,
        author_id: Id,
        checkin: NewCheckin,
    ) -> OpResult<Checkin> {
        let mut state = self.state.lock();
        if !state.collaborations.contains_key(&collaboration_id) {
            return Err(OpError::not_found("Collaboration", collaboration_id));
        }
        let id = state.next_id();
        let checkin = Checkin {
            id,
            collaboration_id,
            user_id: author_id,
            user_name: state.user_name(author_id),
            completed: checkin.completed,
            blocked: checkin.blocked,
            next_steps: checkin.next_steps,
            created_at: Utc::now(),
        };
        state.checkins.insert(id, checkin.clone());
        Ok(checkin)
    }

    async fn checkins(&self, collaboration_id: Id) -> OpResult<Vec<Checkin>> {
        let state = self.state.lock();
        let mut checkins: Vec<Checkin> = state
            .checkins
            .values()
            .filter(|c| c.collaboration_id == collaboration_id)
            .cloned()
            .collect();
        newest_first(&mut checkins, |c| c.id);
        Ok(checkins)
    }
}
