//! # cortex-services
//!
//! Business operations for Cortex. Each service object authorizes the
//! caller, validates input through `cortex-contracts`, and hands one
//! atomic unit of work to a [`CollaborationStore`].
//!
//! The lifecycle rules themselves live in [`lifecycle`] as pure
//! functions, so every store applies the same state machine inside its
//! own transaction.

pub mod base;
pub mod collaborations;
pub mod lifecycle;
pub mod matching;
pub mod memory;
pub mod projects;
pub mod requests;
pub mod store;
pub mod users;

pub use base::*;
pub use collaborations::{
    CollaborationDetailService, ListCheckinsService, ListCollaborationsService,
    PostCheckinService,
};
pub use lifecycle::{CollaborationFactory, ProjectLifecycle, RequestLifecycle, TransitionPlan};
pub use matching::RankCandidatesService;
pub use memory::MemoryStore;
pub use projects::{
    CreateProjectService, ListProjectsService, ProjectScope, ShowProjectService,
    UpdateProjectService, UpdateProjectStatusService,
};
pub use requests::{
    CreateRequestService, InboxService, InviteCandidateService, RespondToRequestService,
};
pub use store::{CollaborationStore, ProjectTransition, Resolution};
pub use users::{ShowUserService, UpdateProfileService};

#[cfg(test)]
pub(crate) mod testing {
    use cortex_core::Id;
    use cortex_models::{
        LocationPreference, NewProject, ProfileUpdate, ProjectDetails, ProjectDuration,
        ProjectGoal, ProjectStage, ProjectType, User, UserRole, WorkPreference,
    };

    pub fn details() -> ProjectDetails {
        ProjectDetails {
            name: "Harbor".into(),
            project_type: ProjectType::Startup,
            stage: ProjectStage::Idea,
            roles_needed: [UserRole::Developer, UserRole::Designer].into(),
            skills_needed: ["A".to_string(), "B".to_string(), "C".to_string()].into(),
            hours_per_week: 10,
            duration: ProjectDuration::FourWeeks,
            goal: ProjectGoal::Mvp,
            location: LocationPreference::Remote,
        }
    }

    pub fn new_project(owner_id: Id) -> NewProject {
        NewProject {
            owner_id,
            details: details(),
        }
    }

    pub fn profiled_user(id: Id, name: &str) -> User {
        let mut user = User::new(id, name);
        user.role = Some(UserRole::Developer);
        user.skills = ["A".to_string(), "B".to_string()].into();
        user.availability = 15;
        user.timezone = "UTC".into();
        user.work_preference = Some(WorkPreference::Startup);
        user.profile_complete = true;
        user
    }

    pub fn profile(timezone: &str) -> ProfileUpdate {
        ProfileUpdate {
            name: "Lin".into(),
            role: UserRole::Designer,
            skills: ["Figma".to_string()].into(),
            availability: 12,
            timezone: timezone.into(),
            work_preference: WorkPreference::Both,
            portfolio: None,
        }
    }
}
