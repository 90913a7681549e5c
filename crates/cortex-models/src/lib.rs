//! # cortex-models
//!
//! Domain models for Cortex.
//!
//! Each entity maps to one table and implements the core traits from
//! `cortex-core`. Closed vocabularies (roles, statuses, project
//! attributes) are enums that serialize to the same lowercase tags the
//! store persists.

pub use cortex_core::traits::{Entity, Id, Identifiable, ProjectScoped, Timestamped};

pub mod checkin;
pub mod collaboration;
pub mod project;
pub mod request;
pub mod user;

mod tags;

pub use checkin::{Checkin, NewCheckin};
pub use collaboration::{
    Collaboration, CollaborationDetail, CollaborationOverview, CollaborationStatus,
    CollaborationSummary, NewCollaboration, ProjectMember,
};
pub use project::{
    LocationPreference, NewProject, Project, ProjectDetails, ProjectDuration, ProjectGoal,
    ProjectStage, ProjectStatus, ProjectType, ProjectView,
};
pub use request::{
    CollaborationRequest, Decision, NewCollaborationRequest, RequestKind, RequestStatus,
    RequestView,
};
pub use tags::UnknownTag;
pub use user::{Portfolio, ProfileUpdate, User, UserRole, WorkPreference};
