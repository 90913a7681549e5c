//! Collaboration model
//!
//! Table: collaborations

use chrono::{DateTime, Utc};
use cortex_core::traits::{Entity, Id, Identifiable, ProjectScoped, Timestamped};
use serde::{Deserialize, Serialize};

use crate::project::{Project, ProjectDuration, ProjectGoal, ProjectStatus, ProjectType};
use crate::tags::string_tag;
use crate::user::UserRole;

string_tag! {
    /// Mirrors the project lifecycle once the project closes
    CollaborationStatus {
        Active => "active",
        Completed => "completed",
        Dropped => "dropped",
    }
}

impl CollaborationStatus {
    /// The status a collaboration takes when its project enters `status`
    pub fn cascaded_from(status: ProjectStatus) -> Option<Self> {
        match status {
            ProjectStatus::Completed => Some(CollaborationStatus::Completed),
            ProjectStatus::Dropped => Some(CollaborationStatus::Dropped),
            ProjectStatus::Open | ProjectStatus::Active => None,
        }
    }
}

/// Collaboration entity
///
/// Only ever created when a request is accepted. The joined user never
/// sets `status` directly; it follows the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: Id,
    pub project_id: Id,
    pub user_id: Id,
    pub status: CollaborationStatus,
    pub joined_at: DateTime<Utc>,
}

impl Identifiable for Collaboration {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Collaboration {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.joined_at)
    }
}

impl ProjectScoped for Collaboration {
    fn project_id(&self) -> Id {
        self.project_id
    }
}

impl Entity for Collaboration {
    const TABLE_NAME: &'static str = "collaborations";
    const TYPE_NAME: &'static str = "Collaboration";
}

/// Insert payload for a collaboration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollaboration {
    pub project_id: Id,
    pub user_id: Id,
    pub status: CollaborationStatus,
}

/// A joined user as listed on a project page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub collaboration_id: Id,
    pub user_id: Id,
    pub name: String,
    pub role: Option<UserRole>,
    pub status: CollaborationStatus,
    pub joined_at: DateTime<Utc>,
}

/// One row of a collaboration listing, seen from one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationSummary {
    pub collaboration_id: Id,
    pub collab_status: CollaborationStatus,
    pub joined_at: DateTime<Utc>,
    pub project_id: Id,
    pub project_name: String,
    pub project_type: ProjectType,
    pub project_status: ProjectStatus,
    pub hours_per_week: u32,
    pub duration: ProjectDuration,
    pub goal: ProjectGoal,
    /// The owner when listed as collaborator, the collaborator when listed as owner
    pub counterpart_id: Id,
    pub counterpart_name: String,
}

/// Collaborations of one user, split by the side they are on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationOverview {
    pub as_owner: Vec<CollaborationSummary>,
    pub as_collaborator: Vec<CollaborationSummary>,
}

/// A collaboration together with its project, for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationDetail {
    #[serde(flatten)]
    pub collaboration: Collaboration,
    pub project: Project,
    pub collaborator_name: String,
    pub owner_name: String,
}

impl CollaborationDetail {
    pub fn is_participant(&self, user_id: Id) -> bool {
        self.collaboration.user_id == user_id || self.project.owner_id == user_id
    }
}
