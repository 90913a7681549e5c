//! Project model
//!
//! Table: projects

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use cortex_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::collaboration::ProjectMember;
use crate::tags::string_tag;
use crate::user::UserRole;

string_tag! {
    ProjectType {
        Startup => "startup",
        Freelance => "freelance",
    }
}

string_tag! {
    ProjectStage {
        Idea => "idea",
        InProgress => "in_progress",
        ClientSigned => "client_signed",
    }
}

string_tag! {
    /// Expected duration bucket
    ProjectDuration {
        TwoWeeks => "2_weeks",
        FourWeeks => "4_weeks",
        EightPlusWeeks => "8_plus_weeks",
    }
}

string_tag! {
    ProjectGoal {
        Mvp => "mvp",
        Delivery => "delivery",
        Revenue => "revenue",
    }
}

string_tag! {
    LocationPreference {
        Remote => "remote",
        InPerson => "in_person",
        Both => "both",
    }
}

string_tag! {
    /// Project lifecycle status
    ///
    /// `open -> active -> {completed, dropped}`; `open` may also close
    /// directly. `completed` and `dropped` are terminal.
    ProjectStatus {
        Open => "open",
        Active => "active",
        Completed => "completed",
        Dropped => "dropped",
    }
}

impl ProjectStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Dropped)
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Open
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub owner_id: Id,
    #[serde(flatten)]
    pub details: ProjectDetails,
    pub status: ProjectStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Project {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Project {
    const TABLE_NAME: &'static str = "projects";
    const TYPE_NAME: &'static str = "Project";
}

impl Project {
    pub fn is_owned_by(&self, user_id: Id) -> bool {
        self.owner_id == user_id
    }

    pub fn needs_role(&self, role: UserRole) -> bool {
        self.details.roles_needed.contains(&role)
    }
}

/// The owner-editable description of a project
///
/// Used both when creating a project and when editing one, so the two
/// operations share one validation path. Every field is required; the
/// skill set may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub project_type: ProjectType,

    pub stage: ProjectStage,

    #[validate(length(min = 1))]
    pub roles_needed: BTreeSet<UserRole>,

    #[serde(default)]
    pub skills_needed: BTreeSet<String>,

    /// Required weekly commitment in hours
    #[validate(range(min = 1, max = 168))]
    pub hours_per_week: u32,

    pub duration: ProjectDuration,

    pub goal: ProjectGoal,

    pub location: LocationPreference,
}

/// Insert payload for a project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub owner_id: Id,
    pub details: ProjectDetails,
}

/// Project page: the project, its owner and everyone who joined it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub owner_name: String,
    pub collaborators: Vec<ProjectMember>,
}
