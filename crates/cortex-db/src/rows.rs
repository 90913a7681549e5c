//! Row types and their conversion into domain models
//!
//! Tags are stored as text and sets as JSONB arrays; a row that does not
//! decode is reported as corrupt rather than silently defaulted.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use cortex_models::{
    Checkin, Collaboration, CollaborationRequest, CollaborationSummary, Portfolio, Project,
    ProjectDetails, ProjectMember, RequestView, UnknownTag, User, UserRole,
};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::repository::{RepositoryError, RepositoryResult};

pub(crate) fn tag<T: FromStr<Err = UnknownTag>>(value: &str) -> RepositoryResult<T> {
    value
        .parse()
        .map_err(|err: UnknownTag| RepositoryError::Decode(err.to_string()))
}

fn optional_tag<T: FromStr<Err = UnknownTag>>(value: Option<&str>) -> RepositoryResult<Option<T>> {
    value.map(tag).transpose()
}

fn hours(column: &str, value: i32) -> RepositoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::Decode(format!("negative {}: {}", column, value)))
}

pub(crate) const USER_COLUMNS: &str = "id, name, role, skills, availability, timezone, \
     work_preference, portfolio, profile_complete, created_at";

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub skills: Json<BTreeSet<String>>,
    pub availability: i32,
    pub timezone: String,
    pub work_preference: Option<String>,
    pub portfolio: Json<Portfolio>,
    pub profile_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> RepositoryResult<Self> {
        Ok(User {
            id: row.id,
            name: row.name,
            role: optional_tag(row.role.as_deref())?,
            skills: row.skills.0,
            availability: hours("availability", row.availability)?,
            timezone: row.timezone,
            work_preference: optional_tag(row.work_preference.as_deref())?,
            portfolio: row.portfolio.0,
            profile_complete: row.profile_complete,
            created_at: Some(row.created_at),
        })
    }
}

pub(crate) const PROJECT_COLUMNS: &str = "id, owner_id, name, project_type, stage, roles_needed, \
     skills_needed, hours_per_week, duration, goal, location, status, created_at";

#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub project_type: String,
    pub stage: String,
    pub roles_needed: Json<BTreeSet<UserRole>>,
    pub skills_needed: Json<BTreeSet<String>>,
    pub hours_per_week: i32,
    pub duration: String,
    pub goal: String,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> RepositoryResult<Self> {
        Ok(Project {
            id: row.id,
            owner_id: row.owner_id,
            details: ProjectDetails {
                name: row.name,
                project_type: tag(&row.project_type)?,
                stage: tag(&row.stage)?,
                roles_needed: row.roles_needed.0,
                skills_needed: row.skills_needed.0,
                hours_per_week: hours("hours_per_week", row.hours_per_week)?,
                duration: tag(&row.duration)?,
                goal: tag(&row.goal)?,
                location: tag(&row.location)?,
            },
            status: tag(&row.status)?,
            created_at: Some(row.created_at),
        })
    }
}

pub(crate) const REQUEST_COLUMNS: &str =
    "id, project_id, sender_id, recipient_id, kind, message, status, created_at, responded_at";

#[derive(Debug, Clone, FromRow)]
pub struct RequestRow {
    pub id: i64,
    pub project_id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub kind: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<RequestRow> for CollaborationRequest {
    type Error = RepositoryError;

    fn try_from(row: RequestRow) -> RepositoryResult<Self> {
        Ok(CollaborationRequest {
            id: row.id,
            project_id: row.project_id,
            sender_id: row.sender_id,
            recipient_id: row.recipient_id,
            kind: tag(&row.kind)?,
            message: row.message,
            status: tag(&row.status)?,
            created_at: Some(row.created_at),
            responded_at: row.responded_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RequestViewRow {
    #[sqlx(flatten)]
    pub request: RequestRow,
    pub project_name: String,
    pub sender_name: String,
    pub recipient_name: String,
}

impl TryFrom<RequestViewRow> for RequestView {
    type Error = RepositoryError;

    fn try_from(row: RequestViewRow) -> RepositoryResult<Self> {
        Ok(RequestView {
            request: row.request.try_into()?,
            project_name: row.project_name,
            sender_name: row.sender_name,
            recipient_name: row.recipient_name,
        })
    }
}

pub(crate) const COLLABORATION_COLUMNS: &str = "id, project_id, user_id, status, joined_at";

#[derive(Debug, Clone, FromRow)]
pub struct CollaborationRow {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<CollaborationRow> for Collaboration {
    type Error = RepositoryError;

    fn try_from(row: CollaborationRow) -> RepositoryResult<Self> {
        Ok(Collaboration {
            id: row.id,
            project_id: row.project_id,
            user_id: row.user_id,
            status: tag(&row.status)?,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SummaryRow {
    pub collaboration_id: i64,
    pub collab_status: String,
    pub joined_at: DateTime<Utc>,
    pub project_id: i64,
    pub project_name: String,
    pub project_type: String,
    pub project_status: String,
    pub hours_per_week: i32,
    pub duration: String,
    pub goal: String,
    pub counterpart_id: i64,
    pub counterpart_name: String,
}

impl TryFrom<SummaryRow> for CollaborationSummary {
    type Error = RepositoryError;

    fn try_from(row: SummaryRow) -> RepositoryResult<Self> {
        Ok(CollaborationSummary {
            collaboration_id: row.collaboration_id,
            collab_status: tag(&row.collab_status)?,
            joined_at: row.joined_at,
            project_id: row.project_id,
            project_name: row.project_name,
            project_type: tag(&row.project_type)?,
            project_status: tag(&row.project_status)?,
            hours_per_week: hours("hours_per_week", row.hours_per_week)?,
            duration: tag(&row.duration)?,
            goal: tag(&row.goal)?,
            counterpart_id: row.counterpart_id,
            counterpart_name: row.counterpart_name,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub collaboration_id: i64,
    pub user_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for ProjectMember {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> RepositoryResult<Self> {
        Ok(ProjectMember {
            collaboration_id: row.collaboration_id,
            user_id: row.user_id,
            name: row.name,
            role: optional_tag(row.role.as_deref())?,
            status: tag(&row.status)?,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CheckinRow {
    pub id: i64,
    pub collaboration_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub completed: String,
    pub blocked: String,
    pub next_steps: String,
    pub created_at: DateTime<Utc>,
}

impl From<CheckinRow> for Checkin {
    fn from(row: CheckinRow) -> Self {
        Checkin {
            id: row.id,
            collaboration_id: row.collaboration_id,
            user_id: row.user_id,
            user_name: row.user_name,
            completed: row.completed,
            blocked: row.blocked,
            next_steps: row.next_steps,
            created_at: row.created_at,
        }
    }
}

/// Convert a batch of rows, failing on the first corrupt one
pub(crate) fn convert<R, T>(rows: Vec<R>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::{ProjectStatus, RequestKind, RequestStatus};

    fn project_row() -> ProjectRow {
        ProjectRow {
            id: 1,
            owner_id: 2,
            name: "Row".into(),
            project_type: "freelance".into(),
            stage: "client_signed".into(),
            roles_needed: Json([UserRole::FullStack].into()),
            skills_needed: Json(["SQL".to_string()].into()),
            hours_per_week: 6,
            duration: "8_plus_weeks".into(),
            goal: "delivery".into(),
            location: "in_person".into(),
            status: "active".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_project_row_decodes() {
        let project = Project::try_from(project_row()).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(project.needs_role(UserRole::FullStack));
        assert_eq!(project.details.hours_per_week, 6);
    }

    #[test]
    fn test_unknown_tag_is_corrupt() {
        let mut row = project_row();
        row.status = "archived".into();
        let err = Project::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::Decode(_)));
    }

    #[test]
    fn test_negative_hours_is_corrupt() {
        let mut row = project_row();
        row.hours_per_week = -1;
        assert!(Project::try_from(row).is_err());
    }

    #[test]
    fn test_request_row_decodes() {
        let row = RequestRow {
            id: 3,
            project_id: 1,
            sender_id: 2,
            recipient_id: 4,
            kind: "invitation".into(),
            message: String::new(),
            status: "pending".into(),
            created_at: Utc::now(),
            responded_at: None,
        };
        let request = CollaborationRequest::try_from(row).unwrap();
        assert_eq!(request.kind, RequestKind::Invitation);
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.candidate_id(), 4);
    }
}
