//! PostgreSQL implementation of [`CollaborationStore`]
//!
//! Every write that reads before it writes runs in a SERIALIZABLE
//! transaction and locks the rows it decides on. Lock order is request,
//! then project, then collaborations.

use async_trait::async_trait;
use chrono::Utc;
use cortex_core::{ConflictKind, Id, OpError, OpResult};
use cortex_models::{
    Checkin, Collaboration, CollaborationDetail, CollaborationOverview, CollaborationRequest,
    CollaborationSummary, Decision, NewCheckin, NewCollaborationRequest, NewProject,
    ProfileUpdate, Project, ProjectDetails, ProjectMember, ProjectStatus, RequestStatus,
    RequestView, User,
};
use cortex_services::{
    CollaborationFactory, CollaborationStore, ProjectLifecycle, ProjectTransition,
    RequestLifecycle, Resolution, TransitionPlan,
};
use sqlx::types::Json;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::pool::Database;
use crate::repository::{RepositoryError, RepositoryResult};
use crate::rows::{
    convert, tag, CheckinRow, CollaborationRow, MemberRow, ProjectRow, RequestRow,
    RequestViewRow, SummaryRow, UserRow, COLLABORATION_COLUMNS, PROJECT_COLUMNS,
    REQUEST_COLUMNS, USER_COLUMNS,
};

const REQUEST_VIEW_SELECT: &str = r#"
    SELECT r.id, r.project_id, r.sender_id, r.recipient_id, r.kind, r.message,
           r.status, r.created_at, r.responded_at,
           p.name AS project_name,
           s.name AS sender_name,
           rc.name AS recipient_name
    FROM collaboration_requests r
    JOIN projects p ON p.id = r.project_id
    JOIN users s ON s.id = r.sender_id
    JOIN users rc ON rc.id = r.recipient_id
"#;

const CHECKIN_SELECT: &str = r#"
    SELECT ch.id, ch.collaboration_id, ch.user_id, COALESCE(u.name, '') AS user_name,
           ch.completed, ch.blocked, ch.next_steps, ch.created_at
    FROM checkins ch
    LEFT JOIN users u ON u.id = ch.user_id
"#;

/// Summary of a collaboration seen from one side; `counterpart` is the
/// column holding the other participant's user id.
fn summary_select(counterpart: &str, filter: &str) -> String {
    format!(
        r#"
        SELECT c.id AS collaboration_id, c.status AS collab_status, c.joined_at,
               p.id AS project_id, p.name AS project_name, p.project_type,
               p.status AS project_status, p.hours_per_week, p.duration, p.goal,
               u.id AS counterpart_id, u.name AS counterpart_name
        FROM collaborations c
        JOIN projects p ON p.id = c.project_id
        JOIN users u ON u.id = {counterpart}
        WHERE {filter} = $1
        ORDER BY c.joined_at DESC, c.id DESC
        "#
    )
}

fn to_i32(column: &str, value: u32) -> RepositoryResult<i32> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::Decode(format!("{} out of range: {}", column, value)))
}

/// Collaboration store backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn serializable(&self) -> RepositoryResult<Transaction<'static, Postgres>> {
        let mut tx = self.db.pool().begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn fetch_user(&self, id: Id) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn fetch_project(&self, id: Id) -> RepositoryResult<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .map(Project::try_from)
            .transpose()
    }

    async fn user_name(&self, id: Id) -> RepositoryResult<String> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(name.unwrap_or_default())
    }

    async fn projects_where(&self, filter: &str, value: &str) -> RepositoryResult<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE {filter} ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(value)
            .fetch_all(self.db.pool())
            .await?;
        convert(rows)
    }

    async fn request_views(&self, filter: &str, user_id: Id) -> RepositoryResult<Vec<RequestView>> {
        let sql = format!(
            "{REQUEST_VIEW_SELECT} WHERE {filter} ORDER BY r.created_at DESC, r.id DESC"
        );
        let rows = sqlx::query_as::<_, RequestViewRow>(&sql)
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;
        convert(rows)
    }

    async fn summaries(
        &self,
        counterpart: &str,
        filter: &str,
        user_id: Id,
    ) -> RepositoryResult<Vec<CollaborationSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(&summary_select(counterpart, filter))
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;
        convert(rows)
    }

    async fn do_save_profile(&self, user_id: Id, update: &ProfileUpdate) -> RepositoryResult<User> {
        let mut profile = User::new(user_id, "");
        profile.apply_profile(update);

        let sql = format!(
            r#"
            INSERT INTO users (id, name, role, skills, availability, timezone,
                               work_preference, portfolio, profile_complete)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                skills = EXCLUDED.skills,
                availability = EXCLUDED.availability,
                timezone = EXCLUDED.timezone,
                work_preference = EXCLUDED.work_preference,
                portfolio = EXCLUDED.portfolio,
                profile_complete = TRUE
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(profile.id)
            .bind(&profile.name)
            .bind(profile.role.map(|r| r.as_str()))
            .bind(Json(&profile.skills))
            .bind(to_i32("availability", profile.availability)?)
            .bind(&profile.timezone)
            .bind(profile.work_preference.map(|w| w.as_str()))
            .bind(Json(&profile.portfolio))
            .fetch_one(self.db.pool())
            .await?;
        row.try_into()
    }

    async fn do_insert_project(&self, project: NewProject) -> RepositoryResult<Project> {
        let mut tx = self.db.pool().begin().await?;

        // The owner's account may not have a profile row yet
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(project.owner_id)
            .execute(&mut *tx)
            .await?;

        let details = &project.details;
        let sql = format!(
            r#"
            INSERT INTO projects (owner_id, name, project_type, stage, roles_needed,
                                  skills_needed, hours_per_week, duration, goal, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(project.owner_id)
            .bind(&details.name)
            .bind(details.project_type.as_str())
            .bind(details.stage.as_str())
            .bind(Json(&details.roles_needed))
            .bind(Json(&details.skills_needed))
            .bind(to_i32("hours_per_week", details.hours_per_week)?)
            .bind(details.duration.as_str())
            .bind(details.goal.as_str())
            .bind(details.location.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        row.try_into()
    }

    async fn do_project_members(&self, project_id: Id) -> RepositoryResult<Vec<ProjectMember>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT c.id AS collaboration_id, c.user_id, u.name, u.role, c.status, c.joined_at
            FROM collaborations c
            JOIN users u ON u.id = c.user_id
            WHERE c.project_id = $1
            ORDER BY c.joined_at, c.id
            "#,
        )
        .bind(project_id)
        .fetch_all(self.db.pool())
        .await?;
        convert(rows)
    }

    async fn do_transition_project(
        &self,
        id: Id,
        to: ProjectStatus,
    ) -> RepositoryResult<ProjectTransition> {
        let mut tx = self.serializable().await?;
        let current = lock_project_status(&mut tx, id).await?;
        let plan = ProjectLifecycle::plan(current, to)?;
        let (changed, cascaded) = apply_plan(&mut tx, id, plan).await?;
        let project = project_in(&mut tx, id).await?;
        tx.commit().await?;

        Ok(ProjectTransition {
            project,
            changed,
            cascaded,
        })
    }

    async fn do_update_project(
        &self,
        id: Id,
        details: ProjectDetails,
        status: Option<ProjectStatus>,
    ) -> RepositoryResult<ProjectTransition> {
        let mut tx = self.serializable().await?;
        let current = lock_project_status(&mut tx, id).await?;
        ProjectLifecycle::ensure_editable(current)?;
        let plan = match status {
            Some(to) => ProjectLifecycle::plan(current, to)?,
            None => TransitionPlan::Unchanged,
        };

        sqlx::query(
            r#"
            UPDATE projects SET
                name = $2, project_type = $3, stage = $4, roles_needed = $5,
                skills_needed = $6, hours_per_week = $7, duration = $8, goal = $9,
                location = $10
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&details.name)
        .bind(details.project_type.as_str())
        .bind(details.stage.as_str())
        .bind(Json(&details.roles_needed))
        .bind(Json(&details.skills_needed))
        .bind(to_i32("hours_per_week", details.hours_per_week)?)
        .bind(details.duration.as_str())
        .bind(details.goal.as_str())
        .bind(details.location.as_str())
        .execute(&mut *tx)
        .await?;

        let (changed, cascaded) = apply_plan(&mut tx, id, plan).await?;
        let project = project_in(&mut tx, id).await?;
        tx.commit().await?;

        Ok(ProjectTransition {
            project,
            changed,
            cascaded,
        })
    }

    async fn do_insert_request(
        &self,
        request: NewCollaborationRequest,
    ) -> RepositoryResult<CollaborationRequest> {
        let mut tx = self.serializable().await?;

        let sql = format!(
            "SELECT {COLLABORATION_COLUMNS} FROM collaborations WHERE project_id = $1 AND user_id = $2"
        );
        let members: Vec<Collaboration> = convert(
            sqlx::query_as::<_, CollaborationRow>(&sql)
                .bind(request.project_id)
                .bind(request.candidate_id())
                .fetch_all(&mut *tx)
                .await?,
        )?;
        RequestLifecycle::check_candidate(request.candidate_id(), &members)?;

        // The partial unique index turns a racing duplicate into 23505
        let sql = format!(
            r#"
            INSERT INTO collaboration_requests (project_id, sender_id, recipient_id, kind, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let created: CollaborationRequest = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(request.project_id)
            .bind(request.sender_id)
            .bind(request.recipient_id)
            .bind(request.kind.as_str())
            .bind(&request.message)
            .fetch_one(&mut *tx)
            .await?
            .try_into()?;
        tx.commit().await?;
        Ok(created)
    }

    async fn do_resolve_request(&self, id: Id, decision: Decision) -> RepositoryResult<Resolution> {
        let mut tx = self.serializable().await?;

        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM collaboration_requests WHERE id = $1 FOR UPDATE"
        );
        let current: CollaborationRequest = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| OpError::not_found("CollaborationRequest", id))?
            .try_into()?;
        let resolved = RequestLifecycle::resolve(&current, decision, Utc::now())?;

        let sql = format!(
            r#"
            UPDATE collaboration_requests SET status = $2, responded_at = $3
            WHERE id = $1 AND status = $4
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let request: CollaborationRequest = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(id)
            .bind(resolved.status.as_str())
            .bind(resolved.responded_at)
            .bind(RequestStatus::Pending.as_str())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ConflictKind::AlreadyResolved)?
            .try_into()?;

        let mut project_status = lock_project_status(&mut tx, request.project_id).await?;
        let mut collaboration = None;
        if decision == Decision::Accepted {
            let new = CollaborationFactory::build(&request, project_status);
            let sql = format!(
                r#"
                INSERT INTO collaborations (project_id, user_id, status, joined_at)
                VALUES ($1, $2, $3, $4)
                RETURNING {COLLABORATION_COLUMNS}
                "#
            );
            let row = sqlx::query_as::<_, CollaborationRow>(&sql)
                .bind(new.project_id)
                .bind(new.user_id)
                .bind(new.status.as_str())
                .bind(request.responded_at)
                .fetch_one(&mut *tx)
                .await?;
            collaboration = Some(Collaboration::try_from(row)?);

            if ProjectLifecycle::activates_on_accept(project_status) {
                let bumped = sqlx::query("UPDATE projects SET status = $2 WHERE id = $1 AND status = $3")
                    .bind(request.project_id)
                    .bind(ProjectStatus::Active.as_str())
                    .bind(ProjectStatus::Open.as_str())
                    .execute(&mut *tx)
                    .await?;
                if bumped.rows_affected() > 0 {
                    project_status = ProjectStatus::Active;
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(
            request_id = id,
            status = %request.status,
            project_status = %project_status,
            "request resolved"
        );
        Ok(Resolution {
            request,
            collaboration,
            project_status,
        })
    }

    async fn do_collaboration_detail(&self, id: Id) -> RepositoryResult<Option<CollaborationDetail>> {
        let sql = format!("SELECT {COLLABORATION_COLUMNS} FROM collaborations WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, CollaborationRow>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
        else {
            return Ok(None);
        };
        let collaboration = Collaboration::try_from(row)?;
        let project = self
            .fetch_project(collaboration.project_id)
            .await?
            .ok_or_else(|| OpError::not_found("Project", collaboration.project_id))?;

        Ok(Some(CollaborationDetail {
            collaborator_name: self.user_name(collaboration.user_id).await?,
            owner_name: self.user_name(project.owner_id).await?,
            collaboration,
            project,
        }))
    }

    async fn do_insert_checkin(
        &self,
        collaboration_id: Id,
        author_id: Id,
        checkin: NewCheckin,
    ) -> RepositoryResult<Checkin> {
        let row = sqlx::query_as::<_, CheckinRow>(
            r#"
            WITH inserted AS (
                INSERT INTO checkins (collaboration_id, user_id, completed, blocked, next_steps)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT i.id, i.collaboration_id, i.user_id, COALESCE(u.name, '') AS user_name,
                   i.completed, i.blocked, i.next_steps, i.created_at
            FROM inserted i
            LEFT JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(collaboration_id)
        .bind(author_id)
        .bind(&checkin.completed)
        .bind(&checkin.blocked)
        .bind(&checkin.next_steps)
        .fetch_one(self.db.pool())
        .await?;
        Ok(row.into())
    }
}

/// Current status of a project, locked for the rest of the transaction
async fn lock_project_status(conn: &mut PgConnection, id: Id) -> RepositoryResult<ProjectStatus> {
    let status = sqlx::query_scalar::<_, String>("SELECT status FROM projects WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| OpError::not_found("Project", id))?;
    tag(&status)
}

async fn project_in(conn: &mut PgConnection, id: Id) -> RepositoryResult<Project> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
    sqlx::query_as::<_, ProjectRow>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?
        .try_into()
}

/// Write a planned transition; returns (changed, cascaded)
async fn apply_plan(
    conn: &mut PgConnection,
    project_id: Id,
    plan: TransitionPlan,
) -> RepositoryResult<(bool, u64)> {
    let TransitionPlan::Apply { to, cascade } = plan else {
        return Ok((false, 0));
    };
    sqlx::query("UPDATE projects SET status = $2 WHERE id = $1")
        .bind(project_id)
        .bind(to.as_str())
        .execute(&mut *conn)
        .await?;

    let mut cascaded = 0;
    if let Some(status) = cascade {
        cascaded = sqlx::query("UPDATE collaborations SET status = $2 WHERE project_id = $1")
            .bind(project_id)
            .bind(status.as_str())
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    tracing::debug!(project_id, status = %to, cascaded, "project transitioned");
    Ok((true, cascaded))
}

#[async_trait]
impl CollaborationStore for PgStore {
    async fn ping(&self) -> OpResult<()> {
        self.db.ping().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn find_user(&self, id: Id) -> OpResult<Option<User>> {
        Ok(self.fetch_user(id).await?)
    }

    async fn matching_pool(&self) -> OpResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE profile_complete ORDER BY id");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(convert(rows)?)
    }

    async fn save_profile(&self, user_id: Id, update: &ProfileUpdate) -> OpResult<User> {
        Ok(self.do_save_profile(user_id, update).await?)
    }

    async fn find_project(&self, id: Id) -> OpResult<Option<Project>> {
        Ok(self.fetch_project(id).await?)
    }

    async fn insert_project(&self, project: NewProject) -> OpResult<Project> {
        Ok(self.do_insert_project(project).await?)
    }

    async fn open_projects(&self) -> OpResult<Vec<Project>> {
        Ok(self
            .projects_where("status = $1", ProjectStatus::Open.as_str())
            .await?)
    }

    async fn projects_owned_by(&self, owner_id: Id) -> OpResult<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(owner_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(convert(rows)?)
    }

    async fn project_members(&self, project_id: Id) -> OpResult<Vec<ProjectMember>> {
        Ok(self.do_project_members(project_id).await?)
    }

    async fn transition_project(&self, id: Id, to: ProjectStatus) -> OpResult<ProjectTransition> {
        Ok(self.do_transition_project(id, to).await?)
    }

    async fn update_project(
        &self,
        id: Id,
        details: ProjectDetails,
        status: Option<ProjectStatus>,
    ) -> OpResult<ProjectTransition> {
        Ok(self.do_update_project(id, details, status).await?)
    }

    async fn find_request(&self, id: Id) -> OpResult<Option<CollaborationRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM collaboration_requests WHERE id = $1");
        let row = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.map(CollaborationRequest::try_from).transpose()?)
    }

    async fn requests_for_project(&self, project_id: Id) -> OpResult<Vec<CollaborationRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM collaboration_requests WHERE project_id = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(project_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(convert(rows)?)
    }

    async fn insert_request(
        &self,
        request: NewCollaborationRequest,
    ) -> OpResult<CollaborationRequest> {
        Ok(self.do_insert_request(request).await?)
    }

    async fn resolve_request(&self, id: Id, decision: Decision) -> OpResult<Resolution> {
        Ok(self.do_resolve_request(id, decision).await?)
    }

    async fn incoming_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>> {
        Ok(self
            .request_views("r.recipient_id = $1 AND r.status = 'pending'", user_id)
            .await?)
    }

    async fn outgoing_requests(&self, user_id: Id) -> OpResult<Vec<RequestView>> {
        Ok(self.request_views("r.sender_id = $1", user_id).await?)
    }

    async fn collaborations_for_project(&self, project_id: Id) -> OpResult<Vec<Collaboration>> {
        let sql = format!(
            "SELECT {COLLABORATION_COLUMNS} FROM collaborations WHERE project_id = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, CollaborationRow>(&sql)
            .bind(project_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(convert(rows)?)
    }

    async fn collaboration_overview(&self, user_id: Id) -> OpResult<CollaborationOverview> {
        Ok(CollaborationOverview {
            as_owner: self.summaries("c.user_id", "p.owner_id", user_id).await?,
            as_collaborator: self.summaries("p.owner_id", "c.user_id", user_id).await?,
        })
    }

    async fn collaboration_detail(&self, id: Id) -> OpResult<Option<CollaborationDetail>> {
        Ok(self.do_collaboration_detail(id).await?)
    }

    async fn insert_checkin(
        &self,
        collaboration_id: Id,
        author_id: Id,
        checkin: NewCheckin,
    ) -> OpResult<Checkin> {
        Ok(self
            .do_insert_checkin(collaboration_id, author_id, checkin)
            .await?)
    }

    async fn checkins(&self, collaboration_id: Id) -> OpResult<Vec<Checkin>> {
        let sql = format!(
            "{CHECKIN_SELECT} WHERE ch.collaboration_id = $1 ORDER BY ch.created_at DESC, ch.id DESC"
        );
        let rows = sqlx::query_as::<_, CheckinRow>(&sql)
            .bind(collaboration_id)
            .fetch_all(self.db.pool())
            .await
            .map_err(RepositoryError::from)?;
        Ok(rows.into_iter().map(Checkin::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_select_joins_counterpart() {
        let owner_side = summary_select("c.user_id", "p.owner_id");
        assert!(owner_side.contains("JOIN users u ON u.id = c.user_id"));
        assert!(owner_side.contains("WHERE p.owner_id = $1"));

        let collaborator_side = summary_select("p.owner_id", "c.user_id");
        assert!(collaborator_side.contains("JOIN users u ON u.id = p.owner_id"));
        assert!(collaborator_side.contains("WHERE c.user_id = $1"));
    }

    #[test]
    fn test_hours_out_of_range() {
        assert_eq!(to_i32("hours_per_week", 40).unwrap(), 40);
        assert!(matches!(
            to_i32("hours_per_week", u32::MAX),
            Err(RepositoryError::Decode(_))
        ));
    }
}
