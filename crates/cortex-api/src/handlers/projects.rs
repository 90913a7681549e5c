//! Project API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cortex_core::Id;
use cortex_models::{ProjectDetails, ProjectStatus};
use cortex_services::{
    CreateProjectService, ListProjectsService, ProjectScope, RankCandidatesService,
    ShowProjectService, UpdateProjectService, UpdateProjectStatusService,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser};

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let scope = if params.mine {
        ProjectScope::Mine
    } else {
        ProjectScope::Open
    };
    let projects = ListProjectsService::new(state.context(&user))
        .call(scope)
        .await?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(details): ApiJson<ProjectDetails>,
) -> ApiResult<impl IntoResponse> {
    let project = CreateProjectService::new(state.context(&user))
        .call(details)
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let view = ShowProjectService::new(state.context(&user)).call(id).await?;
    Ok(Json(view))
}

/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
    ApiJson(dto): ApiJson<UpdateProjectDto>,
) -> ApiResult<impl IntoResponse> {
    let transition = UpdateProjectService::new(state.context(&user))
        .call(id, dto.details, dto.status)
        .await?;
    Ok(Json(transition))
}

/// PUT /api/projects/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
    ApiJson(dto): ApiJson<StatusDto>,
) -> ApiResult<impl IntoResponse> {
    let transition = UpdateProjectStatusService::new(state.context(&user))
        .call(id, dto.status)
        .await?;
    Ok(Json(transition))
}

/// GET /api/projects/:id/matches
pub async fn list_matches(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let ranked = RankCandidatesService::new(state.context(&user), state.config.max_candidates)
        .call(id)
        .await?;
    Ok(Json(ranked))
}

// DTOs
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Only the caller's own projects, in any status
    #[serde(default)]
    pub mine: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectDto {
    #[serde(flatten)]
    pub details: ProjectDetails,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusDto {
    pub status: ProjectStatus,
}
