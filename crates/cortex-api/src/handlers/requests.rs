//! Collaboration request API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cortex_core::Id;
use cortex_models::Decision;
use cortex_services::{
    CreateRequestService, InboxService, InviteCandidateService, RespondToRequestService,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser};

/// POST /api/collaborations/requests
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(dto): ApiJson<CreateRequestDto>,
) -> ApiResult<impl IntoResponse> {
    let request = CreateRequestService::new(state.context(&user))
        .call(dto.project_id, dto.message)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// POST /api/collaborations/invitations
pub async fn invite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(dto): ApiJson<InviteDto>,
) -> ApiResult<impl IntoResponse> {
    let request = InviteCandidateService::new(state.context(&user))
        .call(dto.project_id, dto.candidate_id, dto.message)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/collaborations/requests/incoming
pub async fn incoming(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(InboxService::new(state.context(&user)).incoming().await?))
}

/// GET /api/collaborations/requests/outgoing
pub async fn outgoing(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(InboxService::new(state.context(&user)).outgoing().await?))
}

/// PUT /api/collaborations/requests/:id
pub async fn respond(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
    ApiJson(dto): ApiJson<RespondDto>,
) -> ApiResult<impl IntoResponse> {
    let resolution = RespondToRequestService::new(state.context(&user))
        .call(id, dto.status)
        .await?;
    Ok(Json(resolution))
}

// DTOs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestDto {
    pub project_id: Id,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteDto {
    pub project_id: Id,
    pub candidate_id: Id,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondDto {
    pub status: Decision,
}
