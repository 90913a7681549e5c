//! Collaboration and check-in API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cortex_core::Id;
use cortex_models::NewCheckin;
use cortex_services::{
    CollaborationDetailService, ListCheckinsService, ListCollaborationsService,
    PostCheckinService,
};

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser};

/// GET /api/collaborations
pub async fn list_collaborations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(ListCollaborationsService::new(state.context(&user)).call().await?))
}

/// GET /api/collaborations/:id
pub async fn get_collaboration(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let detail = CollaborationDetailService::new(state.context(&user))
        .call(id)
        .await?;
    Ok(Json(detail))
}

/// GET /api/collaborations/:id/checkins
pub async fn list_checkins(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let checkins = ListCheckinsService::new(state.context(&user)).call(id).await?;
    Ok(Json(checkins))
}

/// POST /api/collaborations/:id/checkins
pub async fn post_checkin(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
    ApiJson(checkin): ApiJson<NewCheckin>,
) -> ApiResult<impl IntoResponse> {
    let checkin = PostCheckinService::new(state.context(&user))
        .call(id, checkin)
        .await?;
    Ok((StatusCode::CREATED, Json(checkin)))
}
