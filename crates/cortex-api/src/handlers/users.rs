//! User profile API handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use cortex_core::Id;
use cortex_models::ProfileUpdate;
use cortex_services::{ShowUserService, UpdateProfileService};

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser};

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(ShowUserService::new(state.context(&user)).call(id).await?))
}

/// PUT /api/users/me
///
/// Saving a complete profile makes the caller eligible for matching.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> ApiResult<impl IntoResponse> {
    let profile = UpdateProfileService::new(state.context(&user))
        .call(update)
        .await?;
    Ok(Json(profile))
}
