//! API routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{collaborations, projects, requests, users};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects_router())
        .nest("/collaborations", collaborations_router())
        .nest("/users", users_router())
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route("/:id", get(projects::get_project).put(projects::update_project))
        .route("/:id/status", put(projects::update_status))
        .route("/:id/matches", get(projects::list_matches))
}

fn collaborations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(collaborations::list_collaborations))
        .route("/requests", post(requests::create_request))
        .route("/requests/incoming", get(requests::incoming))
        .route("/requests/outgoing", get(requests::outgoing))
        .route("/requests/:id", put(requests::respond))
        .route("/invitations", post(requests::invite))
        .route("/:id", get(collaborations::get_collaboration))
        .route(
            "/:id/checkins",
            get(collaborations::list_checkins).post(collaborations::post_checkin),
        )
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/me", put(users::update_me))
        .route("/:id", get(users::get_user))
}
