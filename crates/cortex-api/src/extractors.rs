//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use cortex_core::config::MatchingConfig;
use cortex_core::Id;
use cortex_matching::DEFAULT_LIMIT;
use cortex_services::{CollaborationStore, ServiceContext};

use crate::error::ApiError;

/// Header set by the upstream authenticator
pub const USER_ID_HEADER: &str = "x-user-id";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CollaborationStore>,
    pub config: Arc<ApiConfig>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Length of a ranked candidate list
    pub max_candidates: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_LIMIT,
        }
    }
}

impl From<&MatchingConfig> for ApiConfig {
    fn from(matching: &MatchingConfig) -> Self {
        Self {
            max_candidates: matching.max_candidates,
        }
    }
}

impl AppState {
    pub fn new(store: Arc<dyn CollaborationStore>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Service context acting for `user`
    pub fn context(&self, user: &AuthenticatedUser) -> ServiceContext<'_, dyn CollaborationStore> {
        ServiceContext::new(self.store.as_ref(), user.id())
    }
}

/// Caller identity established upstream
///
/// Session validation happens in front of this service; requests arrive
/// with the account id in `X-User-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Id);

impl AuthenticatedUser {
    pub fn id(&self) -> Id {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::unauthenticated("Authentication required"))?;

        header
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<Id>().ok())
            .filter(|id| *id > 0)
            .map(AuthenticatedUser)
            .ok_or_else(|| ApiError::unauthenticated("Malformed caller identity"))
    }
}

/// JSON body whose rejections use the API error format
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
