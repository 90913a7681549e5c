//! API error handling
//!
//! Every failure leaves the API as a JSON error body carrying the stable
//! `error_code()` of the underlying [`OpError`].

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cortex_core::OpError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// No usable caller identity on the request
    Unauthenticated(String),
    /// Body or parameters could not be read
    BadRequest(String),
    /// A service rejected the operation
    Domain(OpError),
}

impl ApiError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        ApiError::Unauthenticated(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    pub fn error_identifier(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::BadRequest(_) => "invalid_request_body",
            ApiError::Domain(err) => err.error_code(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthenticated(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Domain(OpError::Validation(errors)) => errors.full_messages().join(", "),
            ApiError::Domain(OpError::Internal(_)) | ApiError::Domain(OpError::Config(_)) => {
                "internal server error".to_string()
            }
            ApiError::Domain(OpError::Unavailable(_)) => {
                "service temporarily unavailable".to_string()
            }
            ApiError::Domain(err) => err.to_string(),
        }
    }
}

impl From<OpError> for ApiError {
    fn from(err: OpError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "_type")]
    type_name: &'static str,
    #[serde(rename = "errorIdentifier")]
    error_identifier: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = ErrorBody {
            type_name: "Error",
            error_identifier: self.error_identifier(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
