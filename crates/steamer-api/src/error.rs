use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use steamer_resolver::{ResolveError, StoreError, PROFILE_NOT_FOUND};

/// Application error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unprocessable(String),
    Conflict(String),
    Unauthorized,
    /// Operation-specific failure message; details are logged, not returned
    Failed(&'static str),
    Internal(String),
}

impl AppError {
    /// Map an engine failure, hiding internal detail behind `failure`
    pub fn from_resolve(err: ResolveError, failure: &'static str) -> Self {
        match &err {
            ResolveError::NotFound(msg) | ResolveError::Fetch(msg) => {
                AppError::NotFound(msg.clone())
            }
            ResolveError::Conflict(_) | ResolveError::Store(_) => {
                tracing::error!(error = %err, "{failure}");
                AppError::Failed(failure)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Invalid or missing authorization token".into(),
            ),
            AppError::Failed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (
            status,
            axum::Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => AppError::Conflict("Profile already exists".into()),
            StoreError::NotFound(_) => AppError::NotFound(PROFILE_NOT_FOUND.into()),
            other => AppError::Internal(other.to_string()),
        }
    }
}
