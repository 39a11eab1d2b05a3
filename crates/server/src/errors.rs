use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error returned by every handler: a status plus the JSON error envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            }
            // the classifier already replaced store details with a generic message
            ServiceError::Repo(r) if r.is_not_found() => ApiError::new(StatusCode::NOT_FOUND, r.message, None),
            ServiceError::Repo(r) => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, r.message, None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, detail = ?self.detail, "request failed");
        }
        (self.status, Json(ErrorBody { error: self.error, detail: self.detail })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
