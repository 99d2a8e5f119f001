//! Error types for shoutbox-server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use shoutbox_store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// API error type with automatic HTTP status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store rejected or failed the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No datastore was configured at startup
    #[error("message store not configured")]
    NotConfigured,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(StoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
