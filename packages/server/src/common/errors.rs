use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the HTTP API.
///
/// Write paths surface `Store` as a generic 500 (details go to the log, not
/// the caller). Read/aggregation paths are expected to catch store errors
/// themselves and degrade instead of returning this type.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing or invalid field: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller supplied an ID that must not reach the store: empty, the
    /// literal "undefined" a broken client serializes, or not a UUID at all.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "field": field }),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "unable to save" }),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
