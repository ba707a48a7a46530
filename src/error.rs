//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Missing or malformed request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown store or snapshot target
    #[error("{0}")]
    NotFound(String),

    /// Store name already taken by the same owner
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure; detail is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    pub fn store_not_found() -> Self {
        CacheError::NotFound("Store not found".to_string())
    }

    pub fn missing(field: &str) -> Self {
        CacheError::InvalidRequest(format!("{field} required"))
    }
}

impl From<JsonRejection> for CacheError {
    fn from(rejection: JsonRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CacheError {
    fn from(rejection: QueryRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            CacheError::Internal(detail) => {
                error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
