//! API error types with IntoResponse
//!
//! Client errors echo a human-readable reason. Storage errors answer with a
//! fixed per-route message; the underlying error only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body could not be decoded (400)
    BadRequest(String),

    /// Storage operation failed (500, logged)
    Storage {
        message: &'static str,
        source: DbError,
    },
}

impl ApiError {
    /// Map a storage failure to a 500 carrying `message`.
    ///
    /// ```ignore
    /// store.list().await.map_err(ApiError::storage("Error fetching users"))?;
    /// ```
    pub fn storage(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Storage { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => {
                tracing::debug!(field = e.field(), "Rejected submission: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            Self::BadRequest(reason) => {
                tracing::debug!("Malformed request body: {}", reason);
                (StatusCode::BAD_REQUEST, reason).into_response()
            }
            Self::Storage { message, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
