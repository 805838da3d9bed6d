//! HTTP error mapping for the book endpoints.
//!
//! # Responsibility
//! - Translate service errors into HTTP status codes.
//! - Render a stable JSON error body for clients.
//!
//! # Invariants
//! - `NotFound` always maps to 404; every other failure maps to 500.
//! - Error bodies never leak SQL or connection details beyond the service
//!   error message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::BookServiceError;
use serde::Serialize;
use thiserror::Error;

/// Result type for book endpoint handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Target book does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Service or storage failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookServiceError> for ApiError {
    fn from(err: BookServiceError) -> Self {
        match &err {
            BookServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
