//! Error types for the repository core and the HTTP boundary
//!
//! The core only ever reports a missing short code. Validation failures are
//! produced by the handlers before the repository is reached. [`AppError`]
//! owns the translation of both into JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by [`UrlRepository`](crate::repository::UrlRepository)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("short code not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Client-facing errors returned by the request handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing 'url' in request body.")]
    MissingUrl,
    #[error("Invalid URL.")]
    InvalidUrl,
    #[error("Short code not found.")]
    NotFound,
    #[error("Stored URL cannot be used as a redirect target.")]
    InvalidRedirectTarget,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::InvalidUrl => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidRedirectTarget => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => AppError::NotFound,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
