//! Puzzle Error Types
//!
//! This module provides puzzle-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Puzzle-specific result type alias
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Puzzle-specific error variants
///
/// Note that a malformed stored grid is NOT represented here: decode
/// failures degrade to empty containers inside the domain so that a
/// single corrupt record cannot take down a listing or detail endpoint.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Puzzle does not exist (or is hidden from the requester)
    #[error("Puzzle not found")]
    NotFound,

    /// No valid bearer token on a route that requires one
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated, but not the creator or an admin
    #[error("You do not have access to this puzzle")]
    Forbidden,

    /// Submitted puzzle data failed validation
    #[error("Invalid puzzle data: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PuzzleError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PuzzleError::NotFound => StatusCode::NOT_FOUND,
            PuzzleError::Unauthorized => StatusCode::UNAUTHORIZED,
            PuzzleError::Forbidden => StatusCode::FORBIDDEN,
            PuzzleError::Validation(_) => StatusCode::BAD_REQUEST,
            PuzzleError::Database(_) | PuzzleError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PuzzleError::NotFound => ErrorKind::NotFound,
            PuzzleError::Unauthorized => ErrorKind::Unauthorized,
            PuzzleError::Forbidden => ErrorKind::Forbidden,
            PuzzleError::Validation(_) => ErrorKind::BadRequest,
            PuzzleError::Database(_) | PuzzleError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PuzzleError::Database(e) => {
                tracing::error!(error = %e, "Puzzle database error");
            }
            PuzzleError::Internal(msg) => {
                tracing::error!(message = %msg, "Puzzle internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Puzzle error");
            }
        }
    }
}

impl IntoResponse for PuzzleError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for PuzzleError {
    fn from(err: AppError) -> Self {
        PuzzleError::Internal(err.to_string())
    }
}
