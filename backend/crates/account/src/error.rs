//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// No valid bearer token on a route that requires one
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated, but not the target user or an admin
    #[error("You do not have access to this user")]
    Forbidden,

    /// Username already exists
    #[error("Username already taken")]
    UsernameTaken,

    /// Email already exists
    #[error("Email already in use")]
    EmailTaken,

    /// Username failed validation
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password policy violation
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Wrong username or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing required query parameter
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::Unauthorized | AccountError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::Forbidden => StatusCode::FORBIDDEN,
            AccountError::UsernameTaken | AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::InvalidUsername(_)
            | AccountError::PasswordValidation(_)
            | AccountError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::Unauthorized | AccountError::InvalidCredentials => ErrorKind::Unauthorized,
            AccountError::Forbidden => ErrorKind::Forbidden,
            AccountError::UsernameTaken | AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::InvalidUsername(_)
            | AccountError::PasswordValidation(_)
            | AccountError::MissingParameter(_) => ErrorKind::BadRequest,
            AccountError::Database(_) | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
