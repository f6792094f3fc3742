//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration and login with username + password
//! - Stateless signed bearer tokens (7-day expiry)
//! - One-time temporary passwords for account recovery
//! - Public vs full profile projections (admins and the user
//!   themselves see the full record)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Temporary passwords are single-use, cleared on first login
//! - Tokens are HMAC-SHA256 signed; the admin role travels in the
//!   claims, the database stays the source of truth at issue time

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}
