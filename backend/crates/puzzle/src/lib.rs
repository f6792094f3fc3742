//! Puzzle Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Grid/hint models, puzzle entity, projections, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Redaction Model
//! - The stored cell grid is the single source of truth for solved content
//! - `to_public_view` is the only path that scrubs answers; `to_owner_view`
//!   is the only sanctioned path that exposes them
//! - Which projection runs is the HTTP layer's authorization decision;
//!   the domain performs no access checks of its own
//! - Malformed stored grids degrade to empty output, never to a crash or
//!   a partially-redacted response

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PuzzleConfig;
pub use error::{PuzzleError, PuzzleResult};
pub use infra::postgres::PgPuzzleRepository;
pub use presentation::router::{creator_puzzles_router, puzzle_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::grid::*;
    pub use crate::domain::projection::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPuzzleRepository as PuzzleStore;
}

#[cfg(test)]
mod tests;
