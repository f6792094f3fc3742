//! Application Layer
//!
//! Use cases and application services. Authorization (which projection
//! a requester gets, who may mutate what) is decided here, on behalf of
//! the HTTP layer; the domain itself performs no access checks.

pub mod access;
pub mod config;
pub mod create;
pub mod engage;
pub mod fetch;
pub mod mutate;
pub mod solve;

// Re-exports
pub use access::Access;
pub use config::PuzzleConfig;
pub use create::{CreatePuzzleInput, CreatePuzzleUseCase};
pub use engage::{EngagementCounts, EngagePuzzleUseCase};
pub use fetch::FetchPuzzleUseCase;
pub use mutate::{DeletePuzzleUseCase, UpdatePuzzleInput, UpdatePuzzleUseCase};
pub use solve::ValidateSolutionUseCase;
