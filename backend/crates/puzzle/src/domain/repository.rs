//! Repository Traits
//!
//! Interfaces for data persistence and the external collaborators the
//! puzzle domain consumes. Implementations are in the infrastructure
//! layer.

use kernel::id::{PuzzleId, UserId};

use crate::domain::entities::Puzzle;
use crate::domain::projection::CreatorCard;
use crate::error::PuzzleResult;

/// Puzzle repository trait
#[trait_variant::make(PuzzleRepository: Send)]
pub trait LocalPuzzleRepository {
    /// Persist a newly minted puzzle. The storage layer's unique
    /// constraint on the id is the final arbiter of allocation races.
    async fn create(&self, puzzle: &Puzzle) -> PuzzleResult<()>;

    /// Find a puzzle by id
    async fn find_by_id(&self, id: PuzzleId) -> PuzzleResult<Option<Puzzle>>;

    /// Write back all mutable fields (content, status, counters)
    async fn update(&self, puzzle: &Puzzle) -> PuzzleResult<()>;

    /// Delete a puzzle
    async fn delete(&self, id: PuzzleId) -> PuzzleResult<()>;

    /// List public puzzles, newest activity first
    async fn list_public(&self, page: u32, limit: u32) -> PuzzleResult<Vec<Puzzle>>;

    /// List a creator's puzzles, newest activity first. Private and
    /// draft puzzles are only included when `include_hidden` is set.
    async fn list_by_creator(
        &self,
        creator_id: UserId,
        include_hidden: bool,
        page: u32,
        limit: u32,
    ) -> PuzzleResult<Vec<Puzzle>>;
}

/// Existence probe consumed by the id allocator. Must reflect committed
/// state at call time for the allocator's guarantee to hold.
#[trait_variant::make(IdOccupancy: Send)]
pub trait LocalIdOccupancy {
    async fn exists_with_id(&self, id: PuzzleId) -> PuzzleResult<bool>;
}

/// Creator reference resolution, consumed when building projections.
/// The puzzle holds a non-owning reference; expanding it to a
/// [`CreatorCard`] is this collaborator's job.
#[trait_variant::make(CreatorDirectory: Send)]
pub trait LocalCreatorDirectory {
    async fn resolve_creator(&self, id: UserId) -> PuzzleResult<Option<CreatorCard>>;
}

/// Per-user engagement bookkeeping (which users liked/favorited which
/// puzzles). The counters themselves carry no dedup state; idempotence
/// of a like/unlike transition is enforced here, at the storage
/// boundary. Every mutation returns whether the transition actually
/// happened, so callers only adjust counters on a real change.
#[trait_variant::make(EngagementLedger: Send)]
pub trait LocalEngagementLedger {
    async fn add_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool>;

    async fn remove_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool>;

    async fn add_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool>;

    async fn remove_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool>;

    /// Record that a user solved a puzzle. Idempotent.
    async fn record_completion(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool>;
}
