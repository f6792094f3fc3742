//! Engagement Use Case
//!
//! Like/unlike and favorite/unfavorite. The ledger decides whether the
//! transition is real (a second like from the same user is a no-op);
//! only a real transition moves the counter. The counter write itself
//! is a plain read-modify-write: exactness under concurrent mutation is
//! the storage transaction boundary's concern, not this code's.

use std::sync::Arc;

use kernel::id::{PuzzleId, UserId};
use serde::Serialize;

use crate::application::access::Access;
use crate::domain::entities::{Puzzle, Status};
use crate::domain::repository::{EngagementLedger, PuzzleRepository};
use crate::error::{PuzzleError, PuzzleResult};

/// Counter snapshot returned after an engagement mutation
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCounts {
    pub like_count: i32,
    pub favorite_count: i32,
}

impl From<&Puzzle> for EngagementCounts {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            like_count: puzzle.like_count,
            favorite_count: puzzle.favorite_count,
        }
    }
}

/// Engagement use case
pub struct EngagePuzzleUseCase<R>
where
    R: PuzzleRepository + EngagementLedger,
{
    repo: Arc<R>,
}

impl<R> EngagePuzzleUseCase<R>
where
    R: PuzzleRepository + EngagementLedger,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn like(
        &self,
        id: PuzzleId,
        user_id: UserId,
        access: Access,
    ) -> PuzzleResult<EngagementCounts> {
        let mut puzzle = self.engageable(id, access).await?;
        if self.repo.add_like(user_id, id).await? {
            puzzle.increment_like_count();
            self.repo.update(&puzzle).await?;
            tracing::info!(puzzle_id = %id, user_id = %user_id, "Puzzle liked");
        }
        Ok(EngagementCounts::from(&puzzle))
    }

    pub async fn unlike(
        &self,
        id: PuzzleId,
        user_id: UserId,
        access: Access,
    ) -> PuzzleResult<EngagementCounts> {
        let mut puzzle = self.engageable(id, access).await?;
        if self.repo.remove_like(user_id, id).await? {
            puzzle.decrement_like_count();
            self.repo.update(&puzzle).await?;
            tracing::info!(puzzle_id = %id, user_id = %user_id, "Puzzle unliked");
        }
        Ok(EngagementCounts::from(&puzzle))
    }

    pub async fn favorite(
        &self,
        id: PuzzleId,
        user_id: UserId,
        access: Access,
    ) -> PuzzleResult<EngagementCounts> {
        let mut puzzle = self.engageable(id, access).await?;
        if self.repo.add_favorite(user_id, id).await? {
            puzzle.increment_favorite_count();
            self.repo.update(&puzzle).await?;
            tracing::info!(puzzle_id = %id, user_id = %user_id, "Puzzle favorited");
        }
        Ok(EngagementCounts::from(&puzzle))
    }

    pub async fn unfavorite(
        &self,
        id: PuzzleId,
        user_id: UserId,
        access: Access,
    ) -> PuzzleResult<EngagementCounts> {
        let mut puzzle = self.engageable(id, access).await?;
        if self.repo.remove_favorite(user_id, id).await? {
            puzzle.decrement_favorite_count();
            self.repo.update(&puzzle).await?;
            tracing::info!(puzzle_id = %id, user_id = %user_id, "Puzzle unfavorited");
        }
        Ok(EngagementCounts::from(&puzzle))
    }

    /// A puzzle can be engaged with when it is visible to the
    /// requester: public, or theirs to manage.
    async fn engageable(&self, id: PuzzleId, access: Access) -> PuzzleResult<Puzzle> {
        let puzzle = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PuzzleError::NotFound)?;

        if puzzle.status != Status::Public && !access.can_manage(puzzle.creator_id) {
            return Err(PuzzleError::NotFound);
        }

        Ok(puzzle)
    }
}
