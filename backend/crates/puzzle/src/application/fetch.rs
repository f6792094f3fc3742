//! Fetch Puzzle Use Cases
//!
//! Single-puzzle retrieval and the two listings (public browse,
//! by-creator). Listings always carry the redacted projection; the
//! solved grid only ever travels through a single-puzzle owner fetch.

use std::sync::Arc;

use kernel::id::{PuzzleId, UserId};

use crate::application::access::Access;
use crate::domain::entities::{Puzzle, Status};
use crate::domain::projection::{CreatorCard, PuzzleView};
use crate::domain::repository::{CreatorDirectory, PuzzleRepository};
use crate::error::{PuzzleError, PuzzleResult};

/// Fetch puzzle use case
pub struct FetchPuzzleUseCase<R>
where
    R: PuzzleRepository + CreatorDirectory,
{
    repo: Arc<R>,
}

impl<R> FetchPuzzleUseCase<R>
where
    R: PuzzleRepository + CreatorDirectory,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a single puzzle.
    ///
    /// `want_solution` is the client asking for the solved grid (the
    /// editor flow). It is only honored for the creator or an admin;
    /// everyone else gets the redacted projection, or a 403 if they
    /// explicitly asked for answers. Non-public puzzles are reported as
    /// not found to strangers rather than as forbidden, so their
    /// existence does not leak.
    pub async fn get(
        &self,
        id: PuzzleId,
        access: Access,
        want_solution: bool,
    ) -> PuzzleResult<PuzzleView> {
        let puzzle = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PuzzleError::NotFound)?;

        let full_access = access.can_manage(puzzle.creator_id);

        if puzzle.status != Status::Public && !full_access {
            return Err(PuzzleError::NotFound);
        }
        if want_solution && !full_access {
            return Err(PuzzleError::Forbidden);
        }

        let creator = self.creator_card(puzzle.creator_id).await?;

        Ok(if want_solution {
            puzzle.to_owner_view(creator)
        } else {
            puzzle.to_public_view(creator)
        })
    }

    /// Browse public puzzles, newest activity first. Always redacted.
    pub async fn browse(&self, page: u32, limit: u32) -> PuzzleResult<Vec<PuzzleView>> {
        let puzzles = self.repo.list_public(page, limit).await?;
        self.redacted_views(puzzles).await
    }

    /// A creator's puzzles, newest activity first. The creator (or an
    /// admin) also sees private and draft entries; the listing itself
    /// is always redacted, matching the original's list endpoint.
    pub async fn by_creator(
        &self,
        creator_id: UserId,
        access: Access,
        page: u32,
        limit: u32,
    ) -> PuzzleResult<Vec<PuzzleView>> {
        let include_hidden = access.can_manage(creator_id);
        let puzzles = self
            .repo
            .list_by_creator(creator_id, include_hidden, page, limit)
            .await?;
        self.redacted_views(puzzles).await
    }

    async fn redacted_views(&self, puzzles: Vec<Puzzle>) -> PuzzleResult<Vec<PuzzleView>> {
        let mut views = Vec::with_capacity(puzzles.len());
        for puzzle in puzzles {
            let creator = self.creator_card(puzzle.creator_id).await?;
            views.push(puzzle.to_public_view(creator));
        }
        Ok(views)
    }

    async fn creator_card(&self, creator_id: UserId) -> PuzzleResult<CreatorCard> {
        self.repo
            .resolve_creator(creator_id)
            .await?
            .ok_or_else(|| PuzzleError::Internal("Creator record missing".to_string()))
    }
}
