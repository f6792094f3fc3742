//! Validate Solution Use Case
//!
//! Checks a submitted grid against the canonical one: complete when
//! every character matches, case-sensitively, at every position. A
//! successful solve by an authenticated user is recorded in the
//! engagement ledger.

use std::sync::Arc;

use kernel::id::{PuzzleId, UserId};

use crate::application::access::Access;
use crate::domain::entities::Status;
use crate::domain::grid::{characters_match, decode_cells};
use crate::domain::repository::{EngagementLedger, PuzzleRepository};
use crate::error::{PuzzleError, PuzzleResult};

/// Validate solution use case
pub struct ValidateSolutionUseCase<R>
where
    R: PuzzleRepository + EngagementLedger,
{
    repo: Arc<R>,
}

impl<R> ValidateSolutionUseCase<R>
where
    R: PuzzleRepository + EngagementLedger,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns whether the submitted grid solves the puzzle.
    ///
    /// `solver` is the authenticated user, if any; anonymous solvers
    /// can still validate, they just don't get a completion recorded.
    pub async fn execute(
        &self,
        id: PuzzleId,
        submitted_cells_json: &str,
        access: Access,
    ) -> PuzzleResult<bool> {
        let puzzle = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PuzzleError::NotFound)?;

        if puzzle.status != Status::Public && !access.can_manage(puzzle.creator_id) {
            return Err(PuzzleError::NotFound);
        }

        let solution = puzzle.cells();
        if solution.is_empty() {
            // An empty decode means the stored grid is unavailable, not
            // that the puzzle has no cells; there is nothing sound to
            // validate against.
            return Err(PuzzleError::Internal(
                "Stored puzzle grid is unavailable".to_string(),
            ));
        }

        let submitted = decode_cells(submitted_cells_json);
        let complete = characters_match(&solution, &submitted);

        if complete {
            if let Some(solver) = access.user_id {
                self.record_completion(solver, id).await;
            }
        }

        Ok(complete)
    }

    async fn record_completion(&self, solver: UserId, id: PuzzleId) {
        // A solve still counts if the bookkeeping write fails
        match self.repo.record_completion(solver, id).await {
            Ok(true) => {
                tracing::info!(puzzle_id = %id, user_id = %solver, "Puzzle completed");
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(puzzle_id = %id, user_id = %solver, error = %e, "Failed to record completion");
            }
        }
    }
}
