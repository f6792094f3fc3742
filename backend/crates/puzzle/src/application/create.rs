//! Create Puzzle Use Case
//!
//! Mints an id, builds the aggregate, and persists it. The puzzle is
//! submitted already complete: grid and hints are authored externally
//! and arrive as encoded blobs.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::{Puzzle, Status};
use crate::domain::projection::PuzzleView;
use crate::domain::repository::{CreatorDirectory, IdOccupancy, PuzzleRepository};
use crate::domain::services::allocate_puzzle_id;
use crate::error::{PuzzleError, PuzzleResult};

/// Create puzzle input
pub struct CreatePuzzleInput {
    pub title: String,
    pub description: String,
    pub cells_json: String,
    pub hints_json: String,
    pub status: Status,
}

/// Create puzzle use case
pub struct CreatePuzzleUseCase<R>
where
    R: PuzzleRepository + IdOccupancy + CreatorDirectory,
{
    repo: Arc<R>,
}

impl<R> CreatePuzzleUseCase<R>
where
    R: PuzzleRepository + IdOccupancy + CreatorDirectory,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        input: CreatePuzzleInput,
        creator_id: UserId,
    ) -> PuzzleResult<PuzzleView> {
        if input.title.trim().is_empty() {
            return Err(PuzzleError::Validation(
                "A puzzle needs a title".to_string(),
            ));
        }

        // Allocation is only probabilistic exclusivity; if a concurrent
        // create wins the same id, the insert below fails on the unique
        // constraint and surfaces as a conflict.
        let id = allocate_puzzle_id(self.repo.as_ref()).await?;

        let puzzle = Puzzle::new(
            id,
            creator_id,
            input.title,
            input.description,
            input.cells_json,
            input.hints_json,
            input.status,
        );

        self.repo.create(&puzzle).await?;

        tracing::info!(
            puzzle_id = %puzzle.id,
            creator_id = %creator_id,
            status = puzzle.status.as_str(),
            "Puzzle created"
        );

        let creator = self
            .repo
            .resolve_creator(creator_id)
            .await?
            .ok_or_else(|| PuzzleError::Internal("Creator record missing".to_string()))?;

        Ok(puzzle.to_owner_view(creator))
    }
}
