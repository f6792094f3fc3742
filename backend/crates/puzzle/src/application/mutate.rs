//! Update and Delete Use Cases
//!
//! Mutation is field-by-field via the entity's setters; `last_updated`
//! is re-stamped here, once, when any content field actually arrived.
//! There is no versioning or audit trail.

use std::sync::Arc;

use kernel::id::PuzzleId;

use crate::application::access::Access;
use crate::domain::entities::Status;
use crate::domain::projection::PuzzleView;
use crate::domain::repository::{CreatorDirectory, PuzzleRepository};
use crate::error::{PuzzleError, PuzzleResult};

/// Update puzzle input. Absent fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdatePuzzleInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cells_json: Option<String>,
    pub hints_json: Option<String>,
    pub status: Option<Status>,
}

impl UpdatePuzzleInput {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.cells_json.is_none()
            && self.hints_json.is_none()
            && self.status.is_none()
    }
}

/// Update puzzle use case
pub struct UpdatePuzzleUseCase<R>
where
    R: PuzzleRepository + CreatorDirectory,
{
    repo: Arc<R>,
}

impl<R> UpdatePuzzleUseCase<R>
where
    R: PuzzleRepository + CreatorDirectory,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: PuzzleId,
        input: UpdatePuzzleInput,
        access: Access,
    ) -> PuzzleResult<PuzzleView> {
        let mut puzzle = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PuzzleError::NotFound)?;

        if !access.can_manage(puzzle.creator_id) {
            return Err(PuzzleError::Forbidden);
        }

        if let Some(title) = input.title.as_deref() {
            if title.trim().is_empty() {
                return Err(PuzzleError::Validation(
                    "A puzzle needs a title".to_string(),
                ));
            }
        }

        let changed = !input.is_empty();

        if let Some(title) = input.title {
            puzzle.set_title(title);
        }
        if let Some(description) = input.description {
            puzzle.set_description(description);
        }
        if let Some(cells_json) = input.cells_json {
            puzzle.set_cells(cells_json);
        }
        if let Some(hints_json) = input.hints_json {
            puzzle.set_hints(hints_json);
        }
        if let Some(status) = input.status {
            puzzle.set_status(status);
        }

        if changed {
            puzzle.touch();
            self.repo.update(&puzzle).await?;
            tracing::info!(puzzle_id = %puzzle.id, "Puzzle updated");
        }

        let creator = self
            .repo
            .resolve_creator(puzzle.creator_id)
            .await?
            .ok_or_else(|| PuzzleError::Internal("Creator record missing".to_string()))?;

        Ok(puzzle.to_owner_view(creator))
    }
}

/// Delete puzzle use case
pub struct DeletePuzzleUseCase<R>
where
    R: PuzzleRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePuzzleUseCase<R>
where
    R: PuzzleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PuzzleId, access: Access) -> PuzzleResult<()> {
        let puzzle = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PuzzleError::NotFound)?;

        if !access.can_manage(puzzle.creator_id) {
            return Err(PuzzleError::Forbidden);
        }

        self.repo.delete(id).await?;

        tracing::info!(puzzle_id = %id, "Puzzle deleted");
        Ok(())
    }
}
