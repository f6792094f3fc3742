//! Unit tests for the puzzle crate
//!
//! Exercises the allocator, the projection engine, and the use cases
//! against an in-memory repository.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::{Id, PuzzleId, UserId};

use crate::domain::entities::{Puzzle, Status};
use crate::domain::projection::CreatorCard;
use crate::domain::repository::{
    CreatorDirectory, EngagementLedger, IdOccupancy, PuzzleRepository,
};
use crate::error::{PuzzleError, PuzzleResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryRepo {
    puzzles: Arc<Mutex<HashMap<i64, Puzzle>>>,
    creators: Arc<Mutex<HashMap<i64, CreatorCard>>>,
    likes: Arc<Mutex<HashSet<(i64, i64)>>>,
    favorites: Arc<Mutex<HashSet<(i64, i64)>>>,
    completions: Arc<Mutex<HashSet<(i64, i64)>>>,
}

impl MemoryRepo {
    fn with_creator(id: i64, username: &str) -> Self {
        let repo = Self::default();
        repo.creators.lock().unwrap().insert(
            id,
            CreatorCard {
                id: Id::from_i64(id),
                username: username.to_string(),
                created_at: Utc::now(),
                avatar: None,
            },
        );
        repo
    }

    fn get(&self, id: PuzzleId) -> Option<Puzzle> {
        self.puzzles.lock().unwrap().get(&id.as_i64()).cloned()
    }
}

impl PuzzleRepository for MemoryRepo {
    async fn create(&self, puzzle: &Puzzle) -> PuzzleResult<()> {
        let mut puzzles = self.puzzles.lock().unwrap();
        if puzzles.contains_key(&puzzle.id.as_i64()) {
            return Err(PuzzleError::Internal("duplicate puzzle id".to_string()));
        }
        puzzles.insert(puzzle.id.as_i64(), puzzle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PuzzleId) -> PuzzleResult<Option<Puzzle>> {
        Ok(self.puzzles.lock().unwrap().get(&id.as_i64()).cloned())
    }

    async fn update(&self, puzzle: &Puzzle) -> PuzzleResult<()> {
        self.puzzles
            .lock()
            .unwrap()
            .insert(puzzle.id.as_i64(), puzzle.clone());
        Ok(())
    }

    async fn delete(&self, id: PuzzleId) -> PuzzleResult<()> {
        self.puzzles.lock().unwrap().remove(&id.as_i64());
        Ok(())
    }

    async fn list_public(&self, page: u32, limit: u32) -> PuzzleResult<Vec<Puzzle>> {
        let mut puzzles: Vec<Puzzle> = self
            .puzzles
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.status == Status::Public)
            .cloned()
            .collect();
        puzzles.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(paged(puzzles, page, limit))
    }

    async fn list_by_creator(
        &self,
        creator_id: UserId,
        include_hidden: bool,
        page: u32,
        limit: u32,
    ) -> PuzzleResult<Vec<Puzzle>> {
        let mut puzzles: Vec<Puzzle> = self
            .puzzles
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.creator_id == creator_id)
            .filter(|p| include_hidden || p.status == Status::Public)
            .cloned()
            .collect();
        puzzles.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(paged(puzzles, page, limit))
    }
}

fn paged(puzzles: Vec<Puzzle>, page: u32, limit: u32) -> Vec<Puzzle> {
    puzzles
        .into_iter()
        .skip((page * limit) as usize)
        .take(limit as usize)
        .collect()
}

impl IdOccupancy for MemoryRepo {
    async fn exists_with_id(&self, id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self.puzzles.lock().unwrap().contains_key(&id.as_i64()))
    }
}

impl CreatorDirectory for MemoryRepo {
    async fn resolve_creator(&self, id: UserId) -> PuzzleResult<Option<CreatorCard>> {
        Ok(self.creators.lock().unwrap().get(&id.as_i64()).cloned())
    }
}

impl EngagementLedger for MemoryRepo {
    async fn add_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .insert((user_id.as_i64(), puzzle_id.as_i64())))
    }

    async fn remove_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .remove(&(user_id.as_i64(), puzzle_id.as_i64())))
    }

    async fn add_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .insert((user_id.as_i64(), puzzle_id.as_i64())))
    }

    async fn remove_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .remove(&(user_id.as_i64(), puzzle_id.as_i64())))
    }

    async fn record_completion(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        Ok(self
            .completions
            .lock()
            .unwrap()
            .insert((user_id.as_i64(), puzzle_id.as_i64())))
    }
}

// ============================================================================
// Allocator
// ============================================================================

#[cfg(test)]
mod allocator_tests {
    use super::*;
    use crate::domain::services::{PUZZLE_ID_MAX, PUZZLE_ID_MIN, allocate_puzzle_id};

    /// Probe over a fixed population set
    struct StubProbe {
        taken: HashSet<i64>,
    }

    impl IdOccupancy for StubProbe {
        async fn exists_with_id(&self, id: PuzzleId) -> PuzzleResult<bool> {
            Ok(self.taken.contains(&id.as_i64()))
        }
    }

    /// Probe that reports everything taken except multiples of 9000
    struct SparseProbe;

    impl IdOccupancy for SparseProbe {
        async fn exists_with_id(&self, id: PuzzleId) -> PuzzleResult<bool> {
            Ok(id.as_i64() % 9000 != 0)
        }
    }

    #[tokio::test]
    async fn test_allocated_ids_are_six_digits() {
        let probe = StubProbe {
            taken: HashSet::new(),
        };
        for _ in 0..10_000 {
            let id = allocate_puzzle_id(&probe).await.unwrap();
            assert!((PUZZLE_ID_MIN..=PUZZLE_ID_MAX).contains(&id.as_i64()));
        }
    }

    #[tokio::test]
    async fn test_never_returns_an_occupied_id() {
        let taken: HashSet<i64> = (PUZZLE_ID_MIN..PUZZLE_ID_MIN + 500_000).collect();
        let probe = StubProbe { taken };

        for _ in 0..100 {
            let id = allocate_puzzle_id(&probe).await.unwrap();
            assert!(!probe.taken.contains(&id.as_i64()));
        }
    }

    #[tokio::test]
    async fn test_redraws_until_a_free_id_turns_up() {
        // ~100 free ids in a 900k space; the loop has to survive heavy
        // collision pressure
        let id = allocate_puzzle_id(&SparseProbe).await.unwrap();
        assert_eq!(id.as_i64() % 9000, 0);
        assert!((PUZZLE_ID_MIN..=PUZZLE_ID_MAX).contains(&id.as_i64()));
    }
}

// ============================================================================
// Redaction walkthrough: 1x2 "AT" with a single across hint
// ============================================================================

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::domain::grid::{BLANK, decode_cells};

    const AT_CELLS: &str = r#"[[{"character":"A","label":1,"hint_across":1,"hint_down":0},{"character":"T","label":0,"hint_across":1,"hint_down":0}]]"#;
    const AT_HINTS: &str = r#"[{"hint":"Feline","label":1,"direction":"ACROSS"}]"#;

    fn creator() -> CreatorCard {
        CreatorCard {
            id: Id::from_i64(1),
            username: "setter".to_string(),
            created_at: Utc::now(),
            avatar: None,
        }
    }

    fn at_puzzle() -> Puzzle {
        Puzzle::new(
            Id::from_i64(100001),
            Id::from_i64(1),
            "AT".to_string(),
            String::new(),
            AT_CELLS.to_string(),
            AT_HINTS.to_string(),
            Status::Public,
        )
    }

    #[test]
    fn test_public_view_blanks_both_cells_without_blocking() {
        let view = at_puzzle().to_public_view(creator());

        let grid = decode_cells(&view.cells);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 2);
        for cell in &grid[0] {
            assert_eq!(cell.character, Some(BLANK));
            assert!(!cell.is_blocked);
        }
        // Cell metadata survives redaction
        assert_eq!(grid[0][0].label, 1);
        assert_eq!(grid[0][1].hint_across, 1);

        // Hints are unchanged
        assert_eq!(view.hints, AT_HINTS);
    }

    #[test]
    fn test_owner_view_keeps_the_answer() {
        let view = at_puzzle().to_owner_view(creator());

        let grid = decode_cells(&view.cells);
        assert_eq!(grid[0][0].character, Some('A'));
        assert_eq!(grid[0][1].character, Some('T'));
    }

    #[test]
    fn test_null_character_redacts_to_blocked() {
        let cells = r#"[[{"character":null,"label":0,"hint_across":0,"hint_down":0}]]"#;
        let mut puzzle = at_puzzle();
        puzzle.set_cells(cells.to_string());

        let grid = decode_cells(&puzzle.to_public_view(creator()).cells);
        assert!(grid[0][0].is_blocked);
    }
}

// ============================================================================
// Use cases
// ============================================================================

#[cfg(test)]
mod use_case_tests {
    use super::*;
    use crate::application::{
        Access, CreatePuzzleInput, CreatePuzzleUseCase, DeletePuzzleUseCase, EngagePuzzleUseCase,
        FetchPuzzleUseCase, UpdatePuzzleInput, UpdatePuzzleUseCase, ValidateSolutionUseCase,
    };
    use crate::domain::grid::{BLANK, decode_cells};
    use crate::domain::services::{PUZZLE_ID_MAX, PUZZLE_ID_MIN};

    const CELLS: &str = r#"[[{"character":"A","label":1,"hint_across":1,"hint_down":0},{"character":"T","label":0,"hint_across":1,"hint_down":0}]]"#;
    const HINTS: &str = r#"[{"hint":"Feline","label":1,"direction":"ACROSS"}]"#;

    const CREATOR: i64 = 1;

    fn input(status: Status) -> CreatePuzzleInput {
        CreatePuzzleInput {
            title: "AT".to_string(),
            description: "Two letters".to_string(),
            cells_json: CELLS.to_string(),
            hints_json: HINTS.to_string(),
            status,
        }
    }

    async fn seed(repo: &Arc<MemoryRepo>, status: Status) -> PuzzleId {
        let view = CreatePuzzleUseCase::new(repo.clone())
            .execute(input(status), Id::from_i64(CREATOR))
            .await
            .unwrap();
        view.id
    }

    #[tokio::test]
    async fn test_create_mints_and_persists() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let view = CreatePuzzleUseCase::new(repo.clone())
            .execute(input(Status::Public), Id::from_i64(CREATOR))
            .await
            .unwrap();

        assert!((PUZZLE_ID_MIN..=PUZZLE_ID_MAX).contains(&view.id.as_i64()));
        // Creator gets the solved grid back
        assert_eq!(view.cells, CELLS);

        let stored = repo.get(view.id).unwrap();
        assert_eq!(stored.title, "AT");
        assert_eq!(stored.like_count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let mut blank = input(Status::Public);
        blank.title = "   ".to_string();

        let result = CreatePuzzleUseCase::new(repo)
            .execute(blank, Id::from_i64(CREATOR))
            .await;
        assert!(matches!(result, Err(PuzzleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_redacts_for_strangers() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;

        let view = FetchPuzzleUseCase::new(repo)
            .get(id, Access::anonymous(), false)
            .await
            .unwrap();

        let grid = decode_cells(&view.cells);
        for row in &grid {
            for cell in row {
                assert_eq!(cell.character, Some(BLANK));
            }
        }
    }

    #[tokio::test]
    async fn test_get_solution_requires_management_access() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let use_case = FetchPuzzleUseCase::new(repo);

        // Stranger asking for answers is refused
        let result = use_case
            .get(id, Access::user(Id::from_i64(2)), true)
            .await;
        assert!(matches!(result, Err(PuzzleError::Forbidden)));

        // Creator and admin get the canonical grid
        let owner_view = use_case
            .get(id, Access::user(Id::from_i64(CREATOR)), true)
            .await
            .unwrap();
        assert_eq!(owner_view.cells, CELLS);

        let admin_view = use_case
            .get(id, Access::admin(Id::from_i64(99)), true)
            .await
            .unwrap();
        assert_eq!(admin_view.cells, CELLS);
    }

    #[tokio::test]
    async fn test_private_puzzle_hidden_from_strangers() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Private).await;
        let use_case = FetchPuzzleUseCase::new(repo);

        let result = use_case.get(id, Access::anonymous(), false).await;
        assert!(matches!(result, Err(PuzzleError::NotFound)));

        assert!(
            use_case
                .get(id, Access::user(Id::from_i64(CREATOR)), false)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_listings_are_redacted_even_for_the_owner() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        seed(&repo, Status::Public).await;
        seed(&repo, Status::Draft).await;

        let use_case = FetchPuzzleUseCase::new(repo);
        let owner = Access::user(Id::from_i64(CREATOR));

        let mine = use_case
            .by_creator(Id::from_i64(CREATOR), owner, 0, 12)
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        for view in &mine {
            for row in decode_cells(&view.cells) {
                for cell in row {
                    assert_eq!(cell.character, Some(BLANK));
                }
            }
        }

        // Strangers only see the public one
        let theirs = use_case
            .by_creator(Id::from_i64(CREATOR), Access::anonymous(), 0, 12)
            .await
            .unwrap();
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].status, Status::Public);
    }

    #[tokio::test]
    async fn test_update_restamps_and_returns_owner_view() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let before = repo.get(id).unwrap().last_updated;

        let view = UpdatePuzzleUseCase::new(repo.clone())
            .execute(
                id,
                UpdatePuzzleInput {
                    description: Some("Retitled".to_string()),
                    ..Default::default()
                },
                Access::user(Id::from_i64(CREATOR)),
            )
            .await
            .unwrap();

        assert_eq!(view.description, "Retitled");
        assert!(repo.get(id).unwrap().last_updated >= before);
    }

    #[tokio::test]
    async fn test_update_refused_for_strangers() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;

        let result = UpdatePuzzleUseCase::new(repo)
            .execute(
                id,
                UpdatePuzzleInput {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                },
                Access::user(Id::from_i64(2)),
            )
            .await;
        assert!(matches!(result, Err(PuzzleError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;

        let use_case = DeletePuzzleUseCase::new(repo.clone());
        assert!(matches!(
            use_case.execute(id, Access::user(Id::from_i64(2))).await,
            Err(PuzzleError::Forbidden)
        ));

        use_case
            .execute(id, Access::user(Id::from_i64(CREATOR)))
            .await
            .unwrap();
        assert!(repo.get(id).is_none());
    }

    #[tokio::test]
    async fn test_like_is_idempotent_per_user() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let use_case = EngagePuzzleUseCase::new(repo.clone());
        let solver = Id::from_i64(2);
        let access = Access::user(solver);

        let counts = use_case.like(id, solver, access).await.unwrap();
        assert_eq!(counts.like_count, 1);

        // Second like from the same user is a no-op
        let counts = use_case.like(id, solver, access).await.unwrap();
        assert_eq!(counts.like_count, 1);

        // A different user moves the counter again
        let other = Id::from_i64(3);
        let counts = use_case.like(id, other, Access::user(other)).await.unwrap();
        assert_eq!(counts.like_count, 2);
    }

    #[tokio::test]
    async fn test_unlike_floors_at_zero() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let use_case = EngagePuzzleUseCase::new(repo.clone());
        let solver = Id::from_i64(2);
        let access = Access::user(solver);

        // Unlike without a prior like changes nothing
        let counts = use_case.unlike(id, solver, access).await.unwrap();
        assert_eq!(counts.like_count, 0);

        use_case.like(id, solver, access).await.unwrap();
        let counts = use_case.unlike(id, solver, access).await.unwrap();
        assert_eq!(counts.like_count, 0);
    }

    #[tokio::test]
    async fn test_favorite_mirrors_like_semantics() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let use_case = EngagePuzzleUseCase::new(repo.clone());
        let solver = Id::from_i64(2);
        let access = Access::user(solver);

        use_case.favorite(id, solver, access).await.unwrap();
        let counts = use_case.favorite(id, solver, access).await.unwrap();
        assert_eq!(counts.favorite_count, 1);

        let counts = use_case.unfavorite(id, solver, access).await.unwrap();
        assert_eq!(counts.favorite_count, 0);
        let counts = use_case.unfavorite(id, solver, access).await.unwrap();
        assert_eq!(counts.favorite_count, 0);
    }

    #[tokio::test]
    async fn test_validate_solution() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;
        let use_case = ValidateSolutionUseCase::new(repo.clone());
        let solver = Id::from_i64(2);

        let correct = CELLS;
        let complete = use_case
            .execute(id, correct, Access::user(solver))
            .await
            .unwrap();
        assert!(complete);
        assert!(
            repo.completions
                .lock()
                .unwrap()
                .contains(&(solver.as_i64(), id.as_i64()))
        );

        // Case matters
        let lowered = correct.replace('T', "t");
        let complete = use_case
            .execute(id, &lowered, Access::user(solver))
            .await
            .unwrap();
        assert!(!complete);
    }

    #[tokio::test]
    async fn test_validate_anonymous_records_nothing() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;

        let complete = ValidateSolutionUseCase::new(repo.clone())
            .execute(id, CELLS, Access::anonymous())
            .await
            .unwrap();
        assert!(complete);
        assert!(repo.completions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validate_with_corrupt_stored_grid_is_an_error() {
        let repo = Arc::new(MemoryRepo::with_creator(CREATOR, "setter"));
        let id = seed(&repo, Status::Public).await;

        let mut puzzle = repo.get(id).unwrap();
        puzzle.set_cells("{not json".to_string());
        PuzzleRepository::update(repo.as_ref(), &puzzle).await.unwrap();

        let result = ValidateSolutionUseCase::new(repo)
            .execute(id, CELLS, Access::anonymous())
            .await;
        assert!(matches!(result, Err(PuzzleError::Internal(_))));
    }
}
