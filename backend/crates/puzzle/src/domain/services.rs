//! Domain Services
//!
//! Identity allocation for new puzzles.

use kernel::id::PuzzleId;
use rand::Rng;

use crate::domain::repository::IdOccupancy;
use crate::error::PuzzleResult;

/// Smallest valid puzzle id (inclusive)
pub const PUZZLE_ID_MIN: i64 = 100_000;

/// Largest valid puzzle id (inclusive)
pub const PUZZLE_ID_MAX: i64 = 999_999;

/// Mint a 6-digit puzzle id.
///
/// Draws uniformly from `[PUZZLE_ID_MIN, PUZZLE_ID_MAX]` and re-draws
/// whenever the probe reports the candidate as taken. There is no retry
/// cap: the id space is 900k wide and collisions stay rare while it is
/// far from exhaustion.
///
/// Allocation alone does not guarantee exclusivity. The probe and the
/// eventual insert are not atomic, so two concurrent allocations can
/// both clear the probe with the same candidate; the storage layer's
/// unique constraint is the final arbiter and the loser surfaces as a
/// conflict.
pub async fn allocate_puzzle_id<P: IdOccupancy>(probe: &P) -> PuzzleResult<PuzzleId> {
    loop {
        let candidate = rand::rng().random_range(PUZZLE_ID_MIN..=PUZZLE_ID_MAX);
        let id = PuzzleId::from_i64(candidate);
        if !probe.exists_with_id(id).await? {
            return Ok(id);
        }
    }
}
