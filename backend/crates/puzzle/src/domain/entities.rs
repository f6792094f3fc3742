//! Domain Entities
//!
//! The puzzle aggregate root. Cells and hints are held in their encoded
//! wire form; the stored blobs are the single source of truth for
//! solved content.

use chrono::{DateTime, Utc};
use kernel::id::{PuzzleId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::grid::{self, Grid, Hint};

/// Visibility of a puzzle to non-owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Listed and playable by everyone
    Public,
    /// Visible only to the creator and admins
    Private,
    /// Work in progress, visible only to the creator and admins
    Draft,
}

impl Status {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Public => "PUBLIC",
            Status::Private => "PRIVATE",
            Status::Draft => "DRAFT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PUBLIC" => Some(Status::Public),
            "PRIVATE" => Some(Status::Private),
            "DRAFT" => Some(Status::Draft),
            _ => None,
        }
    }
}

/// Puzzle entity
///
/// Constructed whole: creator, title, description, encoded grid,
/// encoded hints and status are all supplied together, with the id
/// minted beforehand by the allocator. There is no partially-built
/// puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// 6-digit identifier, unique across all puzzles, immutable
    pub id: PuzzleId,
    /// Non-owning reference to the authoring user
    pub creator_id: UserId,
    pub title: String,
    pub description: String,
    /// Canonical cell grid, encoded (solved content lives here)
    pub cells_json: String,
    /// Canonical hint list, encoded
    pub hints_json: String,
    pub status: Status,
    /// Set once at construction, immutable
    pub created_at: DateTime<Utc>,
    /// Re-stamped via [`Puzzle::touch`] when content changes; setters
    /// do not update it on their own
    pub last_updated: DateTime<Utc>,
    pub like_count: i32,
    pub favorite_count: i32,
}

impl Puzzle {
    pub fn new(
        id: PuzzleId,
        creator_id: UserId,
        title: String,
        description: String,
        cells_json: String,
        hints_json: String,
        status: Status,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            creator_id,
            title,
            description,
            cells_json,
            hints_json,
            status,
            created_at: now,
            last_updated: now,
            like_count: 0,
            favorite_count: 0,
        }
    }

    /// Decode the canonical grid. Empty means unavailable, not "no
    /// cells" (see [`grid::decode_cells`]).
    pub fn cells(&self) -> Grid {
        grid::decode_cells(&self.cells_json)
    }

    /// Decode the canonical hint list.
    pub fn hints(&self) -> Vec<Hint> {
        grid::decode_hints(&self.hints_json)
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    /// Replace the encoded cell grid. The string should be a 2D array
    /// of cells in the wire format.
    pub fn set_cells(&mut self, cells_json: String) {
        self.cells_json = cells_json;
    }

    /// Replace the encoded hint list.
    pub fn set_hints(&mut self, hints_json: String) {
        self.hints_json = hints_json;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Re-stamp `last_updated` to now. Callers decide when a mutation
    /// counts as a content change.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    pub fn increment_like_count(&mut self) {
        self.like_count += 1;
    }

    /// Saturating at zero; the count never goes negative.
    pub fn decrement_like_count(&mut self) {
        if self.like_count > 0 {
            self.like_count -= 1;
        }
    }

    pub fn increment_favorite_count(&mut self) {
        self.favorite_count += 1;
    }

    /// Saturating at zero; the count never goes negative.
    pub fn decrement_favorite_count(&mut self) {
        if self.favorite_count > 0 {
            self.favorite_count -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn sample() -> Puzzle {
        Puzzle::new(
            Id::from_i64(123456),
            Id::from_i64(1),
            "Monday Mini".to_string(),
            "A tiny warmup".to_string(),
            "[]".to_string(),
            "[]".to_string(),
            Status::Public,
        )
    }

    #[test]
    fn test_new_puzzle_defaults() {
        let puzzle = sample();
        assert_eq!(puzzle.like_count, 0);
        assert_eq!(puzzle.favorite_count, 0);
        assert_eq!(puzzle.created_at, puzzle.last_updated);
    }

    #[test]
    fn test_counter_floor() {
        let mut puzzle = sample();
        puzzle.decrement_like_count();
        puzzle.decrement_favorite_count();
        assert_eq!(puzzle.like_count, 0);
        assert_eq!(puzzle.favorite_count, 0);

        puzzle.increment_like_count();
        puzzle.increment_like_count();
        puzzle.decrement_like_count();
        assert_eq!(puzzle.like_count, 1);
    }

    #[test]
    fn test_setters_do_not_restamp() {
        let mut puzzle = sample();
        let before = puzzle.last_updated;
        puzzle.set_title("Renamed".to_string());
        puzzle.set_cells("[[]]".to_string());
        assert_eq!(puzzle.last_updated, before);

        puzzle.touch();
        assert!(puzzle.last_updated >= before);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse("PUBLIC"), Some(Status::Public));
        assert_eq!(Status::parse("PRIVATE"), Some(Status::Private));
        assert_eq!(Status::parse("DRAFT"), Some(Status::Draft));
        assert_eq!(Status::parse("public"), None);
        assert_eq!(Status::Draft.as_str(), "DRAFT");
    }
}
