//! Puzzle Projections
//!
//! Two views are derived from one canonical puzzle:
//!
//! - the **public view**, with every answer character scrubbed, safe
//!   to hand to a solver;
//! - the **owner view**, with the canonical grid intact, for the
//!   creator or an admin.
//!
//! Redaction is the whole point of this module: the public view is the
//! only place stored answers are ever allowed near an outbound record,
//! and it guarantees they do not leak. Hint text passes through
//! unredacted; clues are not solved content. Choosing which view to
//! build is an authorization decision that belongs to the HTTP layer.

use chrono::{DateTime, Utc};
use kernel::id::{PuzzleId, UserId};
use serde::Serialize;

use crate::domain::entities::{Puzzle, Status};
use crate::domain::grid::{self, BLANK};

/// The creator's public-facing projection, resolved by an external
/// collaborator (see `CreatorDirectory`). Deliberately a small subset:
/// embedding the full user record here would drag private fields into
/// every puzzle response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorCard {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

/// The public-facing puzzle record, consumed by the HTTP layer.
/// `cells` and `hints` stay in their encoded wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleView {
    pub id: PuzzleId,
    pub creator: CreatorCard,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub hints: String,
    pub last_updated: DateTime<Utc>,
    pub like_count: i32,
    pub favorite_count: i32,
    pub cells: String,
}

impl Puzzle {
    /// Build the redacted view: decode the canonical grid, recompute
    /// `isBlocked` from the pre-redaction character of every cell, then
    /// blank every character and re-encode.
    ///
    /// If the stored grid cannot be decoded the view carries an empty
    /// encoded grid; a corrupt record degrades, it does not crash, and
    /// it can never ship partially-redacted content.
    pub fn to_public_view(&self, creator: CreatorCard) -> PuzzleView {
        let mut grid = self.cells();
        for row in &mut grid {
            for cell in row {
                // Order matters: blockedness is derived from the real
                // character, then the character is scrubbed.
                cell.is_blocked = cell.blocked_from_character();
                cell.character = Some(BLANK);
            }
        }

        PuzzleView {
            id: self.id,
            creator,
            created_at: self.created_at,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            hints: self.hints_json.clone(),
            last_updated: self.last_updated,
            like_count: self.like_count,
            favorite_count: self.favorite_count,
            cells: grid::encode_cells(&grid),
        }
    }

    /// Build the solved view: identical to the public view except
    /// `cells` is the untouched canonical blob. The only sanctioned
    /// path that exposes answers; gate it on creator/admin before
    /// calling.
    pub fn to_owner_view(&self, creator: CreatorCard) -> PuzzleView {
        let mut view = self.to_public_view(creator);
        view.cells = self.cells_json.clone();
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{Cell, decode_cells};
    use kernel::id::Id;

    fn creator() -> CreatorCard {
        CreatorCard {
            id: Id::from_i64(7),
            username: "setter".to_string(),
            created_at: Utc::now(),
            avatar: None,
        }
    }

    fn puzzle_with_cells(cells_json: &str) -> Puzzle {
        Puzzle::new(
            Id::from_i64(100001),
            Id::from_i64(7),
            "Test".to_string(),
            String::new(),
            cells_json.to_string(),
            r#"[{"hint":"Feline","label":1,"direction":"ACROSS"}]"#.to_string(),
            Status::Public,
        )
    }

    #[test]
    fn test_public_view_scrubs_every_character() {
        let grid = vec![
            vec![Cell::new(Some('C'), 1, 1, 1), Cell::new(Some('A'), 0, 1, 0)],
            vec![Cell::new(Some('T'), 0, 0, 1), Cell::new(None, 0, 0, 0)],
        ];
        let puzzle = puzzle_with_cells(&grid::encode_cells(&grid));

        let view = puzzle.to_public_view(creator());
        let scrubbed = decode_cells(&view.cells);
        assert_eq!(scrubbed.len(), 2);
        for row in &scrubbed {
            for cell in row {
                assert_eq!(cell.character, Some(BLANK));
            }
        }
    }

    #[test]
    fn test_blocked_derived_from_pre_redaction_character() {
        let grid = vec![vec![
            Cell::new(Some('A'), 1, 1, 0),
            Cell::new(None, 0, 0, 0),
            Cell::new(Some(BLANK), 0, 0, 0),
        ]];
        let puzzle = puzzle_with_cells(&grid::encode_cells(&grid));

        let scrubbed = decode_cells(&puzzle.to_public_view(creator()).cells);
        assert!(!scrubbed[0][0].is_blocked); // had a real character
        assert!(scrubbed[0][1].is_blocked); // was null
        assert!(scrubbed[0][2].is_blocked); // was the blank sentinel
    }

    #[test]
    fn test_is_blocked_never_trusted_from_input() {
        // Authored data claims the filled cell is blocked; redaction
        // recomputes and overrules it.
        let cells = r#"[[{"character":"X","label":1,"hint_across":1,"hint_down":0,"isBlocked":true}]]"#;
        let puzzle = puzzle_with_cells(cells);

        let scrubbed = decode_cells(&puzzle.to_public_view(creator()).cells);
        assert!(!scrubbed[0][0].is_blocked);
    }

    #[test]
    fn test_owner_view_keeps_canonical_cells() {
        let grid = vec![vec![Cell::new(Some('A'), 1, 1, 0), Cell::new(Some('T'), 0, 1, 0)]];
        let cells_json = grid::encode_cells(&grid);
        let puzzle = puzzle_with_cells(&cells_json);

        let view = puzzle.to_owner_view(creator());
        assert_eq!(view.cells, cells_json);

        let decoded = decode_cells(&view.cells);
        assert_eq!(decoded[0][0].character, Some('A'));
        assert_eq!(decoded[0][1].character, Some('T'));
    }

    #[test]
    fn test_views_agree_outside_cells() {
        let grid = vec![vec![Cell::new(Some('A'), 1, 1, 0)]];
        let puzzle = puzzle_with_cells(&grid::encode_cells(&grid));

        let creator = creator();
        let public = puzzle.to_public_view(creator.clone());
        let owner = puzzle.to_owner_view(creator);

        assert_eq!(public.id, owner.id);
        assert_eq!(public.creator, owner.creator);
        assert_eq!(public.created_at, owner.created_at);
        assert_eq!(public.title, owner.title);
        assert_eq!(public.description, owner.description);
        assert_eq!(public.status, owner.status);
        assert_eq!(public.hints, owner.hints);
        assert_eq!(public.last_updated, owner.last_updated);
        assert_eq!(public.like_count, owner.like_count);
        assert_eq!(public.favorite_count, owner.favorite_count);
        assert_ne!(public.cells, owner.cells);
    }

    #[test]
    fn test_hints_pass_through_unredacted() {
        let puzzle = puzzle_with_cells("[]");
        let view = puzzle.to_public_view(creator());
        assert_eq!(view.hints, puzzle.hints_json);
    }

    #[test]
    fn test_corrupt_grid_degrades_to_empty() {
        let puzzle = puzzle_with_cells("{not json");
        let view = puzzle.to_public_view(creator());
        assert_eq!(view.cells, "[]");
        // Everything else survives
        assert_eq!(view.title, "Test");
    }

    #[test]
    fn test_view_record_keys() {
        let puzzle = puzzle_with_cells("[]");
        let json = serde_json::to_value(puzzle.to_public_view(creator())).unwrap();
        for key in [
            "id",
            "creator",
            "createdAt",
            "title",
            "description",
            "status",
            "hints",
            "lastUpdated",
            "likeCount",
            "favoriteCount",
            "cells",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json["creator"].get("username").is_some());
        assert!(json["creator"].get("createdAt").is_some());
    }
}
