//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::Status;
use crate::domain::projection::PuzzleView;

// ============================================================================
// Create / Update
// ============================================================================

/// Create puzzle request. `cells` and `hints` arrive pre-encoded from
/// the authoring tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePuzzleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub cells: String,
    pub hints: String,
    pub status: Status,
}

/// Update puzzle request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePuzzleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cells: Option<String>,
    pub hints: Option<String>,
    pub status: Option<Status>,
}

// ============================================================================
// Queries
// ============================================================================

/// Pagination query for listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Single-puzzle query. `mode=edit` asks for the solved grid and is
/// only honored for the creator or an admin; anything else (including
/// the player's `mode=play`) gets the redacted view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetPuzzleQuery {
    pub mode: Option<String>,
}

// ============================================================================
// Validation
// ============================================================================

/// Solution submission: the player's grid, encoded like the canonical
/// one.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    pub cells: String,
}

/// Whether the submitted grid solves the puzzle
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub complete: bool,
}

// ============================================================================
// Responses
// ============================================================================

/// Single puzzle response
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleResponse {
    pub puzzle: PuzzleView,
}

/// Puzzle listing response
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleListResponse {
    pub puzzles: Vec<PuzzleView>,
}
