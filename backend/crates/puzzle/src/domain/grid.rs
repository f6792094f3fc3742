//! Grid and Hint Wire Model
//!
//! A puzzle board is stored as an encoded JSON blob: an array of rows,
//! each row an array of cells. Hints are stored as a second blob, an
//! array of `{hint, label, direction}` objects. The wire keys are fixed
//! by the authoring tool and the player frontend:
//!
//! ```json
//! {"character": "A", "label": 1, "hint_across": 1, "hint_down": 0, "isBlocked": false}
//! ```
//!
//! Decoding is deliberately lenient: rows may have differing lengths,
//! labels referenced by cells are not cross-checked against the hint
//! list, and a malformed blob degrades to an empty container instead of
//! surfacing an error. Callers must treat an empty decode result as
//! "unavailable", not as "this puzzle has no cells".

use serde::{Deserialize, Serialize};

/// The character written into every cell of a redacted grid.
pub const BLANK: char = ' ';

/// One grid square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The solved character. `None` (or the blank sentinel) marks a
    /// structurally blocked square that is not part of any word.
    #[serde(with = "character_codec", default)]
    pub character: Option<char>,

    /// Nonzero when one or more words start here; shared key with the
    /// hint list. Zero means no word starts in this cell.
    #[serde(default)]
    pub label: i32,

    /// Label of the across hint covering this cell (0 if none)
    #[serde(default)]
    pub hint_across: i32,

    /// Label of the down hint covering this cell (0 if none)
    #[serde(default)]
    pub hint_down: i32,

    /// Derived field, emitted on the wire but never trusted on input:
    /// redaction recomputes it from `character` every time.
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
}

impl Cell {
    pub fn new(character: Option<char>, label: i32, hint_across: i32, hint_down: i32) -> Self {
        let mut cell = Self {
            character,
            label,
            hint_across,
            hint_down,
            is_blocked: false,
        };
        cell.is_blocked = cell.blocked_from_character();
        cell
    }

    /// Whether this cell is structurally blocked, derived from the
    /// character alone. This is the authoritative definition; the
    /// `is_blocked` field is just its serialized snapshot.
    pub fn blocked_from_character(&self) -> bool {
        match self.character {
            None => true,
            Some(c) => c == BLANK,
        }
    }
}

/// A puzzle board: rows of cells. Rectangularity is not enforced.
pub type Grid = Vec<Vec<Cell>>;

/// The direction a hint is pointing to. Two words can start from the
/// same cell and share a label, one going across and one going down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Across,
    Down,
}

/// A clue string tied to a label and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub hint: String,
    pub label: i32,
    pub direction: Direction,
}

impl Hint {
    pub fn new(hint: impl Into<String>, label: i32, direction: Direction) -> Self {
        Self {
            hint: hint.into(),
            label,
            direction,
        }
    }
}

/// Decode an encoded cell grid. Fails soft: any structural or type
/// error yields an empty grid (zero rows) and a warning in the log.
pub fn decode_cells(json: &str) -> Grid {
    match serde_json::from_str::<Grid>(json) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode puzzle cells, treating as unavailable");
            Vec::new()
        }
    }
}

/// Encode a cell grid back to its wire form, round-tripping every
/// field including the derived `isBlocked`.
pub fn encode_cells(grid: &Grid) -> String {
    match serde_json::to_string(grid) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode puzzle cells");
            "[]".to_string()
        }
    }
}

/// Decode an encoded hint list with the same fail-soft policy as
/// [`decode_cells`].
pub fn decode_hints(json: &str) -> Vec<Hint> {
    match serde_json::from_str::<Vec<Hint>>(json) {
        Ok(hints) => hints,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode puzzle hints, treating as unavailable");
            Vec::new()
        }
    }
}

/// Encode a hint list to its wire form.
pub fn encode_hints(hints: &[Hint]) -> String {
    match serde_json::to_string(hints) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode puzzle hints");
            "[]".to_string()
        }
    }
}

/// Solving equivalence: two grids match when every `character` agrees,
/// case-sensitively, at every position. Shape differences mean no
/// match.
pub fn characters_match(a: &Grid, b: &Grid) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(row_a, row_b)| {
        row_a.len() == row_b.len()
            && row_a
                .iter()
                .zip(row_b.iter())
                .all(|(cell_a, cell_b)| cell_a.character == cell_b.character)
    })
}

/// Serialize `Option<char>` as a one-character string or null, and
/// accept null, missing, or any string on input (empty string decodes
/// to `None`, longer strings keep their first character). The player
/// frontend submits unfilled cells as `""`.
mod character_codec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<char>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(c) => serializer.serialize_str(c.encode_utf8(&mut [0u8; 4])),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<char>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.chars().next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_wire_keys() {
        let cell = Cell::new(Some('A'), 1, 1, 0);
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains(r#""character":"A""#));
        assert!(json.contains(r#""hint_across":1"#));
        assert!(json.contains(r#""hint_down":0"#));
        assert!(json.contains(r#""isBlocked":false"#));
    }

    #[test]
    fn test_blocked_cell_serializes_null() {
        let cell = Cell::new(None, 0, 0, 0);
        assert!(cell.is_blocked);
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains(r#""character":null"#));
    }

    #[test]
    fn test_lenient_character_decode() {
        // Empty string (unfilled cell from the player) decodes to None
        let cell: Cell =
            serde_json::from_str(r#"{"character":"","label":0,"hint_across":0,"hint_down":0}"#)
                .unwrap();
        assert_eq!(cell.character, None);

        // Missing character and isBlocked are tolerated
        let cell: Cell = serde_json::from_str(r#"{"label":3}"#).unwrap();
        assert_eq!(cell.character, None);
        assert_eq!(cell.label, 3);
        assert!(!cell.is_blocked);

        // Longer strings keep their first character
        let cell: Cell = serde_json::from_str(r#"{"character":"AB"}"#).unwrap();
        assert_eq!(cell.character, Some('A'));
    }

    #[test]
    fn test_direction_wire_form() {
        assert_eq!(
            serde_json::to_string(&Direction::Across).unwrap(),
            r#""ACROSS""#
        );
        let d: Direction = serde_json::from_str(r#""DOWN""#).unwrap();
        assert_eq!(d, Direction::Down);
    }

    #[test]
    fn test_malformed_cells_decode_to_empty() {
        assert!(decode_cells("{not json").is_empty());
        assert!(decode_cells(r#"{"rows": 3}"#).is_empty());
        assert!(decode_cells("").is_empty());
    }

    #[test]
    fn test_malformed_hints_decode_to_empty() {
        assert!(decode_hints("{not json").is_empty());
        assert!(decode_hints(r#"[{"label": "not an int"}]"#).is_empty());
    }

    #[test]
    fn test_cells_roundtrip() {
        let grid: Grid = vec![
            vec![Cell::new(Some('C'), 1, 1, 1), Cell::new(Some('a'), 0, 1, 0)],
            vec![Cell::new(None, 0, 0, 0), Cell::new(Some('T'), 2, 0, 2)],
        ];
        let decoded = decode_cells(&encode_cells(&grid));
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_hints_roundtrip() {
        let hints = vec![
            Hint::new("Feline", 1, Direction::Across),
            Hint::new("Opposite of up", 2, Direction::Down),
        ];
        let decoded = decode_hints(&encode_hints(&hints));
        assert_eq!(decoded, hints);

        let json = encode_hints(&hints);
        assert!(json.contains(r#""hint":"Feline""#));
        assert!(json.contains(r#""direction":"ACROSS""#));
    }

    #[test]
    fn test_ragged_rows_are_preserved() {
        // Rectangularity is the authoring tool's concern, not ours
        let grid: Grid = vec![
            vec![Cell::new(Some('A'), 1, 1, 0)],
            vec![Cell::new(Some('B'), 0, 0, 0), Cell::new(None, 0, 0, 0)],
        ];
        let decoded = decode_cells(&encode_cells(&grid));
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].len(), 1);
        assert_eq!(decoded[1].len(), 2);
    }

    #[test]
    fn test_characters_match_is_case_sensitive() {
        let solution: Grid = vec![vec![Cell::new(Some('A'), 1, 1, 0), Cell::new(Some('T'), 0, 1, 0)]];
        let mut attempt = solution.clone();
        assert!(characters_match(&solution, &attempt));

        attempt[0][1].character = Some('t');
        assert!(!characters_match(&solution, &attempt));
    }

    #[test]
    fn test_characters_match_ignores_metadata() {
        let solution: Grid = vec![vec![Cell::new(Some('A'), 1, 1, 0)]];
        let mut attempt = solution.clone();
        attempt[0][0].label = 99;
        attempt[0][0].is_blocked = true;
        assert!(characters_match(&solution, &attempt));
    }

    #[test]
    fn test_characters_match_shape_mismatch() {
        let solution: Grid = vec![vec![Cell::new(Some('A'), 1, 1, 0)]];
        assert!(!characters_match(&solution, &Vec::new()));
        let wider: Grid = vec![vec![
            Cell::new(Some('A'), 1, 1, 0),
            Cell::new(Some('B'), 0, 0, 0),
        ]];
        assert!(!characters_match(&solution, &wider));
    }
}
