//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. Puzzle and user
//! identifiers are plain integers on the wire and in Postgres, so the
//! wrapper is over `i64` rather than a UUID.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type PuzzleId = Id<markers::Puzzle>;
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create from a raw integer
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn as_i64(&self) -> i64 {
        self.value
    }

    /// Convert into the underlying integer
    pub const fn into_inner(self) -> i64 {
        self.value
    }
}

// Manual impls so `T` does not need to satisfy the derive bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::from_i64)
    }
}

impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Puzzle IDs
    pub struct Puzzle;

    /// Marker for User IDs
    pub struct User;
}

/// Type aliases for common IDs
pub type PuzzleId = Id<markers::Puzzle>;
pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let puzzle_id: PuzzleId = Id::from_i64(123456);
        let user_id: UserId = Id::from_i64(1);

        // These are different types, cannot be mixed
        let _p: i64 = puzzle_id.into_inner();
        let _u: i64 = user_id.into_inner();
    }

    #[test]
    fn test_id_roundtrip() {
        let id: PuzzleId = Id::from_i64(654321);
        assert_eq!(id.as_i64(), 654321);
        assert_eq!(id.to_string(), "654321");

        let parsed: PuzzleId = "654321".parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_serde() {
        let id: PuzzleId = Id::from_i64(100000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "100000");

        let back: PuzzleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
