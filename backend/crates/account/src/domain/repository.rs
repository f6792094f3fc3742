//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use kernel::id::{PuzzleId, UserId};

use crate::domain::entities::{NewUser, User};
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the hydrated row (the database
    /// assigns the id)
    async fn create(&self, new_user: &NewUser) -> AccountResult<User>;

    /// Find user by id
    async fn find_by_id(&self, user_id: UserId) -> AccountResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &str) -> AccountResult<bool>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &str) -> AccountResult<bool>;

    /// Write back all mutable fields
    async fn update(&self, user: &User) -> AccountResult<()>;

    /// Delete a user
    async fn delete(&self, user_id: UserId) -> AccountResult<()>;
}

/// Read side of the engagement bookkeeping: which puzzles a user has
/// liked, favorited and completed. The write side lives with the
/// puzzle domain; both operate on the same join tables.
#[trait_variant::make(EngagementDirectory: Send)]
pub trait LocalEngagementDirectory {
    async fn liked_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>>;

    async fn favorited_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>>;

    async fn completed_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>>;
}
