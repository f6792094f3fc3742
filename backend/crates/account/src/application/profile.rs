//! Profile Use Cases
//!
//! Get, update and delete user records. Updates are field-by-field
//! from a loose key/value body: valid fields are applied, invalid ones
//! are collected and reported back rather than failing the request.

use std::sync::Arc;

use kernel::id::{PuzzleId, UserId};
use platform::password::ClearTextPassword;
use serde_json::Value;

use crate::application::access::Requester;
use crate::application::config::AccountConfig;
use crate::domain::entities::{Theme, User};
use crate::domain::repository::{EngagementDirectory, UserRepository};
use crate::domain::value_objects::UserName;
use crate::error::{AccountError, AccountResult};

/// The puzzles a user has interacted with (full projection only)
#[derive(Debug, Clone, Default)]
pub struct EngagementHistory {
    pub liked: Vec<PuzzleId>,
    pub favorited: Vec<PuzzleId>,
    pub completed: Vec<PuzzleId>,
}

/// A user plus, when the requester has full access, their engagement
/// history
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub engagement: Option<EngagementHistory>,
}

impl UserRecord {
    pub fn is_full(&self) -> bool {
        self.engagement.is_some()
    }
}

/// Get user use case
pub struct GetUserUseCase<R>
where
    R: UserRepository + EngagementDirectory,
{
    repo: Arc<R>,
}

impl<R> GetUserUseCase<R>
where
    R: UserRepository + EngagementDirectory,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a user. The full record (email, theme, engagement
    /// history) is only assembled for the user themselves or an admin;
    /// everyone else gets the public subset.
    pub async fn execute(&self, id: UserId, requester: Requester) -> AccountResult<UserRecord> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let engagement = if requester.has_full_access(id) {
            Some(self.history(id).await?)
        } else {
            None
        };

        Ok(UserRecord { user, engagement })
    }

    /// Fetch the requester's own record (always full)
    pub async fn me(&self, requester: Requester) -> AccountResult<UserRecord> {
        let id = requester.user_id.ok_or(AccountError::Unauthorized)?;
        self.execute(id, requester).await
    }

    async fn history(&self, id: UserId) -> AccountResult<EngagementHistory> {
        Ok(EngagementHistory {
            liked: self.repo.liked_puzzle_ids(id).await?,
            favorited: self.repo.favorited_puzzle_ids(id).await?,
            completed: self.repo.completed_puzzle_ids(id).await?,
        })
    }
}

/// Result of a field-by-field update
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Number of fields applied
    pub updated: usize,
    /// Keys that were unknown or failed validation
    pub invalid_fields: Vec<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        id: UserId,
        fields: serde_json::Map<String, Value>,
        requester: Requester,
    ) -> AccountResult<UpdateOutcome> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !requester.has_full_access(id) {
            return Err(AccountError::Forbidden);
        }

        let total = fields.len();
        let mut invalid_fields = Vec::new();

        for (key, value) in fields {
            let applied = match key.as_str() {
                "username" => self.apply_username(&mut user, &value).await?,
                "password" => self.apply_password(&mut user, &value)?,
                "email" => self.apply_email(&mut user, &value).await?,
                "theme" => apply_theme(&mut user, &value),
                "avatar" => apply_avatar(&mut user, &value),
                _ => false,
            };
            if !applied {
                invalid_fields.push(key);
            }
        }

        let updated = total - invalid_fields.len();
        if updated > 0 {
            self.repo.update(&user).await?;
            tracing::info!(user_id = %id, updated, "User updated");
        }

        Ok(UpdateOutcome {
            updated,
            invalid_fields,
        })
    }

    async fn apply_username(&self, user: &mut User, value: &Value) -> AccountResult<bool> {
        let Some(raw) = value.as_str() else {
            return Ok(false);
        };
        let Ok(username) = UserName::new(raw) else {
            return Ok(false);
        };
        if self.repo.exists_by_username(username.as_str()).await? {
            return Ok(false);
        }
        user.set_username(username);
        Ok(true)
    }

    fn apply_password(&self, user: &mut User, value: &Value) -> AccountResult<bool> {
        let Some(raw) = value.as_str() else {
            return Ok(false);
        };
        let Ok(password) = ClearTextPassword::new(raw.to_string()) else {
            return Ok(false);
        };
        let hash = password
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        user.set_password(hash);
        Ok(true)
    }

    async fn apply_email(&self, user: &mut User, value: &Value) -> AccountResult<bool> {
        let Some(email) = value.as_str() else {
            return Ok(false);
        };
        if self.repo.exists_by_email(email).await? {
            return Ok(false);
        }
        user.set_email(Some(email.to_string()));
        Ok(true)
    }
}

fn apply_theme(user: &mut User, value: &Value) -> bool {
    let Some(theme) = value.as_str().and_then(Theme::parse) else {
        return false;
    };
    user.set_theme(theme);
    true
}

fn apply_avatar(user: &mut User, value: &Value) -> bool {
    match value.as_str() {
        Some(avatar) if !avatar.is_empty() => {
            user.set_avatar(Some(avatar.to_string()));
            true
        }
        _ => false,
    }
}

/// Delete user use case
pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: UserId, requester: Requester) -> AccountResult<()> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !requester.has_full_access(id) {
            return Err(AccountError::Forbidden);
        }

        self.repo.delete(user.user_id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
