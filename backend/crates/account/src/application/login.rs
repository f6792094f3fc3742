//! Login Use Case
//!
//! Username (or email) + password, checked against the main hash and
//! then the one-time temporary password. A temporary password is
//! consumed by the login that uses it.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::application::config::AccountConfig;
use crate::domain::entities::{PasswordMatch, User};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    /// Username, or the account email
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let mut user = self.lookup(&input.username).await?;

        // Anything the policy rejects cannot be a stored password
        let raw_password = ClearTextPassword::new(input.password)
            .map_err(|_| AccountError::InvalidCredentials)?;

        match user.check_password(&raw_password, self.config.pepper()) {
            PasswordMatch::Primary => {}
            PasswordMatch::Temporary => {
                // Single use: consume it before answering
                user.clear_temp_password();
                self.repo.update(&user).await?;
                tracing::info!(user_id = %user.user_id, "Temporary password consumed");
            }
            PasswordMatch::NoMatch => return Err(AccountError::InvalidCredentials),
        }

        let token = self
            .tokens
            .issue(user.user_id.as_i64(), user.is_admin)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }

    async fn lookup(&self, identifier: &str) -> AccountResult<User> {
        if let Some(user) = self.repo.find_by_username(identifier).await? {
            return Ok(user);
        }
        self.repo
            .find_by_email(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)
    }
}
