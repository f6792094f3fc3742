//! Register Use Case
//!
//! Creates a new user account and issues their first token.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::TokenService;

use crate::application::config::AccountConfig;
use crate::domain::entities::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_objects::UserName;
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
    tokens: Arc<TokenService>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        // Validate username
        let username = UserName::new(input.username)
            .map_err(|e| AccountError::InvalidUsername(e.to_string()))?;

        // Check availability
        if self.repo.exists_by_username(username.as_str()).await? {
            return Err(AccountError::UsernameTaken);
        }
        if let Some(email) = input.email.as_deref() {
            if self.repo.exists_by_email(email).await? {
                return Err(AccountError::EmailTaken);
            }
        }

        // Validate and hash password
        let raw_password = ClearTextPassword::new(input.password)
            .map_err(|e| AccountError::PasswordValidation(e.to_string()))?;
        let password_hash = raw_password
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        // Persist; the unique constraints back up the availability
        // checks against concurrent registration
        let user = self
            .repo
            .create(&NewUser {
                username,
                email: input.email,
                password_hash,
            })
            .await?;

        let token = self
            .tokens
            .issue(user.user_id.as_i64(), user.is_admin)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput { token, user })
    }
}

/// Username availability use case
pub struct CheckUsernameUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CheckUsernameUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, username: &str) -> AccountResult<bool> {
        Ok(!self.repo.exists_by_username(username).await?)
    }
}
