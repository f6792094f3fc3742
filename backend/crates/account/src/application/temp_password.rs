//! Temporary Password Use Case
//!
//! Account recovery without a mail pipeline: an admin mints a one-time
//! password for the user and delivers it out of band. The cleartext is
//! returned exactly once; only the hash is stored, and the first login
//! that uses it clears it.

use std::sync::Arc;

use kernel::id::UserId;
use platform::crypto::{random_bytes, to_base64url};
use platform::password::ClearTextPassword;

use crate::application::access::Requester;
use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Issue temporary password use case
pub struct IssueTempPasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> IssueTempPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, target: UserId, requester: Requester) -> AccountResult<String> {
        if !requester.is_admin {
            return Err(AccountError::Forbidden);
        }

        let mut user = self
            .repo
            .find_by_id(target)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        // 12 base64url characters of real randomness
        let generated = to_base64url(&random_bytes(9));

        let cleartext = ClearTextPassword::new(generated.clone())
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        let hash = cleartext
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        user.set_temp_password(hash);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %target, "Temporary password issued");

        Ok(generated)
    }
}
