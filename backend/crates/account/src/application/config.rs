//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

use platform::token::TokenService;

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// Secret for signing bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Token lifetime
    pub token_ttl: Duration,
    /// Application-wide password pepper
    pub pepper: Option<Vec<u8>>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            // Original contract: tokens valid for one week
            token_ttl: Duration::from_secs(7 * 24 * 3600),
            pepper: None,
        }
    }
}

impl AccountConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_pepper(mut self, pepper: Vec<u8>) -> Self {
        self.pepper = Some(pepper);
        self
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_deref()
    }

    /// Build the token service this config describes
    pub fn token_service(&self) -> TokenService {
        TokenService::new(self.token_secret, self.token_ttl)
    }
}
