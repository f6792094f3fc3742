//! Domain Entities
//!
//! The user entity. Sensitive material (password hashes) never leaves
//! this layer; projections for the HTTP surface are built in the
//! presentation layer from explicit subsets.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserName;

/// UI color theme, stored per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    Default,
    Dark,
    Lake,
    Mango,
    Raspberry,
}

impl Theme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "DEFAULT",
            Theme::Dark => "DARK",
            Theme::Lake => "LAKE",
            Theme::Mango => "MANGO",
            Theme::Raspberry => "RASPBERRY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEFAULT" => Some(Theme::Default),
            "DARK" => Some(Theme::Dark),
            "LAKE" => Some(Theme::Lake),
            "MANGO" => Some(Theme::Mango),
            "RASPBERRY" => Some(Theme::Raspberry),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Default
    }
}

/// Outcome of a password check against a user's stored hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    /// Matched the main password
    Primary,
    /// Matched the one-time temporary password; the caller must clear
    /// it so it cannot be replayed
    Temporary,
    /// Matched neither
    NoMatch,
}

/// Data for a user that does not exist yet. The id is assigned by the
/// database on insert.
#[derive(Debug)]
pub struct NewUser {
    pub username: UserName,
    pub email: Option<String>,
    pub password_hash: HashedPassword,
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: UserId,
    /// Unique, used for login and display
    pub username: UserName,
    pub email: Option<String>,
    /// Argon2id hash of the main password
    pub password_hash: HashedPassword,
    /// One-time recovery password, hashed; cleared after first use
    pub temp_password_hash: Option<HashedPassword>,
    pub theme: Theme,
    /// Link to an avatar image
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check a password against the main hash, then against the
    /// temporary one if set.
    pub fn check_password(
        &self,
        input: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> PasswordMatch {
        if self.password_hash.verify(input, pepper) {
            return PasswordMatch::Primary;
        }
        if let Some(temp) = &self.temp_password_hash {
            if temp.verify(input, pepper) {
                return PasswordMatch::Temporary;
            }
        }
        PasswordMatch::NoMatch
    }

    /// Check uniqueness before calling this.
    pub fn set_username(&mut self, username: UserName) {
        self.username = username;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
    }

    /// Set a one-time recovery password (already hashed)
    pub fn set_temp_password(&mut self, temp_password_hash: HashedPassword) {
        self.temp_password_hash = Some(temp_password_hash);
    }

    /// Clear the temporary password after a successful login with it
    pub fn clear_temp_password(&mut self) {
        self.temp_password_hash = None;
    }
}
