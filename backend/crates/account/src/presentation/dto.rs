//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{PuzzleId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::profile::UserRecord;
use crate::domain::entities::{Theme, User};

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Login request. `username` also accepts the account email.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register/login response: the bearer token plus the caller's own
/// (full) record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: FullUserDto,
}

// ============================================================================
// Availability
// ============================================================================

/// Username availability query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub username: Option<String>,
}

/// Username availability response
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

// ============================================================================
// User projections
// ============================================================================

/// Public subset of a user record, safe for anyone
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserDto {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

impl PublicUserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
            avatar: user.avatar.clone(),
        }
    }
}

/// Full user record: public subset plus private fields and engagement
/// history. Only for the user themselves or an admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullUserDto {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub theme: Theme,
    pub is_admin: bool,
    pub liked_puzzle_ids: Vec<PuzzleId>,
    pub favorited_puzzle_ids: Vec<PuzzleId>,
    pub completed_puzzle_ids: Vec<PuzzleId>,
}

impl FullUserDto {
    pub fn from_record(record: &UserRecord) -> Self {
        let user = &record.user;
        let history = record.engagement.clone().unwrap_or_default();
        Self {
            id: user.user_id,
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
            avatar: user.avatar.clone(),
            email: user.email.clone(),
            theme: user.theme,
            is_admin: user.is_admin,
            liked_puzzle_ids: history.liked,
            favorited_puzzle_ids: history.favorited,
            completed_puzzle_ids: history.completed,
        }
    }
}

/// Either projection, picked by the requester's access
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UserDto {
    Full(FullUserDto),
    Public(PublicUserDto),
}

/// Single user response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

// ============================================================================
// Update / recovery
// ============================================================================

/// Field-by-field update outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserResponse {
    pub updated: usize,
    pub invalid_fields: Vec<String>,
}

/// One-time temporary password, shown exactly once
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TempPasswordResponse {
    pub temp_password: String,
}
