//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PuzzleId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entities::{NewUser, Theme, User};
use crate::domain::repository::{EngagementDirectory, UserRepository};
use crate::domain::value_objects::UserName;
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id, username, email, password_hash, temp_password_hash,
    theme, avatar, is_admin, created_at
"#;

impl UserRepository for PgAccountRepository {
    async fn create(&self, new_user: &NewUser) -> AccountResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING
                user_id, username, email, password_hash, temp_password_hash,
                theme, avatar, is_admin, created_at
            "#,
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_deref())
        .bind(new_user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = row.user_id, "User row inserted");
        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                password_hash = $4,
                temp_password_hash = $5,
                theme = $6,
                avatar = $7,
                is_admin = $8
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_i64())
        .bind(user.username.as_str())
        .bind(user.email.as_deref())
        .bind(user.password_hash.as_phc_string())
        .bind(
            user.temp_password_hash
                .as_ref()
                .map(HashedPassword::as_phc_string),
        )
        .bind(user.theme.as_str())
        .bind(user.avatar.as_deref())
        .bind(user.is_admin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AccountResult<()> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %user_id, "User row deleted");
        Ok(())
    }
}

impl EngagementDirectory for PgAccountRepository {
    async fn liked_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>> {
        self.puzzle_ids("user_liked_puzzles", user_id).await
    }

    async fn favorited_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>> {
        self.puzzle_ids("user_favorited_puzzles", user_id).await
    }

    async fn completed_puzzle_ids(&self, user_id: UserId) -> AccountResult<Vec<PuzzleId>> {
        self.puzzle_ids("user_completed_puzzles", user_id).await
    }
}

impl PgAccountRepository {
    async fn puzzle_ids(
        &self,
        table: &'static str,
        user_id: UserId,
    ) -> AccountResult<Vec<PuzzleId>> {
        let query =
            format!("SELECT puzzle_id FROM {table} WHERE user_id = $1 ORDER BY puzzle_id");
        let ids = sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(PuzzleId::from_i64).collect())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    email: Option<String>,
    password_hash: String,
    temp_password_hash: Option<String>,
    theme: String,
    avatar: Option<String>,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let username = UserName::new(self.username)
            .map_err(|e| AccountError::Internal(format!("Stored username invalid: {e}")))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("Stored password hash invalid: {e}")))?;

        let temp_password_hash = self
            .temp_password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| AccountError::Internal(format!("Stored temp password invalid: {e}")))?;

        let theme = Theme::parse(&self.theme)
            .ok_or_else(|| AccountError::Internal(format!("Unknown theme: {}", self.theme)))?;

        Ok(User {
            user_id: UserId::from_i64(self.user_id),
            username,
            email: self.email,
            password_hash,
            temp_password_hash,
            theme,
            avatar: self.avatar,
            is_admin: self.is_admin,
            created_at: self.created_at,
        })
    }
}
