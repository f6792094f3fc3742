//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PuzzleId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{Puzzle, Status};
use crate::domain::projection::CreatorCard;
use crate::domain::repository::{
    CreatorDirectory, EngagementLedger, IdOccupancy, PuzzleRepository,
};
use crate::error::{PuzzleError, PuzzleResult};

/// PostgreSQL-backed repository
///
/// Implements the whole collaborator surface the puzzle domain
/// consumes: the puzzle table itself, the allocator's existence probe,
/// creator resolution (a read-only view of the users table), and the
/// per-user engagement join tables.
#[derive(Clone)]
pub struct PgPuzzleRepository {
    pool: PgPool,
}

impl PgPuzzleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PuzzleRepository for PgPuzzleRepository {
    async fn create(&self, puzzle: &Puzzle) -> PuzzleResult<()> {
        sqlx::query(
            r#"
            INSERT INTO puzzles (
                puzzle_id,
                creator,
                title,
                description,
                cells_json,
                hints_json,
                status,
                created_at,
                last_updated,
                like_count,
                favorite_count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(puzzle.id.as_i64())
        .bind(puzzle.creator_id.as_i64())
        .bind(&puzzle.title)
        .bind(&puzzle.description)
        .bind(&puzzle.cells_json)
        .bind(&puzzle.hints_json)
        .bind(puzzle.status.as_str())
        .bind(puzzle.created_at)
        .bind(puzzle.last_updated)
        .bind(puzzle.like_count)
        .bind(puzzle.favorite_count)
        .execute(&self.pool)
        .await?;

        tracing::info!(puzzle_id = %puzzle.id, "Puzzle row inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: PuzzleId) -> PuzzleResult<Option<Puzzle>> {
        let row = sqlx::query_as::<_, PuzzleRow>(
            r#"
            SELECT
                puzzle_id,
                creator,
                title,
                description,
                cells_json,
                hints_json,
                status,
                created_at,
                last_updated,
                like_count,
                favorite_count
            FROM puzzles
            WHERE puzzle_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PuzzleRow::into_puzzle).transpose()
    }

    async fn update(&self, puzzle: &Puzzle) -> PuzzleResult<()> {
        sqlx::query(
            r#"
            UPDATE puzzles SET
                title = $2,
                description = $3,
                cells_json = $4,
                hints_json = $5,
                status = $6,
                last_updated = $7,
                like_count = $8,
                favorite_count = $9
            WHERE puzzle_id = $1
            "#,
        )
        .bind(puzzle.id.as_i64())
        .bind(&puzzle.title)
        .bind(&puzzle.description)
        .bind(&puzzle.cells_json)
        .bind(&puzzle.hints_json)
        .bind(puzzle.status.as_str())
        .bind(puzzle.last_updated)
        .bind(puzzle.like_count)
        .bind(puzzle.favorite_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: PuzzleId) -> PuzzleResult<()> {
        sqlx::query("DELETE FROM puzzles WHERE puzzle_id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        tracing::info!(puzzle_id = %id, "Puzzle row deleted");
        Ok(())
    }

    async fn list_public(&self, page: u32, limit: u32) -> PuzzleResult<Vec<Puzzle>> {
        let rows = sqlx::query_as::<_, PuzzleRow>(
            r#"
            SELECT
                puzzle_id, creator, title, description, cells_json,
                hints_json, status, created_at, last_updated,
                like_count, favorite_count
            FROM puzzles
            WHERE status = 'PUBLIC'
            ORDER BY last_updated DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(page as i64 * limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PuzzleRow::into_puzzle).collect()
    }

    async fn list_by_creator(
        &self,
        creator_id: UserId,
        include_hidden: bool,
        page: u32,
        limit: u32,
    ) -> PuzzleResult<Vec<Puzzle>> {
        let rows = if include_hidden {
            sqlx::query_as::<_, PuzzleRow>(
                r#"
                SELECT
                    puzzle_id, creator, title, description, cells_json,
                    hints_json, status, created_at, last_updated,
                    like_count, favorite_count
                FROM puzzles
                WHERE creator = $1
                ORDER BY last_updated DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(creator_id.as_i64())
            .bind(limit as i64)
            .bind(page as i64 * limit as i64)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, PuzzleRow>(
                r#"
                SELECT
                    puzzle_id, creator, title, description, cells_json,
                    hints_json, status, created_at, last_updated,
                    like_count, favorite_count
                FROM puzzles
                WHERE creator = $1 AND status = 'PUBLIC'
                ORDER BY last_updated DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(creator_id.as_i64())
            .bind(limit as i64)
            .bind(page as i64 * limit as i64)
            .fetch_all(&self.pool)
            .await?
        };

        rows.into_iter().map(PuzzleRow::into_puzzle).collect()
    }
}

impl IdOccupancy for PgPuzzleRepository {
    async fn exists_with_id(&self, id: PuzzleId) -> PuzzleResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM puzzles WHERE puzzle_id = $1)",
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

impl CreatorDirectory for PgPuzzleRepository {
    async fn resolve_creator(&self, id: UserId) -> PuzzleResult<Option<CreatorCard>> {
        let row = sqlx::query_as::<_, CreatorRow>(
            r#"
            SELECT user_id, username, created_at, avatar
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CreatorRow::into_card))
    }
}

impl EngagementLedger for PgPuzzleRepository {
    async fn add_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        self.insert_engagement("user_liked_puzzles", user_id, puzzle_id)
            .await
    }

    async fn remove_like(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        self.delete_engagement("user_liked_puzzles", user_id, puzzle_id)
            .await
    }

    async fn add_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        self.insert_engagement("user_favorited_puzzles", user_id, puzzle_id)
            .await
    }

    async fn remove_favorite(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        self.delete_engagement("user_favorited_puzzles", user_id, puzzle_id)
            .await
    }

    async fn record_completion(&self, user_id: UserId, puzzle_id: PuzzleId) -> PuzzleResult<bool> {
        self.insert_engagement("user_completed_puzzles", user_id, puzzle_id)
            .await
    }
}

impl PgPuzzleRepository {
    /// ON CONFLICT DO NOTHING makes the transition idempotent at the
    /// storage boundary: rows_affected is 1 only for a real change.
    async fn insert_engagement(
        &self,
        table: &'static str,
        user_id: UserId,
        puzzle_id: PuzzleId,
    ) -> PuzzleResult<bool> {
        let query = format!(
            "INSERT INTO {table} (user_id, puzzle_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
        let affected = sqlx::query(&query)
            .bind(user_id.as_i64())
            .bind(puzzle_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected == 1)
    }

    async fn delete_engagement(
        &self,
        table: &'static str,
        user_id: UserId,
        puzzle_id: PuzzleId,
    ) -> PuzzleResult<bool> {
        let query = format!("DELETE FROM {table} WHERE user_id = $1 AND puzzle_id = $2");
        let affected = sqlx::query(&query)
            .bind(user_id.as_i64())
            .bind(puzzle_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected == 1)
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct PuzzleRow {
    puzzle_id: i64,
    creator: i64,
    title: String,
    description: String,
    cells_json: String,
    hints_json: String,
    status: String,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    like_count: i32,
    favorite_count: i32,
}

impl PuzzleRow {
    fn into_puzzle(self) -> PuzzleResult<Puzzle> {
        let status = Status::parse(&self.status).ok_or_else(|| {
            PuzzleError::Internal(format!("Unknown puzzle status: {}", self.status))
        })?;

        Ok(Puzzle {
            id: PuzzleId::from_i64(self.puzzle_id),
            creator_id: UserId::from_i64(self.creator),
            title: self.title,
            description: self.description,
            cells_json: self.cells_json,
            hints_json: self.hints_json,
            status,
            created_at: self.created_at,
            last_updated: self.last_updated,
            like_count: self.like_count,
            favorite_count: self.favorite_count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CreatorRow {
    user_id: i64,
    username: String,
    created_at: DateTime<Utc>,
    avatar: Option<String>,
}

impl CreatorRow {
    fn into_card(self) -> CreatorCard {
        CreatorCard {
            id: UserId::from_i64(self.user_id),
            username: self.username,
            created_at: self.created_at,
            avatar: self.avatar,
        }
    }
}
