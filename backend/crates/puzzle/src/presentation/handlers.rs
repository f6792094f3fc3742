//! HTTP Handlers
//!
//! The authorization gate lives here: handlers establish the
//! requester's identity from the bearer token and decide which
//! projection a use case is asked for. The domain never checks access
//! itself.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use kernel::id::{PuzzleId, UserId};
use platform::token::TokenService;

use crate::application::{
    Access, CreatePuzzleInput, CreatePuzzleUseCase, DeletePuzzleUseCase, EngagePuzzleUseCase,
    EngagementCounts, FetchPuzzleUseCase, PuzzleConfig, UpdatePuzzleInput, UpdatePuzzleUseCase,
    ValidateSolutionUseCase,
};
use crate::domain::repository::{
    CreatorDirectory, EngagementLedger, IdOccupancy, PuzzleRepository,
};
use crate::error::{PuzzleError, PuzzleResult};
use crate::presentation::dto::{
    CreatePuzzleRequest, GetPuzzleQuery, PageQuery, PuzzleListResponse, PuzzleResponse,
    UpdatePuzzleRequest, ValidateRequest, ValidateResponse,
};

/// Shared state for puzzle handlers
#[derive(Clone)]
pub struct PuzzleAppState<R>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PuzzleConfig>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Create
// ============================================================================

/// POST /puzzles
pub async fn create_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<CreatePuzzleRequest>,
) -> PuzzleResult<(StatusCode, Json<PuzzleResponse>)>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let creator_id = require_user(access)?;

    let use_case = CreatePuzzleUseCase::new(state.repo.clone());

    let input = CreatePuzzleInput {
        title: req.title,
        description: req.description,
        cells_json: req.cells,
        hints_json: req.hints,
        status: req.status,
    };

    let puzzle = use_case.execute(input, creator_id).await?;

    Ok((StatusCode::CREATED, Json(PuzzleResponse { puzzle })))
}

// ============================================================================
// Read
// ============================================================================

/// GET /puzzles
pub async fn browse_puzzles<R>(
    State(state): State<PuzzleAppState<R>>,
    Query(query): Query<PageQuery>,
) -> PuzzleResult<Json<PuzzleListResponse>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let page = state.config.clamp_page(query.page);
    let limit = state.config.clamp_limit(query.limit);

    let use_case = FetchPuzzleUseCase::new(state.repo.clone());
    let puzzles = use_case.browse(page, limit).await?;

    Ok(Json(PuzzleListResponse { puzzles }))
}

/// GET /puzzles/{id}
pub async fn get_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    Query(query): Query<GetPuzzleQuery>,
    headers: HeaderMap,
) -> PuzzleResult<Json<PuzzleResponse>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let want_solution = query.mode.as_deref() == Some("edit");

    let use_case = FetchPuzzleUseCase::new(state.repo.clone());
    let puzzle = use_case
        .get(PuzzleId::from_i64(id), access, want_solution)
        .await?;

    Ok(Json(PuzzleResponse { puzzle }))
}

/// GET /users/{id}/puzzles
pub async fn creator_puzzles<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> PuzzleResult<Json<PuzzleListResponse>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let page = state.config.clamp_page(query.page);
    let limit = state.config.clamp_limit(query.limit);

    let use_case = FetchPuzzleUseCase::new(state.repo.clone());
    let puzzles = use_case
        .by_creator(UserId::from_i64(id), access, page, limit)
        .await?;

    Ok(Json(PuzzleListResponse { puzzles }))
}

// ============================================================================
// Update / Delete
// ============================================================================

/// PUT /puzzles/{id}
pub async fn update_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UpdatePuzzleRequest>,
) -> PuzzleResult<Json<PuzzleResponse>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    require_user(access)?;

    let use_case = UpdatePuzzleUseCase::new(state.repo.clone());

    let input = UpdatePuzzleInput {
        title: req.title,
        description: req.description,
        cells_json: req.cells,
        hints_json: req.hints,
        status: req.status,
    };

    let puzzle = use_case.execute(PuzzleId::from_i64(id), input, access).await?;

    Ok(Json(PuzzleResponse { puzzle }))
}

/// DELETE /puzzles/{id}
pub async fn delete_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> PuzzleResult<StatusCode>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    require_user(access)?;

    let use_case = DeletePuzzleUseCase::new(state.repo.clone());
    use_case.execute(PuzzleId::from_i64(id), access).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Validate
// ============================================================================

/// POST /puzzles/{id}/validate
pub async fn validate_solution<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<ValidateRequest>,
) -> PuzzleResult<Json<ValidateResponse>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    // Anonymous players can check their answer too
    let access = access_from(&headers, &state.tokens);

    let use_case = ValidateSolutionUseCase::new(state.repo.clone());
    let complete = use_case
        .execute(PuzzleId::from_i64(id), &req.cells, access)
        .await?;

    Ok(Json(ValidateResponse { complete }))
}

// ============================================================================
// Engagement
// ============================================================================

/// POST /puzzles/{id}/like
pub async fn like_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> PuzzleResult<Json<EngagementCounts>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let user_id = require_user(access)?;

    let use_case = EngagePuzzleUseCase::new(state.repo.clone());
    let counts = use_case.like(PuzzleId::from_i64(id), user_id, access).await?;

    Ok(Json(counts))
}

/// POST /puzzles/{id}/unlike
pub async fn unlike_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> PuzzleResult<Json<EngagementCounts>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let user_id = require_user(access)?;

    let use_case = EngagePuzzleUseCase::new(state.repo.clone());
    let counts = use_case
        .unlike(PuzzleId::from_i64(id), user_id, access)
        .await?;

    Ok(Json(counts))
}

/// POST /puzzles/{id}/favorite
pub async fn favorite_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> PuzzleResult<Json<EngagementCounts>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let user_id = require_user(access)?;

    let use_case = EngagePuzzleUseCase::new(state.repo.clone());
    let counts = use_case
        .favorite(PuzzleId::from_i64(id), user_id, access)
        .await?;

    Ok(Json(counts))
}

/// POST /puzzles/{id}/unfavorite
pub async fn unfavorite_puzzle<R>(
    State(state): State<PuzzleAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> PuzzleResult<Json<EngagementCounts>>
where
    R: PuzzleRepository
        + IdOccupancy
        + CreatorDirectory
        + EngagementLedger
        + Clone
        + Send
        + Sync
        + 'static,
{
    let access = access_from(&headers, &state.tokens);
    let user_id = require_user(access)?;

    let use_case = EngagePuzzleUseCase::new(state.repo.clone());
    let counts = use_case
        .unfavorite(PuzzleId::from_i64(id), user_id, access)
        .await?;

    Ok(Json(counts))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Establish the requester's identity from the bearer token. A missing
/// or invalid token degrades to anonymous; routes that need a user call
/// [`require_user`] on top.
pub(crate) fn access_from(headers: &HeaderMap, tokens: &TokenService) -> Access {
    match platform::token::bearer_token(headers).and_then(|t| tokens.verify(t).ok()) {
        Some(claims) if claims.admin => Access::admin(UserId::from_i64(claims.sub)),
        Some(claims) => Access::user(UserId::from_i64(claims.sub)),
        None => Access::anonymous(),
    }
}

pub(crate) fn require_user(access: Access) -> PuzzleResult<UserId> {
    access.user_id.ok_or(PuzzleError::Unauthorized)
}
