//! Puzzle Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::PuzzleConfig;
use crate::domain::repository::{
    CreatorDirectory, EngagementLedger, IdOccupancy, PuzzleRepository,
};
use crate::infra::postgres::PgPuzzleRepository;
use crate::presentation::handlers::{self, PuzzleAppState};

/// Create the puzzle router with the PostgreSQL repository. Mount under
/// `/puzzles`.
pub fn puzzle_router(
    repo: PgPuzzleRepository,
    config: PuzzleConfig,
    tokens: TokenService,
) -> Router {
    puzzle_router_generic(repo, config, tokens)
}

/// Create a generic puzzle router for any repository implementation
pub fn puzzle_router_generic<R>(repo: R, config: PuzzleConfig, tokens: TokenService) -> Router
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
    let state = PuzzleAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens: Arc::new(tokens),
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_puzzle::<R>).get(handlers::browse_puzzles::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_puzzle::<R>)
                .put(handlers::update_puzzle::<R>)
                .delete(handlers::delete_puzzle::<R>),
        )
        .route("/{id}/validate", post(handlers::validate_solution::<R>))
        .route("/{id}/like", post(handlers::like_puzzle::<R>))
        .route("/{id}/unlike", post(handlers::unlike_puzzle::<R>))
        .route("/{id}/favorite", post(handlers::favorite_puzzle::<R>))
        .route("/{id}/unfavorite", post(handlers::unfavorite_puzzle::<R>))
        .with_state(state)
}

/// The by-creator listing lives under `/users/{id}/puzzles`; mount this
/// under `/users` next to the account routes.
pub fn creator_puzzles_router(
    repo: PgPuzzleRepository,
    config: PuzzleConfig,
    tokens: TokenService,
) -> Router {
    let state = PuzzleAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens: Arc::new(tokens),
    };

    Router::new()
        .route(
            "/{id}/puzzles",
            get(handlers::creator_puzzles::<PgPuzzleRepository>),
        )
        .with_state(state)
}
