//! Account Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::{EngagementDirectory, UserRepository};
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router with the PostgreSQL repository. Paths are
/// absolute (the original API exposes `/register`, `/login` and
/// `/users/...` at the root), so merge this router rather than nesting
/// it.
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let tokens = config.token_service();
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        tokens: Arc::new(tokens),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/username-available", get(handlers::username_available::<R>))
        .route("/users/me", get(handlers::get_me::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route(
            "/users/{id}/temp-password",
            post(handlers::issue_temp_password::<R>),
        )
        .with_state(state)
}
