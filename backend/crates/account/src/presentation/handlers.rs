//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenService;

use crate::application::profile::{EngagementHistory, UserRecord};
use crate::application::{
    AccountConfig, CheckUsernameUseCase, DeleteUserUseCase, GetUserUseCase, IssueTempPasswordUseCase,
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, Requester, UpdateUserUseCase,
};
use crate::domain::repository::{EngagementDirectory, UserRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    AuthResponse, AvailabilityQuery, AvailabilityResponse, FullUserDto, LoginRequest,
    PublicUserDto, RegisterRequest, TempPasswordResponse, UpdateUserResponse, UserDto,
    UserResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.config.clone(), state.tokens.clone());

    let input = RegisterInput {
        username: req.username,
        password: req.password,
        email: req.email,
    };

    let output = use_case.execute(input).await?;

    // A brand-new account has no engagement history yet
    let record = UserRecord {
        user: output.user,
        engagement: Some(EngagementHistory::default()),
    };

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            user: FullUserDto::from_record(&record),
        }),
    ))
}

/// POST /login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<AuthResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let use_case =
        LoginUseCase::new(state.repo.clone(), state.config.clone(), state.tokens.clone());

    let input = LoginInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let requester = requester_for(&output.user);
    let record = GetUserUseCase::new(state.repo.clone())
        .execute(output.user.user_id, requester)
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
        user: FullUserDto::from_record(&record),
    }))
}

// ============================================================================
// Availability
// ============================================================================

/// GET /username-available
pub async fn username_available<R>(
    State(state): State<AccountAppState<R>>,
    Query(query): Query<AvailabilityQuery>,
) -> AccountResult<Json<AvailabilityResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let username = query
        .username
        .ok_or_else(|| AccountError::MissingParameter("username".to_string()))?;

    let available = CheckUsernameUseCase::new(state.repo.clone())
        .execute(&username)
        .await?;

    Ok(Json(AvailabilityResponse { available }))
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let requester = requester_from(&headers, &state.tokens);

    let record = GetUserUseCase::new(state.repo.clone())
        .execute(UserId::from_i64(id), requester)
        .await?;

    let user = if record.is_full() {
        UserDto::Full(FullUserDto::from_record(&record))
    } else {
        UserDto::Public(PublicUserDto::from_user(&record.user))
    };

    Ok(Json(UserResponse { user }))
}

/// GET /users/me
pub async fn get_me<R>(
    State(state): State<AccountAppState<R>>,
    headers: HeaderMap,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let requester = requester_from(&headers, &state.tokens);

    let record = GetUserUseCase::new(state.repo.clone()).me(requester).await?;

    Ok(Json(UserResponse {
        user: UserDto::Full(FullUserDto::from_record(&record)),
    }))
}

/// PUT /users/{id}
pub async fn update_user<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(fields): Json<serde_json::Map<String, serde_json::Value>>,
) -> AccountResult<Json<UpdateUserResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let requester = requester_from(&headers, &state.tokens);
    require_user(requester)?;

    let outcome = UpdateUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(UserId::from_i64(id), fields, requester)
        .await?;

    Ok(Json(UpdateUserResponse {
        updated: outcome.updated,
        invalid_fields: outcome.invalid_fields,
    }))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AccountResult<StatusCode>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let requester = requester_from(&headers, &state.tokens);
    require_user(requester)?;

    DeleteUserUseCase::new(state.repo.clone())
        .execute(UserId::from_i64(id), requester)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/{id}/temp-password
pub async fn issue_temp_password<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AccountResult<Json<TempPasswordResponse>>
where
    R: UserRepository + EngagementDirectory + Clone + Send + Sync + 'static,
{
    let requester = requester_from(&headers, &state.tokens);
    require_user(requester)?;

    let temp_password = IssueTempPasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(UserId::from_i64(id), requester)
        .await?;

    Ok(Json(TempPasswordResponse { temp_password }))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Establish the requester's identity from the bearer token. A missing
/// or invalid token degrades to anonymous.
pub(crate) fn requester_from(headers: &HeaderMap, tokens: &TokenService) -> Requester {
    match platform::token::bearer_token(headers).and_then(|t| tokens.verify(t).ok()) {
        Some(claims) if claims.admin => Requester::admin(UserId::from_i64(claims.sub)),
        Some(claims) => Requester::user(UserId::from_i64(claims.sub)),
        None => Requester::anonymous(),
    }
}

pub(crate) fn require_user(requester: Requester) -> AccountResult<UserId> {
    requester.user_id.ok_or(AccountError::Unauthorized)
}

fn requester_for(user: &crate::domain::entities::User) -> Requester {
    if user.is_admin {
        Requester::admin(user.user_id)
    } else {
        Requester::user(user.user_id)
    }
}
