//! Handlers for the `/auth` resource (register, login, refresh).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use ens_core::error::CoreError;
use ens_core::types::DbId;
use ens_db::models::session::NewRefreshSession;
use ens_db::models::user::CreateUser;
use ens_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` and `PUT /users/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a tenant account and sign it in. A taken name is a 409.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<TokenPair>)> {
    let password_hash = hash_new_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "User registered");

    let tokens = create_token_pair(&state, user.id).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with name + password.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_name(&state.pool, &input.name)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let tokens = create_token_pair(&state, user.id).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The presented token is revoked;
/// of two concurrent refreshes with the same token only one succeeds.
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_live(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    if !SessionRepo::consume(&state.pool, session.id).await? {
        return Err(invalid_refresh_token());
    }

    let tokens = create_token_pair(&state, session.user_id).await?;
    Ok(Json(tokens))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check the password policy and hash the password.
pub(crate) fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Issue an access token and persist a new refresh session.
async fn create_token_pair(state: &AppState, user_id: DbId) -> AppResult<TokenPair> {
    let access_token = generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::open(
        &state.pool,
        &NewRefreshSession {
            user_id,
            token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh_plaintext,
        token_type: "bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user_id,
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid name or password".into()))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}
