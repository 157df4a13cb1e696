//! Handlers for the authenticated tenant's own account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ens_core::error::CoreError;
use ens_db::models::user::{UpdateUser, User};
use ens_db::repositories::{SessionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::handlers::auth::{hash_new_password, CredentialsRequest};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// PUT /api/v1/users/me
///
/// Replace the tenant's name and password. Every refresh session is revoked;
/// access tokens stay valid until they expire.
pub async fn modify_me(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CredentialsRequest>,
) -> AppResult<Json<User>> {
    let password_hash = hash_new_password(&input.password)?;

    let user = UserRepo::update(
        &state.pool,
        auth.user_id,
        &UpdateUser {
            name: input.name,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("user", auth.user_id)))?;

    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, revoked, "User credentials modified");

    Ok(Json(user))
}

/// DELETE /api/v1/users/me
///
/// Delete the tenant together with everything it owns.
pub async fn delete_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::not_found("user", auth.user_id)));
    }
    tracing::info!(user_id = %auth.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
