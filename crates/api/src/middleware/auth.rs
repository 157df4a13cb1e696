//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ens_core::error::CoreError;
use ens_core::types::DbId;
use ens_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated tenant extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Besides checking the token itself, the extractor confirms the account
/// still exists, so tokens of a deleted tenant stop working immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The tenant's user id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        ensure_user_exists(state, claims.sub).await?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    if !UserRepo::exists(&state.pool, user_id).await? {
        return Err(unauthorized("User no longer exists"));
    }
    Ok(())
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}
