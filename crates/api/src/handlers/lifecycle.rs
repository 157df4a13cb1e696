//! Handlers shared by every draftable entity.
//!
//! Mounted once per entity with the payload type as parameter, e.g.
//! `get(lifecycle::list::<RecipientFields>)`. Path ids arrive as strings so a
//! malformed id is reported as not-found for the right entity.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ens_core::error::CoreError;
use ens_core::types::parse_id;
use ens_db::lifecycle::{Draft, DraftLifecycle, EntityFields, Record};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/{entity}/drafts/{draft_id}/confirm
///
/// Promote a draft to a permanent entity with a new id. A draft that does
/// not exist or was already confirmed is a 404.
pub async fn confirm<F: EntityFields>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> AppResult<(StatusCode, Json<Record<F>>)> {
    let draft_id = parse_id(&draft_id, F::DRAFT_ENTITY)?;

    let record = DraftLifecycle::<F>::confirm(&state.pool, auth.user_id, draft_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(F::DRAFT_ENTITY, draft_id)))?;

    tracing::info!(
        entity = F::ENTITY,
        user_id = %auth.user_id,
        id = %record.id,
        "Entity created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/{entity}
pub async fn list<F: EntityFields>(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Record<F>>>> {
    let records = DraftLifecycle::<F>::list(&state.pool, auth.user_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/{entity}/{id}
pub async fn get_by_id<F: EntityFields>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Record<F>>> {
    let id = parse_id(&id, F::ENTITY)?;
    DraftLifecycle::<F>::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Core(CoreError::not_found(F::ENTITY, id)))
}

/// DELETE /api/v1/{entity}/{id}
pub async fn delete<F: EntityFields>(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, F::ENTITY)?;
    if !DraftLifecycle::<F>::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::not_found(F::ENTITY, id)));
    }
    tracing::info!(entity = F::ENTITY, user_id = %auth.user_id, %id, "Entity deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Stage `fields` as a draft. Used by the per-entity create handlers.
pub(crate) async fn create_draft<F: EntityFields>(
    state: &AppState,
    auth: &AuthUser,
    fields: &F,
) -> AppResult<(StatusCode, Json<Draft<F>>)> {
    let draft = DraftLifecycle::<F>::create_draft(&state.pool, auth.user_id, fields).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// Replace an entity's payload. Used by the per-entity modify handlers.
pub(crate) async fn update<F: EntityFields>(
    state: &AppState,
    auth: &AuthUser,
    id: &str,
    fields: &F,
) -> AppResult<Json<Record<F>>> {
    let id = parse_id(id, F::ENTITY)?;
    DraftLifecycle::<F>::update(&state.pool, auth.user_id, id, fields)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Core(CoreError::not_found(F::ENTITY, id)))
}
