//! Handlers for the `/notifications` resource: batches and the notifications
//! they fan out to.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ens_core::error::CoreError;
use ens_core::types::{parse_id, DbId};
use ens_db::models::notification::Notification;
use ens_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::QueryParams;
use crate::middleware::auth::AuthUser;
use crate::notifications::BatchDispatcher;
use crate::state::AppState;

const NOTIFICATION: &str = "notification";

/// Query parameters for `POST /notifications/batches/{batch_id}/send`.
#[derive(Debug, Deserialize)]
pub struct SendBatchQuery {
    /// Return per-notification delivery outcomes instead of bare ids.
    pub detailed: Option<bool>,
}

fn dispatcher(state: &AppState) -> BatchDispatcher {
    BatchDispatcher::new(
        state.pool.clone(),
        Arc::clone(&state.sender),
        state.config.telegram.send_timeout,
    )
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/batches
///
/// Create an unsent batch. Returns 201 with the batch id as a bare string.
pub async fn create_batch(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DbId>)> {
    let batch_id = dispatcher(&state).create_batch(auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(batch_id)))
}

/// POST /api/v1/notifications/batches/{batch_id}/send
///
/// Fan the batch out. Returns the created notification ids, or with
/// `?detailed=true` one `{notification_id, delivered, error?}` per id.
/// A batch that is unknown or already sent is a 404.
pub async fn send_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
    QueryParams(params): QueryParams<SendBatchQuery>,
) -> AppResult<Response> {
    let batch_id = parse_id(&batch_id, "batch")?;
    let outcomes = dispatcher(&state)
        .send_batch(auth.user_id, batch_id)
        .await?;

    if params.detailed.unwrap_or(false) {
        return Ok(Json(outcomes).into_response());
    }
    let ids: Vec<DbId> = outcomes.into_iter().map(|o| o.notification_id).collect();
    Ok(Json(ids).into_response())
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list(&state.pool, auth.user_id, false).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/pending
///
/// Notifications not yet completed.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list(&state.pool, auth.user_id, true).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let id = parse_id(&id, NOTIFICATION)?;
    NotificationRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Core(CoreError::not_found(NOTIFICATION, id)))
}

/// DELETE /api/v1/notifications/{id}
///
/// Delete a pending notification. A completed notification cannot be
/// cancelled and is reported as not found.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, NOTIFICATION)?;
    if !NotificationRepo::cancel(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::not_found(NOTIFICATION, id)));
    }
    tracing::info!(user_id = %auth.user_id, notification_id = %id, "Notification cancelled");
    Ok(StatusCode::NO_CONTENT)
}
