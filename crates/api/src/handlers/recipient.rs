//! Handlers for the `/recipients` resource.
//!
//! Confirm, list, get and delete are the shared [`lifecycle`](super::lifecycle)
//! handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ens_db::models::recipient::{Recipient, RecipientDraft, RecipientFields};

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::handlers::lifecycle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/recipients
///
/// Stage a recipient draft. Returns 201 with the draft id.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RecipientFields>,
) -> AppResult<(StatusCode, Json<RecipientDraft>)> {
    lifecycle::create_draft(&state, &auth, &input).await
}

/// PUT /api/v1/recipients/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<RecipientFields>,
) -> AppResult<Json<Recipient>> {
    lifecycle::update(&state, &auth, &id, &input).await
}
