//! Handlers for the `/templates` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ens_db::models::template::{NotificationTemplate, TemplateDraft, TemplateFields};

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::handlers::lifecycle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/templates
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<TemplateFields>,
) -> AppResult<(StatusCode, Json<TemplateDraft>)> {
    lifecycle::create_draft(&state, &auth, &input).await
}

/// PUT /api/v1/templates/{id}
///
/// Groups keep pointing at the template; new batches use the new text.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<TemplateFields>,
) -> AppResult<Json<NotificationTemplate>> {
    lifecycle::update(&state, &auth, &id, &input).await
}
