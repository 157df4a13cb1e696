//! Handlers for the `/groups` resource and its membership sub-resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ens_core::error::CoreError;
use ens_core::types::{parse_id, parse_reference, DbId};
use ens_db::models::group::{GroupDraft, GroupFields, GroupPayload, RecipientGroup};
use ens_db::models::recipient::Recipient;
use ens_db::repositories::{GroupMemberRepo, GroupRepo, RecipientRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::handlers::lifecycle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const GROUP: &str = "recipient group";
const RECIPIENT: &str = "recipient";

// ---------------------------------------------------------------------------
// Create / modify
// ---------------------------------------------------------------------------

/// POST /api/v1/groups
///
/// Stage a group draft. A `notification_template_id` that is not an id, or
/// names no template of this tenant, is a 422.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<GroupPayload>,
) -> AppResult<(StatusCode, Json<GroupDraft>)> {
    let active = input.active.unwrap_or(true);
    let fields = resolve_payload(&state, &auth, input, active).await?;
    lifecycle::create_draft(&state, &auth, &fields).await
}

/// PUT /api/v1/groups/{id}
///
/// Omitting `active` keeps the group's current flag.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<GroupPayload>,
) -> AppResult<Json<RecipientGroup>> {
    let active = match input.active {
        Some(active) => active,
        None => find_group(&state, &auth, &id).await?.fields.active,
    };
    let fields = resolve_payload(&state, &auth, input, active).await?;
    lifecycle::update(&state, &auth, &id, &fields).await
}

/// GET /api/v1/groups/active
pub async fn list_active(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecipientGroup>>> {
    let groups = GroupRepo::list_active(&state.pool, auth.user_id).await?;
    Ok(Json(groups))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// GET /api/v1/groups/{id}/recipients
pub async fn list_recipients(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Recipient>>> {
    let group_id = ensure_group(&state, &auth, &id).await?;
    let recipients = GroupMemberRepo::list_recipients(&state.pool, auth.user_id, group_id).await?;
    Ok(Json(recipients))
}

/// PUT /api/v1/groups/{id}/recipients/{recipient_id}
///
/// Returns 204; adding an existing member is a 409.
pub async fn add_recipient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, recipient_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let group_id = ensure_group(&state, &auth, &id).await?;
    let recipient_id = ensure_recipient(&state, &auth, &recipient_id).await?;

    GroupMemberRepo::add(&state.pool, auth.user_id, group_id, recipient_id).await?;
    tracing::debug!(%group_id, %recipient_id, "Recipient added to group");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/groups/{id}/recipients/{recipient_id}
///
/// A recipient that is not in the group is a 404 for `group member`.
pub async fn remove_recipient(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, recipient_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let group_id = ensure_group(&state, &auth, &id).await?;
    let recipient_id = ensure_recipient(&state, &auth, &recipient_id).await?;

    if !GroupMemberRepo::remove(&state.pool, auth.user_id, group_id, recipient_id).await? {
        return Err(AppError::Core(CoreError::not_found("group member", recipient_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a request body into stored fields, checking the template reference.
///
/// The foreign key alone would accept another tenant's template, so the
/// lookup is scoped to the caller.
async fn resolve_payload(
    state: &AppState,
    auth: &AuthUser,
    input: GroupPayload,
    active: bool,
) -> AppResult<GroupFields> {
    let template_id = match input.notification_template_id.as_deref() {
        None => None,
        Some(raw) => {
            let template_id = parse_reference(raw, "notification_template_id")?;
            TemplateRepo::find_by_id(&state.pool, auth.user_id, template_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::InvalidReference(format!(
                        "notification template {template_id} does not exist"
                    )))
                })?;
            Some(template_id)
        }
    };

    Ok(GroupFields {
        name: input.name,
        template_id,
        active,
    })
}

async fn find_group(state: &AppState, auth: &AuthUser, raw: &str) -> AppResult<RecipientGroup> {
    let id = parse_id(raw, GROUP)?;
    GroupRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(GROUP, id)))
}

async fn ensure_group(state: &AppState, auth: &AuthUser, raw: &str) -> AppResult<DbId> {
    Ok(find_group(state, auth, raw).await?.id)
}

async fn ensure_recipient(state: &AppState, auth: &AuthUser, raw: &str) -> AppResult<DbId> {
    let id = parse_id(raw, RECIPIENT)?;
    RecipientRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(RECIPIENT, id)))?;
    Ok(id)
}
