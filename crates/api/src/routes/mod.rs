pub mod auth;
pub mod group;
pub mod health;
pub mod notification;
pub mod recipient;
pub mod template;
pub mod user;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
///
/// /users/me                                        modify, delete
///
/// /recipients                                      list, create draft
/// /recipients/drafts/{draft_id}/confirm            confirm draft (POST)
/// /recipients/{id}                                 get, modify, delete
///
/// /templates                                       list, create draft
/// /templates/drafts/{draft_id}/confirm             confirm draft (POST)
/// /templates/{id}                                  get, modify, delete
///
/// /groups                                          list, create draft
/// /groups/active                                   list active (GET)
/// /groups/drafts/{draft_id}/confirm                confirm draft (POST)
/// /groups/{id}                                     get, modify, delete
/// /groups/{id}/recipients                          list members (GET)
/// /groups/{id}/recipients/{recipient_id}           add, remove member (PUT, DELETE)
///
/// /notifications                                   list (GET)
/// /notifications/pending                           list pending (GET)
/// /notifications/batches                           create batch (POST)
/// /notifications/{id}                              get, cancel (GET, DELETE)
/// ```
///
/// Batch sending is mounted separately by [`fan_out_routes`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh).
        .nest("/auth", auth::router())
        // The caller's own account.
        .nest("/users", user::router())
        // Draftable entities.
        .nest("/recipients", recipient::router())
        .nest("/templates", template::router())
        .nest("/groups", group::router())
        // Batches and fanned-out notifications.
        .nest("/notifications", notification::router())
}

/// Routes exempt from the request timeout.
///
/// ```text
/// POST /api/v1/notifications/batches/{batch_id}/send   send batch (?detailed=true)
/// ```
pub fn fan_out_routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/notifications/batches/{batch_id}/send",
        post(handlers::notification::send_batch),
    )
}
