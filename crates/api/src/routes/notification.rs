//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                          -> list
/// GET    /pending                   -> list_pending
/// POST   /batches                   -> create_batch
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list))
        .route("/pending", get(notification::list_pending))
        .route("/batches", post(notification::create_batch))
        .route(
            "/{id}",
            get(notification::get_by_id).delete(notification::cancel),
        )
}
