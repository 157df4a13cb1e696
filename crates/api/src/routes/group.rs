//! Route definitions for the `/groups` resource.

use axum::routing::{get, post, put};
use axum::Router;
use ens_db::models::group::GroupFields;

use crate::handlers::{group, lifecycle};
use crate::state::AppState;

/// Routes mounted at `/groups`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create (draft)
/// GET    /active                         -> list_active
/// POST   /drafts/{draft_id}/confirm      -> confirm
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> delete
/// GET    /{id}/recipients                -> list_recipients
/// PUT    /{id}/recipients/{recipient_id} -> add_recipient
/// DELETE /{id}/recipients/{recipient_id} -> remove_recipient
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lifecycle::list::<GroupFields>).post(group::create))
        .route("/active", get(group::list_active))
        .route(
            "/drafts/{draft_id}/confirm",
            post(lifecycle::confirm::<GroupFields>),
        )
        .route(
            "/{id}",
            get(lifecycle::get_by_id::<GroupFields>)
                .put(group::update)
                .delete(lifecycle::delete::<GroupFields>),
        )
        .route("/{id}/recipients", get(group::list_recipients))
        .route(
            "/{id}/recipients/{recipient_id}",
            put(group::add_recipient).delete(group::remove_recipient),
        )
}
