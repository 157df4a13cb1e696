//! Route definitions for the `/recipients` resource.

use axum::routing::{get, post};
use axum::Router;
use ens_db::models::recipient::RecipientFields;

use crate::handlers::{lifecycle, recipient};
use crate::state::AppState;

/// Routes mounted at `/recipients`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create (draft)
/// POST   /drafts/{draft_id}/confirm   -> confirm
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lifecycle::list::<RecipientFields>).post(recipient::create),
        )
        .route(
            "/drafts/{draft_id}/confirm",
            post(lifecycle::confirm::<RecipientFields>),
        )
        .route(
            "/{id}",
            get(lifecycle::get_by_id::<RecipientFields>)
                .put(recipient::update)
                .delete(lifecycle::delete::<RecipientFields>),
        )
}
