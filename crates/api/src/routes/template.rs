//! Route definitions for the `/templates` resource.

use axum::routing::{get, post};
use axum::Router;
use ens_db::models::template::TemplateFields;

use crate::handlers::{lifecycle, template};
use crate::state::AppState;

/// Routes mounted at `/templates`.
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
            get(lifecycle::list::<TemplateFields>).post(template::create),
        )
        .route(
            "/drafts/{draft_id}/confirm",
            post(lifecycle::confirm::<TemplateFields>),
        )
        .route(
            "/{id}",
            get(lifecycle::get_by_id::<TemplateFields>)
                .put(template::update)
                .delete(lifecycle::delete::<TemplateFields>),
        )
}
