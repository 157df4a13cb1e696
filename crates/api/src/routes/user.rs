use axum::routing::put;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT    /me  -> modify_me
/// DELETE /me  -> delete_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", put(user::modify_me).delete(user::delete_me))
}
