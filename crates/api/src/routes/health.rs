//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use ens_core::channels::ChannelType;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub database_reachable: bool,
    /// Channel batches are delivered through.
    pub delivery_channel: ChannelType,
    /// Whether this instance runs the Telegram opt-in bot.
    pub opt_in_bot: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let database_reachable = ens_db::health_check(&state.pool).await.is_ok();
    if !database_reachable {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthReport {
        status: if database_reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database_reachable,
        delivery_channel: state.sender.channel(),
        opt_in_bot: state.config.telegram.polling_enabled,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
