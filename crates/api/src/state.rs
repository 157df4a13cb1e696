use std::sync::Arc;

use ens_delivery::ChannelSender;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ens_db::DbPool,
    /// Server configuration (JWT secrets are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Channel notifications are delivered through.
    pub sender: Arc<dyn ChannelSender>,
}
