//! Emergency notification service API library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! batch dispatch engine) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod router;
pub mod routes;
pub mod state;
