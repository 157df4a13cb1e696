//! Request extractors that guard handlers.
//!
//! - [`auth::AuthUser`] -- Resolves the calling tenant from a JWT Bearer token.

pub mod auth;
