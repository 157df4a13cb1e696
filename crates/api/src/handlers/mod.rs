//! Request handlers.
//!
//! Recipients, templates and groups share the generic draft/confirm and CRUD
//! handlers in [`lifecycle`]; their own modules only add create and modify,
//! plus group membership. Every handler except registration, login and token
//! refresh requires an [`AuthUser`](crate::middleware::auth::AuthUser).

pub mod auth;
pub mod group;
pub mod lifecycle;
pub mod notification;
pub mod recipient;
pub mod template;
pub mod user;
