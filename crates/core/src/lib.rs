//! Domain primitives shared by every crate in the workspace.
//!
//! Nothing in here performs I/O: the error taxonomy, identifier helpers and
//! the channel type table are pure values consumed by the database layer,
//! the delivery layer and the HTTP server.

pub mod channels;
pub mod error;
pub mod types;
