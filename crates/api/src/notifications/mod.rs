//! Batch dispatch.
//!
//! The [`BatchDispatcher`] turns a batch into one notification per eligible
//! (recipient, group) pair and hands each to the channel sender.

pub mod dispatcher;

pub use dispatcher::{BatchDispatcher, DispatchOutcome};
