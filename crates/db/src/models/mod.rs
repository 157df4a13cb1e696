//! Domain model structs and DTOs.
//!
//! Draftable entities (recipients, templates, groups) define only their
//! payload columns here; the `id`/`master_id` envelope comes from
//! [`crate::lifecycle::Record`] and [`crate::lifecycle::Draft`].

pub mod dispatch;
pub mod group;
pub mod notification;
pub mod recipient;
pub mod session;
pub mod telegram_contact;
pub mod template;
pub mod user;
