//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Recipients, templates and groups
//! share [`DraftLifecycle`](crate::lifecycle::DraftLifecycle) for their
//! draft/confirm and CRUD operations.

pub mod batch_repo;
pub mod dispatch_repo;
pub mod group_repo;
pub mod notification_repo;
pub mod session_repo;
pub mod telegram_contact_repo;
pub mod user_repo;

pub use batch_repo::BatchRepo;
pub use dispatch_repo::DispatchRepo;
pub use group_repo::{GroupMemberRepo, GroupRepo};
pub use notification_repo::NotificationRepo;
pub use session_repo::SessionRepo;
pub use telegram_contact_repo::TelegramContactRepo;
pub use user_repo::UserRepo;

use crate::lifecycle::DraftLifecycle;
use crate::models::recipient::RecipientFields;
use crate::models::template::TemplateFields;

pub type RecipientRepo = DraftLifecycle<RecipientFields>;
pub type TemplateRepo = DraftLifecycle<TemplateFields>;
