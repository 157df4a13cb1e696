//! Notification template payload and its draft/permanent envelopes.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use validator::Validate;

use crate::lifecycle::{Draft, EntityFields, Record};

/// Template payload. A template without `message_text` is valid but never
/// produces notifications.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct TemplateFields {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub message_text: Option<String>,
}

pub type NotificationTemplate = Record<TemplateFields>;
pub type TemplateDraft = Draft<TemplateFields>;

impl EntityFields for TemplateFields {
    const ENTITY: &'static str = "notification template";
    const DRAFT_ENTITY: &'static str = "notification template draft";
    const TABLE: &'static str = "notification_templates";
    const DRAFT_TABLE: &'static str = "notification_template_drafts";
    const COLUMNS: &'static [&'static str] = &["name", "message_text"];

    fn bind<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        query.bind(&self.name).bind(&self.message_text)
    }
}
