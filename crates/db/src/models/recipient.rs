//! Recipient payload and its draft/permanent envelopes.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use validator::Validate;

use crate::lifecycle::{Draft, EntityFields, Record};

/// Contact details of a recipient. Also the create/modify request body.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct RecipientFields {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Telegram chat id notifications are delivered to.
    pub telegram_id: Option<i64>,
}

pub type Recipient = Record<RecipientFields>;
pub type RecipientDraft = Draft<RecipientFields>;

impl EntityFields for RecipientFields {
    const ENTITY: &'static str = "recipient";
    const DRAFT_ENTITY: &'static str = "recipient draft";
    const TABLE: &'static str = "recipients";
    const DRAFT_TABLE: &'static str = "recipient_drafts";
    const COLUMNS: &'static [&'static str] = &["name", "email", "phone_number", "telegram_id"];

    fn bind<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        query
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.phone_number)
            .bind(self.telegram_id)
    }
}
