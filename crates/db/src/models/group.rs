//! Recipient group payload, its envelopes, and the request body it is built from.

use ens_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use validator::Validate;

use crate::lifecycle::{Draft, EntityFields, Record};

/// Stored group payload.
///
/// Only active groups with a template take part in dispatch.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct GroupFields {
    pub name: String,
    #[serde(rename = "notification_template_id")]
    pub template_id: Option<DbId>,
    pub active: bool,
}

pub type RecipientGroup = Record<GroupFields>;
pub type GroupDraft = Draft<GroupFields>;

impl EntityFields for GroupFields {
    const ENTITY: &'static str = "recipient group";
    const DRAFT_ENTITY: &'static str = "recipient group draft";
    const TABLE: &'static str = "recipient_groups";
    const DRAFT_TABLE: &'static str = "recipient_group_drafts";
    const COLUMNS: &'static [&'static str] = &["name", "template_id", "active"];

    fn bind<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        query
            .bind(&self.name)
            .bind(self.template_id)
            .bind(self.active)
    }
}

/// Create/modify request body for a group.
///
/// The template reference arrives as a raw string so that a value which is
/// not an id at all can be told apart from one that names no template.
/// An absent `active` means active on create and unchanged on modify.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GroupPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub notification_template_id: Option<String>,
    pub active: Option<bool>,
}
