//! Two-phase draft/confirm creation shared by recipients, templates and groups.
//!
//! A payload is first staged in the entity's draft table under its own id.
//! Confirming the draft moves it into the permanent table under a freshly
//! allocated id. The move is a single statement (`DELETE ... RETURNING` feeding
//! an `INSERT ... SELECT`), so a draft can be confirmed at most once and the
//! draft row and its permanent row never exist together.
//!
//! Each entity supplies only its payload struct via [`EntityFields`]; every
//! query here is derived from the table names and column list it declares.

use std::marker::PhantomData;

use ens_core::types::{new_id, DbId};
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres, Row};

/// Payload columns of a draftable entity.
///
/// `COLUMNS` lists the payload column names in the order [`EntityFields::bind`]
/// binds them. `id` and `master_id` are implicit and must not be listed.
pub trait EntityFields:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Name used in not-found errors for the permanent entity.
    const ENTITY: &'static str;
    /// Name used in not-found errors for the draft.
    const DRAFT_ENTITY: &'static str;
    const TABLE: &'static str;
    const DRAFT_TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Bind every payload value onto `query`, in `COLUMNS` order.
    fn bind<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>;
}

/// A staged payload awaiting confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct Draft<F> {
    pub draft_id: DbId,
    pub master_id: DbId,
    #[serde(flatten)]
    pub fields: F,
}

/// A confirmed, permanent row.
#[derive(Debug, Clone, Serialize)]
pub struct Record<F> {
    pub id: DbId,
    pub master_id: DbId,
    #[serde(flatten)]
    pub fields: F,
}

impl<'r, F: FromRow<'r, PgRow>> FromRow<'r, PgRow> for Draft<F> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            draft_id: row.try_get("id")?,
            master_id: row.try_get("master_id")?,
            fields: F::from_row(row)?,
        })
    }
}

impl<'r, F: FromRow<'r, PgRow>> FromRow<'r, PgRow> for Record<F> {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            master_id: row.try_get("master_id")?,
            fields: F::from_row(row)?,
        })
    }
}

/// Tenant-scoped draft/confirm and CRUD operations for one entity type.
pub struct DraftLifecycle<F>(PhantomData<F>);

impl<F: EntityFields> DraftLifecycle<F> {
    /// Stage a new draft. The returned draft id is distinct from the id the
    /// entity will receive on confirmation.
    pub async fn create_draft(
        pool: &PgPool,
        master_id: DbId,
        fields: &F,
    ) -> Result<Draft<F>, sqlx::Error> {
        let columns = column_list::<F>();
        let sql = format!(
            "INSERT INTO {} (id, master_id, {columns}) \
             VALUES ($1, $2, {}) \
             RETURNING id, master_id, {columns}",
            F::DRAFT_TABLE,
            placeholders::<F>(3),
        );
        let query = sqlx::query_as::<_, Draft<F>>(&sql)
            .bind(new_id())
            .bind(master_id);
        fields.bind(query).fetch_one(pool).await
    }

    /// Promote a draft to a permanent row.
    ///
    /// Returns `None` when no draft with this id exists for the tenant, which
    /// includes a draft that was already confirmed. Nothing is written in
    /// that case.
    pub async fn confirm(
        pool: &PgPool,
        master_id: DbId,
        draft_id: DbId,
    ) -> Result<Option<Record<F>>, sqlx::Error> {
        let columns = column_list::<F>();
        let query = format!(
            "WITH claimed AS ( \
                 DELETE FROM {draft} WHERE master_id = $1 AND id = $2 \
                 RETURNING master_id, {columns} \
             ) \
             INSERT INTO {table} (id, master_id, {columns}) \
             SELECT $3, master_id, {columns} FROM claimed \
             RETURNING id, master_id, {columns}",
            draft = F::DRAFT_TABLE,
            table = F::TABLE,
        );
        let record = sqlx::query_as::<_, Record<F>>(&query)
            .bind(master_id)
            .bind(draft_id)
            .bind(new_id())
            .fetch_optional(pool)
            .await?;
        if let Some(ref r) = record {
            tracing::debug!(entity = F::ENTITY, %draft_id, id = %r.id, "Draft confirmed");
        }
        Ok(record)
    }

    /// Find a permanent row by id under the tenant.
    pub async fn find_by_id(
        pool: &PgPool,
        master_id: DbId,
        id: DbId,
    ) -> Result<Option<Record<F>>, sqlx::Error> {
        let query = format!(
            "SELECT id, master_id, {} FROM {} WHERE master_id = $1 AND id = $2",
            column_list::<F>(),
            F::TABLE,
        );
        sqlx::query_as::<_, Record<F>>(&query)
            .bind(master_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every permanent row of the tenant, oldest first.
    pub async fn list(pool: &PgPool, master_id: DbId) -> Result<Vec<Record<F>>, sqlx::Error> {
        let query = format!(
            "SELECT id, master_id, {} FROM {} WHERE master_id = $1 ORDER BY id",
            column_list::<F>(),
            F::TABLE,
        );
        sqlx::query_as::<_, Record<F>>(&query)
            .bind(master_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every payload column of an existing row.
    pub async fn update(
        pool: &PgPool,
        master_id: DbId,
        id: DbId,
        fields: &F,
    ) -> Result<Option<Record<F>>, sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET {} WHERE master_id = $1 AND id = $2 \
             RETURNING id, master_id, {}",
            F::TABLE,
            assignments::<F>(3),
            column_list::<F>(),
        );
        let query = sqlx::query_as::<_, Record<F>>(&sql)
            .bind(master_id)
            .bind(id);
        fields.bind(query).fetch_optional(pool).await
    }

    /// Hard-delete a row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, master_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE master_id = $1 AND id = $2", F::TABLE);
        let result = sqlx::query(&query)
            .bind(master_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn column_list<F: EntityFields>() -> String {
    F::COLUMNS.join(", ")
}

/// `$first, $first+1, ...` for every payload column.
fn placeholders<F: EntityFields>(first: usize) -> String {
    (0..F::COLUMNS.len())
        .map(|i| format!("${}", first + i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `col_a = $first, col_b = $first+1, ...` for every payload column.
fn assignments<F: EntityFields>(first: usize) -> String {
    F::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", first + i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipient::RecipientFields;
    use crate::models::template::TemplateFields;

    #[test]
    fn placeholders_follow_column_order() {
        assert_eq!(placeholders::<RecipientFields>(3), "$3, $4, $5, $6");
        assert_eq!(placeholders::<TemplateFields>(3), "$3, $4");
    }

    #[test]
    fn assignments_name_every_column() {
        assert_eq!(
            assignments::<TemplateFields>(3),
            "name = $3, message_text = $4"
        );
    }
}
