//! Read side of batch dispatch: who a tenant's batch would reach right now.

use ens_core::types::DbId;
use sqlx::PgPool;

use crate::models::dispatch::DispatchTarget;

/// Resolves dispatch targets across groups, templates, membership and
/// Telegram opt-in state.
pub struct DispatchRepo;

impl DispatchRepo {
    /// Every (group, recipient) pair of the tenant's active groups that have
    /// a template.
    ///
    /// Inactive groups, groups without a template, and groups without
    /// members produce no rows. Opt-in state is left-joined, so recipients
    /// without a Telegram contact still appear with `opted_in = None`.
    pub async fn resolve_targets(
        pool: &PgPool,
        master_id: DbId,
    ) -> Result<Vec<DispatchTarget>, sqlx::Error> {
        sqlx::query_as::<_, DispatchTarget>(
            "SELECT g.id AS group_id, \
                    r.id AS recipient_id, \
                    r.telegram_id, \
                    t.message_text, \
                    c.active AS opted_in \
             FROM recipient_groups g \
             JOIN notification_templates t \
               ON t.id = g.template_id AND t.master_id = g.master_id \
             JOIN recipient_group_members m ON m.recipient_group_id = g.id \
             JOIN recipients r ON r.id = m.recipient_id \
             LEFT JOIN telegram_contacts c ON c.user_id = r.telegram_id \
             WHERE g.master_id = $1 AND g.active = true \
             ORDER BY g.id, r.id",
        )
        .bind(master_id)
        .fetch_all(pool)
        .await
    }
}
