//! Integration tests for the shared draft/confirm lifecycle.
//!
//! Exercises recipients, templates and groups against a real database:
//! - Draft creation echoes the payload under a draft id
//! - Confirmation moves the draft and allocates a new id
//! - A second confirmation of the same draft finds nothing
//! - Every operation is scoped to the owning tenant

use assert_matches::assert_matches;
use ens_core::types::{new_id, DbId};
use ens_db::models::group::GroupFields;
use ens_db::models::recipient::RecipientFields;
use ens_db::models::template::TemplateFields;
use ens_db::models::user::CreateUser;
use ens_db::repositories::{GroupMemberRepo, GroupRepo, RecipientRepo, TemplateRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_master(pool: &PgPool, name: &str) -> DbId {
    let input = CreateUser {
        name: name.to_string(),
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn recipient(name: &str) -> RecipientFields {
    RecipientFields {
        name: name.to_string(),
        email: Some(format!("{name}@example.com")),
        phone_number: None,
        telegram_id: Some(1001),
    }
}

async fn draft_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Draft / confirm
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_draft_echoes_payload(pool: PgPool) {
    let master = create_master(&pool, "alice").await;

    let draft = RecipientRepo::create_draft(&pool, master, &recipient("bob"))
        .await
        .unwrap();

    assert_eq!(draft.master_id, master);
    assert_eq!(draft.fields, recipient("bob"));
    assert_eq!(draft_count(&pool, "recipient_drafts").await, 1);
    assert_eq!(draft_count(&pool, "recipients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirm_moves_draft_under_new_id(pool: PgPool) {
    let master = create_master(&pool, "alice").await;
    let draft = RecipientRepo::create_draft(&pool, master, &recipient("bob"))
        .await
        .unwrap();

    let confirmed = RecipientRepo::confirm(&pool, master, draft.draft_id)
        .await
        .unwrap()
        .expect("draft should be confirmed");

    assert_ne!(confirmed.id, draft.draft_id);
    assert_eq!(confirmed.master_id, master);
    assert_eq!(confirmed.fields, draft.fields);
    assert_eq!(draft_count(&pool, "recipient_drafts").await, 0);

    let found = RecipientRepo::find_by_id(&pool, master, confirmed.id)
        .await
        .unwrap();
    assert_matches!(found, Some(r) if r.fields.name == "bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_confirm_finds_nothing(pool: PgPool) {
    let master = create_master(&pool, "alice").await;
    let draft = TemplateRepo::create_draft(
        &pool,
        master,
        &TemplateFields {
            name: "alert".to_string(),
            message_text: Some("hi".to_string()),
        },
    )
    .await
    .unwrap();

    let first = TemplateRepo::confirm(&pool, master, draft.draft_id).await.unwrap();
    assert!(first.is_some());

    let second = TemplateRepo::confirm(&pool, master, draft.draft_id).await.unwrap();
    assert!(second.is_none(), "a draft can only be confirmed once");

    let all = TemplateRepo::list(&pool, master).await.unwrap();
    assert_eq!(all.len(), 1, "no second template may be created");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_confirms_create_one_entity(pool: PgPool) {
    let master = create_master(&pool, "alice").await;
    let draft = RecipientRepo::create_draft(&pool, master, &recipient("bob"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        RecipientRepo::confirm(&pool, master, draft.draft_id),
        RecipientRepo::confirm(&pool, master, draft.draft_id),
    );

    let confirmed = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter(Option::is_some)
        .count();
    assert_eq!(confirmed, 1);
    assert_eq!(RecipientRepo::list(&pool, master).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirm_unknown_draft_writes_nothing(pool: PgPool) {
    let master = create_master(&pool, "alice").await;

    let result = RecipientRepo::confirm(&pool, master, new_id()).await.unwrap();

    assert!(result.is_none());
    assert_eq!(draft_count(&pool, "recipients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_confirm_other_tenants_draft_fails(pool: PgPool) {
    let alice = create_master(&pool, "alice").await;
    let mallory = create_master(&pool, "mallory").await;
    let draft = RecipientRepo::create_draft(&pool, alice, &recipient("bob"))
        .await
        .unwrap();

    let stolen = RecipientRepo::confirm(&pool, mallory, draft.draft_id)
        .await
        .unwrap();
    assert!(stolen.is_none());

    // The draft is untouched and alice can still confirm it.
    let confirmed = RecipientRepo::confirm(&pool, alice, draft.draft_id)
        .await
        .unwrap();
    assert!(confirmed.is_some());
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_are_tenant_scoped(pool: PgPool) {
    let alice = create_master(&pool, "alice").await;
    let mallory = create_master(&pool, "mallory").await;
    let draft = RecipientRepo::create_draft(&pool, alice, &recipient("bob"))
        .await
        .unwrap();
    let bob = RecipientRepo::confirm(&pool, alice, draft.draft_id)
        .await
        .unwrap()
        .unwrap();

    let hijack = RecipientRepo::update(&pool, mallory, bob.id, &recipient("eve"))
        .await
        .unwrap();
    assert!(hijack.is_none());
    assert!(!RecipientRepo::delete(&pool, mallory, bob.id).await.unwrap());

    let updated = RecipientRepo::update(&pool, alice, bob.id, &recipient("robert"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fields.name, "robert");

    assert!(RecipientRepo::delete(&pool, alice, bob.id).await.unwrap());
    assert!(RecipientRepo::find_by_id(&pool, alice, bob.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_draft_with_unknown_template_is_fk_violation(pool: PgPool) {
    let master = create_master(&pool, "alice").await;

    let err = GroupRepo::create_draft(
        &pool,
        master,
        &GroupFields {
            name: "ops".to_string(),
            template_id: Some(new_id()),
            active: true,
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_active_groups(pool: PgPool) {
    let master = create_master(&pool, "alice").await;
    for (name, active) in [("on", true), ("off", false)] {
        let draft = GroupRepo::create_draft(
            &pool,
            master,
            &GroupFields {
                name: name.to_string(),
                template_id: None,
                active,
            },
        )
        .await
        .unwrap();
        GroupRepo::confirm(&pool, master, draft.draft_id)
            .await
            .unwrap()
            .unwrap();
    }

    let active = GroupRepo::list_active(&pool, master).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].fields.name, "on");
    assert_eq!(GroupRepo::list(&pool, master).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_membership(pool: PgPool) {
    let master = create_master(&pool, "alice").await;
    let group_draft = GroupRepo::create_draft(
        &pool,
        master,
        &GroupFields {
            name: "ops".to_string(),
            template_id: None,
            active: true,
        },
    )
    .await
    .unwrap();
    let group = GroupRepo::confirm(&pool, master, group_draft.draft_id)
        .await
        .unwrap()
        .unwrap();
    let recipient_draft = RecipientRepo::create_draft(&pool, master, &recipient("bob"))
        .await
        .unwrap();
    let bob = RecipientRepo::confirm(&pool, master, recipient_draft.draft_id)
        .await
        .unwrap()
        .unwrap();

    assert!(GroupMemberRepo::list_recipients(&pool, master, group.id)
        .await
        .unwrap()
        .is_empty());

    GroupMemberRepo::add(&pool, master, group.id, bob.id).await.unwrap();
    let err = GroupMemberRepo::add(&pool, master, group.id, bob.id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_recipient_group_members")
    );

    let members = GroupMemberRepo::list_recipients(&pool, master, group.id)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, bob.id);

    assert!(GroupMemberRepo::remove(&pool, master, group.id, bob.id).await.unwrap());
    assert!(!GroupMemberRepo::remove(&pool, master, group.id, bob.id).await.unwrap());
}
