mod common;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set};

use common::*;
use entity::job::{self, RunFrequency};
use entity::{contribution, membership, membership_payment};
use renewal_reminder::db::{connect, DatabaseSettings};
use renewal_reminder::jobs::{install_jobs, DEFAULT_JOBS};
use renewal_reminder::migrate::migrate;

async fn add_contribution(db: &sea_orm::DatabaseConnection, contact_id: i32) -> i32 {
    contribution::ActiveModel {
        contact_id: Set(contact_id),
        total_amount: Set(50.0),
        receive_date: Set(None),
        contribution_status_id: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert contribution")
    .id
}

#[tokio::test]
async fn migrations_apply_stepwise() {
    let db = connect(&DatabaseSettings::in_memory_sqlite()).await.unwrap();

    let first = migrate(&db, Some(1)).await.unwrap();
    assert_eq!(first.applied_now, 1);
    assert!(!first.done);
    assert!(first.next.is_some());

    let rest = migrate(&db, None).await.unwrap();
    assert!(rest.done);
    assert_eq!(rest.pending, 0);
    assert_eq!(rest.next, None);

    let again = migrate(&db, None).await.unwrap();
    assert_eq!(again.applied_now, 0);
}

#[tokio::test]
async fn payment_link_pair_is_unique() {
    let db = setup_db().await;
    let t = add_membership_type(&db, "General").await;
    let contact = add_contact(&db, "Alice").await;
    let m = add_membership(&db, NewMembership::new(contact, t)).await;
    let c = add_contribution(&db, contact).await;

    let link = membership_payment::ActiveModel {
        membership_id: Set(m),
        contribution_id: Set(Some(c)),
        ..Default::default()
    };
    link.clone().insert(&db).await.expect("first link");
    assert!(link.insert(&db).await.is_err(), "duplicate pair must be rejected");

    // A link without a contribution is allowed.
    membership_payment::ActiveModel {
        membership_id: Set(m),
        contribution_id: Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("link without contribution");
}

#[tokio::test]
async fn payment_links_follow_their_membership_and_contribution() {
    let db = setup_db().await;
    let t = add_membership_type(&db, "General").await;
    let contact = add_contact(&db, "Alice").await;
    let m1 = add_membership(&db, NewMembership::new(contact, t)).await;
    let m2 = add_membership(&db, NewMembership::new(contact, t)).await;
    let c = add_contribution(&db, contact).await;

    for m in [m1, m2] {
        membership_payment::ActiveModel {
            membership_id: Set(m),
            contribution_id: Set(Some(c)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    let contribution = contribution::Entity::find_by_id(c).one(&db).await.unwrap().unwrap();
    let links = contribution
        .find_related(membership_payment::Entity)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(links.len(), 2);

    membership::Entity::delete_by_id(m1).exec(&db).await.unwrap();
    let remaining = membership_payment::Entity::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].membership_id, m2);

    contribution.delete(&db).await.unwrap();
    assert_eq!(membership_payment::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn install_jobs_is_idempotent_per_domain() {
    let db = setup_db().await;

    let first = install_jobs(&db, 1).await.unwrap();
    assert_eq!(first.inserted, DEFAULT_JOBS.len());
    assert_eq!(first.skipped, 0);

    let second = install_jobs(&db, 1).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, DEFAULT_JOBS.len());

    let other_domain = install_jobs(&db, 2).await.unwrap();
    assert_eq!(other_domain.inserted, DEFAULT_JOBS.len());

    let reminder = job::Entity::find()
        .filter(job::Column::DomainId.eq(2))
        .filter(job::Column::ApiAction.eq("send_reminder"))
        .one(&db)
        .await
        .unwrap()
        .expect("send_reminder job");
    assert_eq!(reminder.run_frequency, RunFrequency::Always);
    assert_eq!(reminder.api_entity, "job");
    assert!(!reminder.is_active);
}

#[tokio::test]
async fn install_keeps_administrator_edits() {
    let db = setup_db().await;
    install_jobs(&db, 1).await.unwrap();

    let mut cleanup: job::ActiveModel = job::Entity::find()
        .filter(job::Column::ApiAction.eq("cleanup"))
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .into();
    cleanup.is_active = Set(true);
    cleanup.parameters = Set(Some("session=1".to_string()));
    cleanup.update(&db).await.unwrap();

    install_jobs(&db, 1).await.unwrap();

    let cleanup = job::Entity::find()
        .filter(job::Column::ApiAction.eq("cleanup"))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(cleanup.len(), 1);
    assert!(cleanup[0].is_active);
    assert_eq!(cleanup[0].parameters.as_deref(), Some("session=1"));
}
