#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use entity::{action_schedule, contact, membership, membership_type, relationship};
use renewal_reminder::db::{connect, DatabaseSettings};
use renewal_reminder::migrate::migrate;
use renewal_reminder::value_list::implode_padded;

pub const NEW: i32 = 1;
pub const CURRENT: i32 = 2;
pub const GRACE: i32 = 3;
pub const EXPIRED: i32 = 4;
pub const PENDING: i32 = 5;

pub async fn setup_db() -> DatabaseConnection {
    let db = connect(&DatabaseSettings::in_memory_sqlite())
        .await
        .expect("connect sqlite");
    let report = migrate(&db, None).await.expect("migrate");
    assert!(report.done);
    db
}

pub async fn add_contact(db: &DatabaseConnection, name: &str) -> i32 {
    contact::ActiveModel {
        display_name: Set(name.to_string()),
        contact_type: Set("Individual".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert contact")
    .id
}

pub async fn add_membership_type(db: &DatabaseConnection, name: &str) -> i32 {
    membership_type::ActiveModel {
        name: Set(name.to_string()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert membership type")
    .id
}

/// Builder-ish description of a membership row.
#[derive(Clone)]
pub struct NewMembership {
    pub contact_id: i32,
    pub membership_type_id: i32,
    pub status_id: i32,
    pub contribution_recur_id: Option<i32>,
    pub is_override: Option<bool>,
    pub owner_membership_id: Option<i32>,
}

impl NewMembership {
    pub fn new(contact_id: i32, membership_type_id: i32) -> Self {
        Self {
            contact_id,
            membership_type_id,
            status_id: CURRENT,
            contribution_recur_id: None,
            is_override: None,
            owner_membership_id: None,
        }
    }
}

pub async fn add_membership(db: &DatabaseConnection, m: NewMembership) -> i32 {
    membership::ActiveModel {
        contact_id: Set(m.contact_id),
        membership_type_id: Set(m.membership_type_id),
        status_id: Set(m.status_id),
        join_date: Set(NaiveDate::from_ymd_opt(2024, 1, 15)),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1)),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 12, 31)),
        contribution_recur_id: Set(m.contribution_recur_id),
        is_override: Set(m.is_override),
        owner_membership_id: Set(m.owner_membership_id),
        source: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert membership")
    .id
}

pub async fn add_relationship(
    db: &DatabaseConnection,
    contact_id_a: i32,
    contact_id_b: i32,
    is_permission_a_b: i32,
    is_permission_b_a: i32,
) -> i32 {
    relationship::ActiveModel {
        contact_id_a: Set(contact_id_a),
        contact_id_b: Set(contact_id_b),
        relationship_type_id: Set(7),
        is_active: Set(true),
        is_permission_a_b: Set(is_permission_a_b),
        is_permission_b_a: Set(is_permission_b_a),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert relationship")
    .id
}

pub async fn add_schedule(
    db: &DatabaseConnection,
    name: &str,
    mapping_id: &str,
    values: &[i32],
    statuses: &[i32],
) -> i32 {
    action_schedule::ActiveModel {
        name: Set(name.to_string()),
        title: Set(name.to_string()),
        mapping_id: Set(mapping_id.to_string()),
        entity_value: Set(implode_padded(values)),
        entity_status: Set(implode_padded(statuses)),
        start_action_date: Set(Some("membership_end_date".to_string())),
        absolute_date: Set(None),
        is_repeat: Set(false),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert schedule")
    .id
}
