use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Administrator-authored reminder schedule.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "action_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub title: String,

    /// Id of the mapping this schedule targets (e.g. `civicrm_membership`).
    pub mapping_id: String,

    /// `\x01`-padded list of entity values (membership type ids).
    pub entity_value: Option<String>,

    /// `\x01`-padded list of entity statuses (auto-renew options).
    pub entity_status: Option<String>,

    /// Symbolic trigger date field, e.g. `membership_end_date`.
    pub start_action_date: Option<String>,

    /// Fixed trigger date; when set, reminders are not relative to an entity date.
    pub absolute_date: Option<Date>,

    pub is_repeat: bool,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
