use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership status rule (New, Current, Grace, Expired, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "membership_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Machine name; `Expired` is matched by name.
    #[sea_orm(unique)]
    pub name: String,

    pub label: String,

    /// Whether members in this status count as current members.
    pub is_current_member: bool,

    pub is_active: bool,

    pub weight: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
