use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A contact's membership of a given type.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contact_id: i32,

    pub membership_type_id: i32,

    pub status_id: i32,

    /// "Member since".
    pub join_date: Option<Date>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,

    /// Set when the membership auto-renews through a recurring contribution.
    pub contribution_recur_id: Option<i32>,

    /// Status was pinned by an administrator; status rules do not apply.
    pub is_override: Option<bool>,

    /// Set when this membership is inherited from another contact's membership.
    pub owner_membership_id: Option<i32>,

    pub source: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
