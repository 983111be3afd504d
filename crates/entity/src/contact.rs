use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A person, household or organization that can hold memberships.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub display_name: String,

    /// Individual / Household / Organization.
    pub contact_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
