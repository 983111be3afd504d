use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed contact-to-contact relationship (A -> B).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contact_id_a: i32,
    pub contact_id_b: i32,

    pub relationship_type_id: i32,

    pub is_active: bool,

    /// Permission contact A holds over contact B (see [`Permission`]).
    pub is_permission_a_b: i32,

    /// Permission contact B holds over contact A (see [`Permission`]).
    pub is_permission_b_a: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Values stored in the `is_permission_*` columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Permission {
    None = 0,
    Edit = 1,
    View = 2,
}

impl Permission {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
