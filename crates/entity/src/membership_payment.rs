use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a contribution (payment) to the membership it paid for.
///
/// The pair (`contribution_id`, `membership_id`) is unique; see
/// [`UNIQUE_INDEX`]. Rows cascade away with either side.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "membership_payment_link")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub membership_id: i32,

    pub contribution_id: Option<i32>,
}

/// Name of the unique index over (`contribution_id`, `membership_id`).
pub const UNIQUE_INDEX: &str = "ui_contribution_membership";

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::membership::Entity",
        from = "Column::MembershipId",
        to = "super::membership::Column::Id",
        on_delete = "Cascade"
    )]
    Membership,

    #[sea_orm(
        belongs_to = "super::contribution::Entity",
        from = "Column::ContributionId",
        to = "super::contribution::Column::Id",
        on_delete = "Cascade"
    )]
    Contribution,
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contribution.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
