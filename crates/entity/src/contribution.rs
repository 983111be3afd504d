use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contact_id: i32,

    pub total_amount: f64,

    pub receive_date: Option<Date>,

    pub contribution_status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::membership_payment::Entity")]
    MembershipPayment,
}

impl Related<super::membership_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipPayment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
