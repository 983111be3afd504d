use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scheduled background job registered for a domain.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub domain_id: i32,

    pub name: String,
    pub description: Option<String>,

    pub run_frequency: RunFrequency,

    pub api_entity: String,
    pub api_action: String,

    /// Free-form `key=value` lines handed to the action.
    pub parameters: Option<String>,

    pub is_active: bool,

    pub last_run: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RunFrequency {
    #[sea_orm(string_value = "Always")]
    Always,
    #[sea_orm(string_value = "Hourly")]
    Hourly,
    #[sea_orm(string_value = "Daily")]
    Daily,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
