//! Lookups the membership mapping needs from the surrounding CRM.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use entity::{membership_status, membership_type};

use crate::error::Result;

/// Name of the status that keeps lapsed members eligible for renewal reminders.
pub const EXPIRED_STATUS: &str = "Expired";

#[async_trait]
pub trait MembershipMetadata: Send + Sync {
    /// Ids of active statuses that count as current, plus the `Expired` status.
    async fn current_or_expired_status_ids(&self) -> Result<Vec<i32>>;

    /// Membership types offered as schedule values, as (id, name).
    async fn membership_types(&self) -> Result<Vec<(i32, String)>>;
}

#[async_trait]
impl MembershipMetadata for DatabaseConnection {
    async fn current_or_expired_status_ids(&self) -> Result<Vec<i32>> {
        let ids: Vec<i32> = membership_status::Entity::find()
            .filter(membership_status::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(membership_status::Column::IsCurrentMember.eq(true))
                    .add(membership_status::Column::Name.eq(EXPIRED_STATUS)),
            )
            .order_by_asc(membership_status::Column::Weight)
            .all(self)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        debug!(?ids, "resolved current/expired membership statuses");
        Ok(ids)
    }

    async fn membership_types(&self) -> Result<Vec<(i32, String)>> {
        let types = membership_type::Entity::find()
            .filter(membership_type::Column::IsActive.eq(true))
            .order_by_asc(membership_type::Column::Id)
            .all(self)
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        Ok(types)
    }
}
