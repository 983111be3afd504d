//! Reminder schedules as seen by action mappings.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

use entity::action_schedule;

use crate::error::{ReminderError, Result};
use crate::value_list::explode_padded;

/// Read-only view of an administrator-authored schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSchedule {
    pub id: Option<i32>,
    pub mapping_id: String,
    /// Selected entity values; for memberships, membership type ids.
    pub entity_value: Vec<String>,
    /// Selected entity statuses; for memberships, auto-renew options.
    pub entity_status: Vec<String>,
    /// Prefixed symbolic trigger date field, e.g. `membership_end_date`.
    pub start_action_date: Option<String>,
    pub absolute_date: Option<NaiveDate>,
    pub is_repeat: bool,
}

impl From<action_schedule::Model> for ReminderSchedule {
    fn from(model: action_schedule::Model) -> Self {
        Self {
            id: Some(model.id),
            mapping_id: model.mapping_id,
            entity_value: explode_padded(model.entity_value.as_deref()),
            entity_status: explode_padded(model.entity_status.as_deref()),
            start_action_date: model.start_action_date.filter(|s| !s.trim().is_empty()),
            absolute_date: model.absolute_date,
            is_repeat: model.is_repeat,
        }
    }
}

pub async fn load_schedule(db: &DatabaseConnection, id: i32) -> Result<ReminderSchedule> {
    action_schedule::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(ReminderSchedule::from)
        .ok_or(ReminderError::ScheduleNotFound(id))
}
