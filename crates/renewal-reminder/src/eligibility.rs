//! Runs a schedule's eligibility query against the database.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::mapping::{MappingRegistry, MembershipMapping, Phase};
use crate::query::{Params, ReminderQuery};
use crate::schedule::{load_schedule, ReminderSchedule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleEntity {
    pub entity_id: i32,
    pub contact_id: i32,
    pub trigger_date: Option<NaiveDate>,
}

/// Build the standard registry, resolving mapping metadata from `db`.
pub async fn boot_registry(db: &DatabaseConnection) -> Result<MappingRegistry> {
    let mut registry = MappingRegistry::new();
    registry.register(Box::new(MembershipMapping::load(db).await?))?;
    Ok(registry)
}

/// Execute a prepared reminder query and read out recipients.
pub async fn fetch_eligible(
    db: &DatabaseConnection,
    query: &ReminderQuery,
) -> Result<Vec<EligibleEntity>> {
    let stmt = query.build(db.get_database_backend())?;
    debug!(sql = %stmt, "running eligibility query");

    let rows = db.query_all(stmt).await?;
    let has_date = query.date_field().is_some();

    rows.iter()
        .map(|row| -> Result<EligibleEntity> {
            Ok(EligibleEntity {
                entity_id: row.try_get("", "entity_id")?,
                contact_id: row.try_get("", "contact_id")?,
                trigger_date: if has_date {
                    row.try_get("", "trigger_date")?
                } else {
                    None
                },
            })
        })
        .collect()
}

/// Resolve the schedule's mapping, build its query and run it.
pub async fn evaluate_schedule(
    db: &DatabaseConnection,
    registry: &MappingRegistry,
    schedule_id: i32,
    phase: &Phase,
    default_params: &Params,
) -> Result<Vec<EligibleEntity>> {
    let schedule = load_schedule(db, schedule_id).await?;
    evaluate(db, registry, &schedule, phase, default_params).await
}

pub async fn evaluate(
    db: &DatabaseConnection,
    registry: &MappingRegistry,
    schedule: &ReminderSchedule,
    phase: &Phase,
    default_params: &Params,
) -> Result<Vec<EligibleEntity>> {
    let mapping = registry.get(&schedule.mapping_id)?;
    let query = mapping.create_query(schedule, phase, default_params);
    let eligible = fetch_eligible(db, &query).await?;

    info!(
        schedule = ?schedule.id,
        mapping = %schedule.mapping_id,
        %phase,
        eligible = eligible.len(),
        "evaluated reminder schedule"
    );
    Ok(eligible)
}
