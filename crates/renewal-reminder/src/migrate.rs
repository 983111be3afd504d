use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Step limit requested by the caller; `None` means "all pending".
    pub requested_steps: Option<u32>,
    pub applied_now: usize,
    pub pending: usize,
    pub done: bool,
    pub next: Option<String>,
}

/// Apply up to `steps` pending migrations, or all of them when `steps` is `None`.
pub async fn migrate(db: &DatabaseConnection, steps: Option<u32>) -> Result<MigrationReport> {
    let pending_before = Migrator::get_pending_migrations(db).await?;
    let steps_to_apply = match steps {
        Some(n) => n.min(pending_before.len().try_into().unwrap_or(u32::MAX)),
        None => pending_before.len().try_into().unwrap_or(u32::MAX),
    };

    if steps_to_apply > 0 {
        info!(steps = steps_to_apply, pending = pending_before.len(), "applying migrations");
        Migrator::up(db, Some(steps_to_apply)).await?;
    }

    let pending_after = Migrator::get_pending_migrations(db).await?;

    Ok(MigrationReport {
        requested_steps: steps,
        applied_now: pending_before.len().saturating_sub(pending_after.len()),
        pending: pending_after.len(),
        done: pending_after.is_empty(),
        next: pending_after.first().map(|m| m.name().to_string()),
    })
}
