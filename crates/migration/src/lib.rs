pub use sea_orm_migration::prelude::*;

mod m20261019_000001_contacts_and_memberships;
mod m20261019_000002_membership_payments;
mod m20261019_000003_jobs;
mod m20261019_000004_action_schedules;
mod m20261019_000005_seed_membership_statuses;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_contacts_and_memberships::Migration),
            Box::new(m20261019_000002_membership_payments::Migration),
            Box::new(m20261019_000003_jobs::Migration),
            Box::new(m20261019_000004_action_schedules::Migration),
            Box::new(m20261019_000005_seed_membership_statuses::Migration),
        ]
    }
}
