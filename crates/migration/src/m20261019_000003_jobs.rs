use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Job rows are seeded per domain at install time, not here.
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Jobs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Jobs::DomainId).integer().not_null())
                    .col(ColumnDef::new(Jobs::Name).string().not_null())
                    .col(ColumnDef::new(Jobs::Description).text())
                    .col(
                        ColumnDef::new(Jobs::RunFrequency)
                            .string_len(16)
                            .not_null()
                            .default("Daily"),
                    )
                    .col(ColumnDef::new(Jobs::ApiEntity).string().not_null())
                    .col(ColumnDef::new(Jobs::ApiAction).string().not_null())
                    .col(ColumnDef::new(Jobs::Parameters).text())
                    .col(
                        ColumnDef::new(Jobs::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Jobs::LastRun).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_domain_id")
                    .table(Jobs::Table)
                    .col(Jobs::DomainId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    DomainId,
    Name,
    Description,
    RunFrequency,
    ApiEntity,
    ApiAction,
    Parameters,
    IsActive,
    LastRun,
}
