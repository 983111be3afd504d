use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionSchedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActionSchedules::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ActionSchedules::Title).string().not_null())
                    .col(ColumnDef::new(ActionSchedules::MappingId).string().not_null())
                    .col(ColumnDef::new(ActionSchedules::EntityValue).string())
                    .col(ColumnDef::new(ActionSchedules::EntityStatus).string())
                    .col(ColumnDef::new(ActionSchedules::StartActionDate).string())
                    .col(ColumnDef::new(ActionSchedules::AbsoluteDate).date())
                    .col(
                        ColumnDef::new(ActionSchedules::IsRepeat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ActionSchedules::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionSchedules::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ActionSchedules {
    Table,
    Id,
    Name,
    Title,
    MappingId,
    EntityValue,
    EntityStatus,
    StartActionDate,
    AbsoluteDate,
    IsRepeat,
    IsActive,
}
