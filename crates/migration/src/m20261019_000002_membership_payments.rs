use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contributions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contributions::ContactId).integer().not_null())
                    .col(
                        ColumnDef::new(Contributions::TotalAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Contributions::ReceiveDate).date())
                    .col(
                        ColumnDef::new(Contributions::ContributionStatusId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contributions_contact_id")
                            .from(Contributions::Table, Contributions::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Payment <-> membership link. Both sides cascade.
        manager
            .create_table(
                Table::create()
                    .table(MembershipPaymentLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipPaymentLink::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MembershipPaymentLink::MembershipId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MembershipPaymentLink::ContributionId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_membership_payment_link_membership_id")
                            .from(MembershipPaymentLink::Table, MembershipPaymentLink::MembershipId)
                            .to(Memberships::Table, Memberships::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_membership_payment_link_contribution_id")
                            .from(MembershipPaymentLink::Table, MembershipPaymentLink::ContributionId)
                            .to(Contributions::Table, Contributions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ui_contribution_membership")
                    .table(MembershipPaymentLink::Table)
                    .col(MembershipPaymentLink::ContributionId)
                    .col(MembershipPaymentLink::MembershipId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_payment_link_membership_id")
                    .table(MembershipPaymentLink::Table)
                    .col(MembershipPaymentLink::MembershipId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipPaymentLink::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contributions::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Memberships {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Contributions {
    Table,
    Id,
    ContactId,
    TotalAmount,
    ReceiveDate,
    ContributionStatusId,
}

#[derive(DeriveIden)]
enum MembershipPaymentLink {
    Table,
    Id,
    MembershipId,
    ContributionId,
}
