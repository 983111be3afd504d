use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Contacts::ContactType)
                            .string()
                            .not_null()
                            .default("Individual"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MembershipTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MembershipTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(MembershipTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MembershipStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipStatuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MembershipStatuses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MembershipStatuses::Label).string().not_null())
                    .col(
                        ColumnDef::new(MembershipStatuses::IsCurrentMember)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MembershipStatuses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MembershipStatuses::Weight)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memberships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memberships::ContactId).integer().not_null())
                    .col(ColumnDef::new(Memberships::MembershipTypeId).integer().not_null())
                    .col(ColumnDef::new(Memberships::StatusId).integer().not_null())
                    .col(ColumnDef::new(Memberships::JoinDate).date())
                    .col(ColumnDef::new(Memberships::StartDate).date())
                    .col(ColumnDef::new(Memberships::EndDate).date())
                    .col(ColumnDef::new(Memberships::ContributionRecurId).integer())
                    .col(ColumnDef::new(Memberships::IsOverride).boolean())
                    .col(ColumnDef::new(Memberships::OwnerMembershipId).integer())
                    .col(ColumnDef::new(Memberships::Source).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_contact_id")
                            .from(Memberships::Table, Memberships::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_membership_type_id")
                            .from(Memberships::Table, Memberships::MembershipTypeId)
                            .to(MembershipTypes::Table, MembershipTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_status_id")
                            .from(Memberships::Table, Memberships::StatusId)
                            .to(MembershipStatuses::Table, MembershipStatuses::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_owner_membership_id")
                            .from(Memberships::Table, Memberships::OwnerMembershipId)
                            .to(Memberships::Table, Memberships::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_memberships_contact_id")
                    .table(Memberships::Table)
                    .col(Memberships::ContactId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_memberships_owner_membership_id")
                    .table(Memberships::Table)
                    .col(Memberships::OwnerMembershipId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Relationships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Relationships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Relationships::ContactIdA).integer().not_null())
                    .col(ColumnDef::new(Relationships::ContactIdB).integer().not_null())
                    .col(
                        ColumnDef::new(Relationships::RelationshipTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Relationships::IsPermissionAB)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Relationships::IsPermissionBA)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_contact_id_a")
                            .from(Relationships::Table, Relationships::ContactIdA)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_contact_id_b")
                            .from(Relationships::Table, Relationships::ContactIdB)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_relationships_contacts")
                    .table(Relationships::Table)
                    .col(Relationships::ContactIdA)
                    .col(Relationships::ContactIdB)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Relationships::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Memberships::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MembershipStatuses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MembershipTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    DisplayName,
    ContactType,
}

#[derive(DeriveIden)]
enum MembershipTypes {
    Table,
    Id,
    Name,
    IsActive,
}

#[derive(DeriveIden)]
enum MembershipStatuses {
    Table,
    Id,
    Name,
    Label,
    IsCurrentMember,
    IsActive,
    Weight,
}

#[derive(DeriveIden)]
enum Memberships {
    Table,
    Id,
    ContactId,
    MembershipTypeId,
    StatusId,
    JoinDate,
    StartDate,
    EndDate,
    ContributionRecurId,
    IsOverride,
    OwnerMembershipId,
    Source,
}

#[derive(DeriveIden)]
enum Relationships {
    Table,
    Id,
    ContactIdA,
    ContactIdB,
    RelationshipTypeId,
    IsActive,
    #[sea_orm(iden = "is_permission_a_b")]
    IsPermissionAB,
    #[sea_orm(iden = "is_permission_b_a")]
    IsPermissionBA,
}
