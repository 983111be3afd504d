use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (name, label, is_current_member, weight)
const STATUSES: &[(&str, &str, bool, i32)] = &[
    ("New", "New", true, 1),
    ("Current", "Current", true, 2),
    ("Grace", "Grace", true, 3),
    ("Expired", "Expired", false, 4),
    ("Pending", "Pending", false, 5),
    ("Cancelled", "Cancelled", false, 6),
    ("Deceased", "Deceased", false, 7),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(MembershipStatuses::Table).columns([
            MembershipStatuses::Name,
            MembershipStatuses::Label,
            MembershipStatuses::IsCurrentMember,
            MembershipStatuses::IsActive,
            MembershipStatuses::Weight,
        ]);
        for (name, label, is_current_member, weight) in STATUSES {
            insert.values_panic([
                (*name).into(),
                (*label).into(),
                (*is_current_member).into(),
                true.into(),
                (*weight).into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<&str> = STATUSES.iter().map(|(name, ..)| *name).collect();
        let delete = Query::delete()
            .from_table(MembershipStatuses::Table)
            .and_where(Expr::col(MembershipStatuses::Name).is_in(names))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum MembershipStatuses {
    Table,
    Name,
    Label,
    IsCurrentMember,
    IsActive,
    Weight,
}
