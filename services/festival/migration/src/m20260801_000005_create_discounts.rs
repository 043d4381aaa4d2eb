use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Discounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Discounts::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Discounts::UserId).uuid())
                    .col(ColumnDef::new(Discounts::UserEmail).string())
                    .col(ColumnDef::new(Discounts::DiscountType).string().not_null())
                    .col(
                        ColumnDef::new(Discounts::DiscountValue)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Discounts::EventId).uuid())
                    .col(ColumnDef::new(Discounts::EventName).string())
                    .col(
                        ColumnDef::new(Discounts::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Discounts::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Discounts::MaxUsage)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Discounts::UsedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Discounts::ExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Discounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Discounts::CreatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Discounts::Table, Discounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Discounts::Table, Discounts::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Discounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Discounts {
    Table,
    Id,
    Code,
    UserId,
    UserEmail,
    DiscountType,
    DiscountValue,
    EventId,
    EventName,
    IsUsed,
    UsageCount,
    MaxUsage,
    UsedAt,
    ExpiresAt,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}
