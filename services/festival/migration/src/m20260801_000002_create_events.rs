use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Events::EventId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Events::Category).string().not_null())
                    .col(ColumnDef::new(Events::EventName).string().not_null())
                    .col(
                        ColumnDef::new(Events::RegFees)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Events::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::EndDateTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Events::Location).string())
                    .col(ColumnDef::new(Events::BriefDescription).string())
                    .col(ColumnDef::new(Events::Image).string())
                    .col(ColumnDef::new(Events::PdfLink).string())
                    .col(ColumnDef::new(Events::ContactInfo).string())
                    .col(
                        ColumnDef::new(Events::IsTeamEvent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Events::MinTeamMembers)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Events::MaxTeamMembers)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Events::TeamLimit)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Events::CurrentTeams)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    EventId,
    Category,
    EventName,
    RegFees,
    DateTime,
    EndDateTime,
    Location,
    BriefDescription,
    Image,
    PdfLink,
    ContactInfo,
    IsTeamEvent,
    MinTeamMembers,
    MaxTeamMembers,
    TeamLimit,
    CurrentTeams,
    CreatedAt,
    UpdatedAt,
}
