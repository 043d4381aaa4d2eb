use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmissionId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Submissions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Submissions::UserEmail).string().not_null())
                    .col(ColumnDef::new(Submissions::EventId).uuid().not_null())
                    .col(ColumnDef::new(Submissions::Title).string().not_null())
                    .col(ColumnDef::new(Submissions::Synopsis).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Language).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::DirectorName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::DirectorEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::DirectorPhone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::TeamMemberEmails)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::TotalTeamMembers)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Submissions::FilmLink).string().not_null())
                    .col(ColumnDef::new(Submissions::PosterLink).string().not_null())
                    .col(ColumnDef::new(Submissions::SubtitlesLink).string())
                    .col(
                        ColumnDef::new(Submissions::Fee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Submissions::DiscountCode).string())
                    .col(
                        ColumnDef::new(Submissions::DiscountAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Submissions::AccommodationMembers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Submissions::AccommodationFees)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Submissions::TotalFees)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::PaymentStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::TransactionId).string())
                    .col(
                        ColumnDef::new(Submissions::PaymentSubmittedAt).timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(Submissions::RejectionReason).string())
                    .col(ColumnDef::new(Submissions::VerifiedBy).string())
                    .col(ColumnDef::new(Submissions::VerifiedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backstop for the pre-write duplicate check: one submission per
        // (user, event), enforced atomically at the database.
        manager
            .create_index(
                Index::create()
                    .table(Submissions::Table)
                    .col(Submissions::UserId)
                    .col(Submissions::EventId)
                    .unique()
                    .name("idx_submissions_user_id_event_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    SubmissionId,
    UserId,
    UserEmail,
    EventId,
    Title,
    Synopsis,
    DurationMinutes,
    Language,
    DirectorName,
    DirectorEmail,
    DirectorPhone,
    TeamMemberEmails,
    TotalTeamMembers,
    FilmLink,
    PosterLink,
    SubtitlesLink,
    Fee,
    DiscountCode,
    DiscountAmount,
    AccommodationMembers,
    AccommodationFees,
    TotalFees,
    Status,
    PaymentStatus,
    TransactionId,
    PaymentSubmittedAt,
    RejectionReason,
    VerifiedBy,
    VerifiedAt,
    CreatedAt,
    UpdatedAt,
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
