use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Submissions::Table)
                    .col(Submissions::UserId)
                    .col((Submissions::CreatedAt, IndexOrder::Desc))
                    .name("idx_submissions_user_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Submissions::Table)
                    .col(Submissions::PaymentStatus)
                    .col((Submissions::CreatedAt, IndexOrder::Desc))
                    .name("idx_submissions_payment_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Submissions::Table)
                    .col(Submissions::EventId)
                    .name("idx_submissions_event_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Teams::Table)
                    .col(Teams::EventId)
                    .name("idx_teams_event_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Teams::Table)
                    .col(Teams::InviteCode)
                    .name("idx_teams_invite_code")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Events::Table)
                    .col(Events::Category)
                    .col(Events::DateTime)
                    .name("idx_events_category_date_time")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Discounts::Table)
                    .col(Discounts::UserEmail)
                    .name("idx_discounts_user_email")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_discounts_user_email").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_events_category_date_time")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_teams_invite_code").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_teams_event_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_submissions_event_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_submissions_payment_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_submissions_user_id_created_at")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Submissions {
    Table,
    UserId,
    EventId,
    PaymentStatus,
    CreatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    EventId,
    InviteCode,
}

#[derive(Iden)]
enum Events {
    Table,
    Category,
    DateTime,
}

#[derive(Iden)]
enum Discounts {
    Table,
    UserEmail,
}
