use sea_orm::entity::prelude::*;

/// Film submission carrying the full registration/payment lifecycle.
///
/// `(user_id, event_id)` is unique — one submission per user per event.
/// `team_member_emails` is a JSON string array (max 4 entries).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub submission_id: String,
    pub user_id: Uuid,
    pub user_email: String,
    pub event_id: Uuid,
    pub title: String,
    pub synopsis: String,
    pub duration_minutes: i32,
    pub language: String,
    pub director_name: String,
    pub director_email: String,
    pub director_phone: String,
    pub team_member_emails: Json,
    pub total_team_members: i32,
    pub film_link: String,
    pub poster_link: String,
    pub subtitles_link: Option<String>,
    pub fee: i64,
    pub discount_code: Option<String>,
    pub discount_amount: i64,
    pub accommodation_members: i32,
    pub accommodation_fees: i64,
    pub total_fees: i64,
    pub status: String,
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub payment_submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
