use sea_orm::entity::prelude::*;

/// Festival event or competition.
///
/// `current_teams` is adjusted with atomic SQL increments from team
/// create/delete, never read-modify-write.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub event_id: String,
    pub category: String,
    pub event_name: String,
    pub reg_fees: i64,
    pub date_time: chrono::DateTime<chrono::Utc>,
    pub end_date_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
    pub brief_description: Option<String>,
    pub image: Option<String>,
    pub pdf_link: Option<String>,
    pub contact_info: Option<String>,
    pub is_team_event: bool,
    pub min_team_members: i32,
    pub max_team_members: i32,
    pub team_limit: i32,
    pub current_teams: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
    #[sea_orm(has_many = "super::discounts::Entity")]
    Discounts,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::discounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
