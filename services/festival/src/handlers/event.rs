use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Event;
use crate::error::FestivalServiceError;
use crate::state::{AppState, EVENT_CACHE_TTL};
use crate::usecase::event::{GetEventUseCase, ListEventsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub event_id: String,
    pub category: String,
    pub event_name: String,
    pub reg_fees: i64,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub date_time: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms_opt")]
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
    pub is_full: bool,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            is_full: event.is_full(),
            id: event.id,
            event_id: event.event_id,
            category: event.category,
            event_name: event.event_name,
            reg_fees: event.reg_fees,
            date_time: event.date_time,
            end_date_time: event.end_date_time,
            location: event.location,
            brief_description: event.brief_description,
            image: event.image,
            pdf_link: event.pdf_link,
            contact_info: event.contact_info,
            is_team_event: event.is_team_event,
            min_team_members: event.min_team_members,
            max_team_members: event.max_team_members,
            team_limit: event.team_limit,
            current_teams: event.current_teams,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

// ── GET /events ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EventListQuery {
    pub category: Option<String>,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Vec<EventResponse>>, FestivalServiceError> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned);
    // One cache slot per category filter; admin event writes clear them all
    let key = category.clone().unwrap_or_else(|| "all".to_owned());

    let usecase = ListEventsUseCase {
        events: state.event_repo(),
    };
    let events = state
        .events_cache
        .get_or_insert_with(key, EVENT_CACHE_TTL, || async {
            usecase.execute(category.as_deref()).await
        })
        .await?;

    Ok(Json(events.into_iter().map(Into::into).collect()))
}

// ── GET /events/{event_id} ───────────────────────────────────────────────────

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, FestivalServiceError> {
    let usecase = GetEventUseCase {
        events: state.event_repo(),
    };
    let event = usecase.execute(&event_id).await?;
    Ok(Json(event.into()))
}
