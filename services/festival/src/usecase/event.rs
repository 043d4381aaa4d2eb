use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::EventRepository;
use crate::domain::types::{Event, EventChanges};
use crate::error::FestivalServiceError;
use crate::usecase::code::generate_event_id;

/// Resolve an event by its human-readable slug first, uuid second.
///
/// Public routes expose the slug (`mumbai_48h_a1b2c3`); internal references
/// carry the uuid. Both arrive through the same path parameter.
pub(crate) async fn find_event<E: EventRepository>(
    events: &E,
    key: &str,
) -> Result<Event, FestivalServiceError> {
    if let Some(event) = events.find_by_event_id(key).await? {
        return Ok(event);
    }
    if let Ok(id) = key.parse::<Uuid>() {
        if let Some(event) = events.find_by_id(id).await? {
            return Ok(event);
        }
    }
    Err(FestivalServiceError::EventNotFound)
}

// ── CreateEvent ──────────────────────────────────────────────────────────────

pub struct CreateEventInput {
    pub category: String,
    pub event_name: String,
    pub reg_fees: Option<i64>,
    pub date_time: DateTime<Utc>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub brief_description: Option<String>,
    pub image: Option<String>,
    pub pdf_link: Option<String>,
    pub contact_info: Option<String>,
    pub is_team_event: bool,
    pub min_team_members: Option<i32>,
    pub max_team_members: Option<i32>,
    pub team_limit: Option<i32>,
}

pub struct CreateEventUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> CreateEventUseCase<E> {
    pub async fn execute(&self, input: CreateEventInput) -> Result<Event, FestivalServiceError> {
        // 1. Field shape checks before any write
        let event_name = input.event_name.trim();
        if event_name.is_empty() {
            return Err(FestivalServiceError::MissingField("event_name"));
        }
        let category = input.category.trim();
        if category.is_empty() {
            return Err(FestivalServiceError::MissingField("category"));
        }

        // 2. Slug id from name + category; unset knobs get the solo defaults
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            event_id: generate_event_id(event_name, category),
            category: category.to_owned(),
            event_name: event_name.to_owned(),
            reg_fees: input.reg_fees.unwrap_or(0),
            date_time: input.date_time,
            end_date_time: input.end_date_time,
            location: input.location,
            brief_description: input.brief_description,
            image: input.image,
            pdf_link: input.pdf_link,
            contact_info: input.contact_info,
            is_team_event: input.is_team_event,
            min_team_members: input.min_team_members.unwrap_or(1),
            max_team_members: input.max_team_members.unwrap_or(1),
            team_limit: input.team_limit.unwrap_or(0),
            current_teams: 0,
            created_at: now,
            updated_at: now,
        };

        self.events.create(&event).await?;

        Ok(event)
    }
}

// ── GetEvent ─────────────────────────────────────────────────────────────────

pub struct GetEventUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> GetEventUseCase<E> {
    pub async fn execute(&self, key: &str) -> Result<Event, FestivalServiceError> {
        find_event(&self.events, key).await
    }
}

// ── ListEvents ───────────────────────────────────────────────────────────────

pub struct ListEventsUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> ListEventsUseCase<E> {
    /// Upcoming-first listing, optionally narrowed to one category.
    pub async fn execute(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Event>, FestivalServiceError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        self.events.list(category).await
    }
}

// ── UpdateEvent ──────────────────────────────────────────────────────────────

pub struct UpdateEventUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> UpdateEventUseCase<E> {
    pub async fn execute(
        &self,
        key: &str,
        changes: EventChanges,
    ) -> Result<Event, FestivalServiceError> {
        if changes.is_empty() {
            return Err(FestivalServiceError::EmptyUpdate);
        }

        // The slug is derived at creation and never re-derived on rename.
        let event = find_event(&self.events, key).await?;

        if !self.events.update(event.id, &changes).await? {
            return Err(FestivalServiceError::EventNotFound);
        }

        self.events
            .find_by_id(event.id)
            .await?
            .ok_or(FestivalServiceError::EventNotFound)
    }
}

// ── DeleteEvent ──────────────────────────────────────────────────────────────

pub struct DeleteEventUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> DeleteEventUseCase<E> {
    pub async fn execute(&self, key: &str) -> Result<(), FestivalServiceError> {
        let event = find_event(&self.events, key).await?;

        if !self.events.delete(event.id).await? {
            return Err(FestivalServiceError::EventNotFound);
        }

        Ok(())
    }
}
