use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_auth_types::identity::Identity;
use lumiere_domain::pagination::{PageRequest, Sort};
use lumiere_domain::user::UserRole;

use crate::domain::types::{EventChanges, PaymentStatus};
use crate::error::FestivalServiceError;
use crate::handlers::discount::DiscountResponse;
use crate::handlers::event::EventResponse;
use crate::handlers::submission::SubmissionResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::account::GetProfileUseCase;
use crate::usecase::admin::{
    DashboardStatsUseCase, ListSubmissionsUseCase, ListUsersUseCase, RecentActivitiesUseCase,
    ReviewPaymentInput, ReviewPaymentUseCase, UpdateUserInput, UpdateUserUseCase,
};
use crate::usecase::discount::{
    CreateDiscountInput, CreateDiscountUseCase, DeleteDiscountUseCase, DiscountStatsUseCase,
    ListDiscountsUseCase,
};
use crate::usecase::event::{
    CreateEventInput, CreateEventUseCase, DeleteEventUseCase, UpdateEventUseCase,
};

/// Cookie identity carries the role; 403 for anything below admin.
fn require_admin(identity: &Identity) -> Result<(), FestivalServiceError> {
    if identity.user_role < UserRole::Admin.as_u8() {
        return Err(FestivalServiceError::Forbidden);
    }
    Ok(())
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    /// Email prefix filter.
    pub q: Option<String>,
    pub sort: Option<Sort>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, FestivalServiceError> {
    require_admin(&identity)?;

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let sort = query.sort.unwrap_or(Sort::Desc);

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(query.q.as_deref(), sort, page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /admin/users/{user_id} ───────────────────────────────────────────────

pub async fn get_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /admin/users/{user_id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
    pub role: Option<u8>,
    pub status: Option<String>,
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            user_id,
            UpdateUserInput {
                name: body.name,
                phone_number: body.phone_number,
                college_name: body.college_name,
                role: body.role,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /admin/submissions ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SubmissionListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub payment_status: Option<String>,
    pub event_id: Option<Uuid>,
}

pub async fn list_submissions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<Vec<SubmissionResponse>>, FestivalServiceError> {
    require_admin(&identity)?;

    let payment_status = match query.payment_status.as_deref() {
        Some(s) => Some(
            PaymentStatus::from_kebab_case(s)
                .ok_or(FestivalServiceError::InvalidPaymentStatus)?,
        ),
        None => None,
    };
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListSubmissionsUseCase {
        submissions: state.submission_repo(),
    };
    let submissions = usecase
        .execute(payment_status, query.event_id, page)
        .await?;
    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

// ── PATCH /admin/submissions/{submission_id}/payment ─────────────────────────

#[derive(Deserialize)]
pub struct ReviewPaymentRequest {
    pub payment_status: String,
    pub rejection_reason: Option<String>,
}

pub async fn review_payment(
    identity: Identity,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    Json(body): Json<ReviewPaymentRequest>,
) -> Result<Json<SubmissionResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    // `verified_by` records an email, not a uuid
    let profile = GetProfileUseCase {
        users: state.user_repo(),
    };
    let admin = profile.execute(identity.user_id).await?;

    let usecase = ReviewPaymentUseCase {
        submissions: state.submission_repo(),
    };
    let submission = usecase
        .execute(
            &admin.email,
            &submission_id,
            ReviewPaymentInput {
                payment_status: body.payment_status,
                rejection_reason: body.rejection_reason,
            },
        )
        .await?;
    Ok(Json(submission.into()))
}

// ── POST /admin/events ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub category: String,
    pub event_name: String,
    pub reg_fees: Option<i64>,
    pub date_time: chrono::DateTime<chrono::Utc>,
    pub end_date_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
    pub brief_description: Option<String>,
    pub image: Option<String>,
    pub pdf_link: Option<String>,
    pub contact_info: Option<String>,
    #[serde(default)]
    pub is_team_event: bool,
    pub min_team_members: Option<i32>,
    pub max_team_members: Option<i32>,
    pub team_limit: Option<i32>,
}

pub async fn create_event(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = CreateEventUseCase {
        events: state.event_repo(),
    };
    let event = usecase
        .execute(CreateEventInput {
            category: body.category,
            event_name: body.event_name,
            reg_fees: body.reg_fees,
            date_time: body.date_time,
            end_date_time: body.end_date_time,
            location: body.location,
            brief_description: body.brief_description,
            image: body.image,
            pdf_link: body.pdf_link,
            contact_info: body.contact_info,
            is_team_event: body.is_team_event,
            min_team_members: body.min_team_members,
            max_team_members: body.max_team_members,
            team_limit: body.team_limit,
        })
        .await?;

    // The public listing must not serve a stale snapshot
    state.events_cache.clear();

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

// ── PATCH /admin/events/{event_id} ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub category: Option<String>,
    pub event_name: Option<String>,
    pub reg_fees: Option<i64>,
    pub date_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
    pub brief_description: Option<String>,
    pub image: Option<String>,
    pub pdf_link: Option<String>,
    pub contact_info: Option<String>,
    pub is_team_event: Option<bool>,
    pub min_team_members: Option<i32>,
    pub max_team_members: Option<i32>,
    pub team_limit: Option<i32>,
}

pub async fn update_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = UpdateEventUseCase {
        events: state.event_repo(),
    };
    let event = usecase
        .execute(
            &event_id,
            EventChanges {
                category: body.category,
                event_name: body.event_name,
                reg_fees: body.reg_fees,
                date_time: body.date_time,
                end_date_time: body.end_date_time,
                location: body.location,
                brief_description: body.brief_description,
                image: body.image,
                pdf_link: body.pdf_link,
                contact_info: body.contact_info,
                is_team_event: body.is_team_event,
                min_team_members: body.min_team_members,
                max_team_members: body.max_team_members,
                team_limit: body.team_limit,
            },
        )
        .await?;

    state.events_cache.clear();

    Ok(Json(event.into()))
}

// ── DELETE /admin/events/{event_id} ──────────────────────────────────────────

pub async fn delete_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = DeleteEventUseCase {
        events: state.event_repo(),
    };
    usecase.execute(&event_id).await?;

    state.events_cache.clear();

    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/discounts ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDiscountRequest {
    pub discount_type: String,
    pub discount_value: i64,
    pub user_email: Option<String>,
    /// Event slug or uuid.
    pub event_id: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_usage: Option<i32>,
}

pub async fn create_discount(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateDiscountRequest>,
) -> Result<impl IntoResponse, FestivalServiceError> {
    require_admin(&identity)?;

    let profile = GetProfileUseCase {
        users: state.user_repo(),
    };
    let admin = profile.execute(identity.user_id).await?;

    let usecase = CreateDiscountUseCase {
        discounts: state.discount_repo(),
        users: state.user_repo(),
        events: state.event_repo(),
    };
    let discount = usecase
        .execute(
            CreateDiscountInput {
                discount_type: body.discount_type,
                discount_value: body.discount_value,
                user_email: body.user_email,
                event_id: body.event_id,
                expires_at: body.expires_at,
                max_usage: body.max_usage,
            },
            &admin.email,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DiscountResponse::from(discount))))
}

// ── GET /admin/discounts ─────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DiscountListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub user_email: Option<String>,
    pub event_id: Option<Uuid>,
    pub is_used: Option<bool>,
}

pub async fn list_discounts(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<DiscountListQuery>,
) -> Result<Json<Vec<DiscountResponse>>, FestivalServiceError> {
    require_admin(&identity)?;

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListDiscountsUseCase {
        discounts: state.discount_repo(),
    };
    let discounts = usecase
        .execute(query.user_email.as_deref(), query.event_id, query.is_used, page)
        .await?;
    Ok(Json(discounts.into_iter().map(Into::into).collect()))
}

// ── GET /admin/discounts/stats ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct DiscountStatsResponse {
    pub total: u64,
    pub used: u64,
    pub unused: u64,
    pub expired: u64,
    pub total_amount_issued: i64,
    pub total_amount_used: i64,
}

pub async fn discount_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DiscountStatsResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = DiscountStatsUseCase {
        discounts: state.discount_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(DiscountStatsResponse {
        total: stats.total,
        used: stats.used,
        unused: stats.unused,
        expired: stats.expired,
        total_amount_issued: stats.total_amount_issued,
        total_amount_used: stats.total_amount_used,
    }))
}

// ── DELETE /admin/discounts/{discount_id} ────────────────────────────────────

pub async fn delete_discount(
    identity: Identity,
    State(state): State<AppState>,
    Path(discount_id): Path<String>,
) -> Result<StatusCode, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = DeleteDiscountUseCase {
        discounts: state.discount_repo(),
    };
    usecase.execute(&discount_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/stats ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardStatsResponse {
    pub total_users: u64,
    pub total_submissions: u64,
    pub pending_payments: u64,
    pub verified_payments: u64,
    pub total_revenue: i64,
}

pub async fn dashboard_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsResponse>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = DashboardStatsUseCase {
        users: state.user_repo(),
        submissions: state.submission_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(DashboardStatsResponse {
        total_users: stats.total_users,
        total_submissions: stats.total_submissions,
        pending_payments: stats.pending_payments,
        verified_payments: stats.verified_payments,
        total_revenue: stats.total_revenue,
    }))
}

// ── GET /admin/activities ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub submission_id: String,
    pub title: String,
    pub user_email: String,
    pub payment_status: &'static str,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn recent_activities(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityResponse>>, FestivalServiceError> {
    require_admin(&identity)?;

    let usecase = RecentActivitiesUseCase {
        submissions: state.submission_repo(),
    };
    let submissions = usecase.execute(query.limit).await?;
    let items = submissions
        .into_iter()
        .map(|submission| ActivityResponse {
            submission_id: submission.submission_id,
            title: submission.title,
            user_email: submission.user_email,
            payment_status: submission.payment_status.as_str(),
            created_at: submission.created_at,
        })
        .collect();
    Ok(Json(items))
}
