use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_auth_types::identity::Identity;

use crate::domain::types::Submission;
use crate::error::FestivalServiceError;
use crate::state::AppState;
use crate::usecase::submission::{
    CreateSubmissionInput, CreateSubmissionUseCase, GetSubmissionUseCase, MySubmissionsUseCase,
    SubmitPaymentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
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
    pub team_member_emails: Vec<String>,
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
    pub payment_status: &'static str,
    pub transaction_id: Option<String>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms_opt")]
    pub payment_submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<String>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms_opt")]
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            submission_id: submission.submission_id,
            user_id: submission.user_id,
            user_email: submission.user_email,
            event_id: submission.event_id,
            title: submission.title,
            synopsis: submission.synopsis,
            duration_minutes: submission.duration_minutes,
            language: submission.language,
            director_name: submission.director_name,
            director_email: submission.director_email,
            director_phone: submission.director_phone,
            team_member_emails: submission.team_member_emails,
            total_team_members: submission.total_team_members,
            film_link: submission.film_link,
            poster_link: submission.poster_link,
            subtitles_link: submission.subtitles_link,
            fee: submission.fee,
            discount_code: submission.discount_code,
            discount_amount: submission.discount_amount,
            accommodation_members: submission.accommodation_members,
            accommodation_fees: submission.accommodation_fees,
            total_fees: submission.total_fees,
            status: submission.status,
            payment_status: submission.payment_status.as_str(),
            transaction_id: submission.transaction_id,
            payment_submitted_at: submission.payment_submitted_at,
            rejection_reason: submission.rejection_reason,
            verified_by: submission.verified_by,
            verified_at: submission.verified_at,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        }
    }
}

// ── POST /submissions ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSubmissionRequest {
    /// Event slug or uuid.
    pub event_id: String,
    pub title: String,
    pub synopsis: String,
    pub duration_minutes: i32,
    pub language: String,
    pub director_name: String,
    pub director_email: String,
    pub director_phone: String,
    #[serde(default)]
    pub team_member_emails: Vec<String>,
    pub film_link: String,
    pub poster_link: Option<String>,
    pub subtitles_link: Option<String>,
    #[serde(default)]
    pub accommodation_members: i32,
    pub discount_code: Option<String>,
}

pub async fn create_submission(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, FestivalServiceError> {
    let usecase = CreateSubmissionUseCase {
        submissions: state.submission_repo(),
        users: state.user_repo(),
        events: state.event_repo(),
        discounts: state.discount_repo(),
    };
    let submission = usecase
        .execute(
            identity.user_id,
            CreateSubmissionInput {
                event_id: body.event_id,
                title: body.title,
                synopsis: body.synopsis,
                duration_minutes: body.duration_minutes,
                language: body.language,
                director_name: body.director_name,
                director_email: body.director_email,
                director_phone: body.director_phone,
                team_member_emails: body.team_member_emails,
                film_link: body.film_link,
                poster_link: body.poster_link,
                subtitles_link: body.subtitles_link,
                accommodation_members: body.accommodation_members,
                discount_code: body.discount_code,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    ))
}

// ── GET /submissions/@me ─────────────────────────────────────────────────────

pub async fn my_submissions(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, FestivalServiceError> {
    let usecase = MySubmissionsUseCase {
        submissions: state.submission_repo(),
    };
    let submissions = usecase.execute(identity.user_id).await?;
    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

// ── GET /submissions/{submission_id} ─────────────────────────────────────────

pub async fn get_submission(
    identity: Identity,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<SubmissionResponse>, FestivalServiceError> {
    let usecase = GetSubmissionUseCase {
        submissions: state.submission_repo(),
    };
    let submission = usecase
        .execute(identity.user_id, identity.user_role, &submission_id)
        .await?;
    Ok(Json(submission.into()))
}

// ── POST /submissions/{submission_id}/payment ────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitPaymentRequest {
    pub transaction_id: String,
}

pub async fn submit_payment(
    identity: Identity,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    Json(body): Json<SubmitPaymentRequest>,
) -> Result<Json<SubmissionResponse>, FestivalServiceError> {
    let usecase = SubmitPaymentUseCase {
        submissions: state.submission_repo(),
    };
    let submission = usecase
        .execute(identity.user_id, &submission_id, &body.transaction_id)
        .await?;
    Ok(Json(submission.into()))
}
