use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_auth_types::identity::Identity;

use crate::domain::types::User;
use crate::error::FestivalServiceError;
use crate::handlers::discount::DiscountResponse;
use crate::state::AppState;
use crate::usecase::account::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
use crate::usecase::discount::MyDiscountsUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub college_name: String,
    pub role: u8,
    pub status: &'static str,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub event_ids: Vec<Uuid>,
    pub team_ids: Vec<Uuid>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            college_name: user.college_name,
            role: user.role,
            status: user.status.as_str(),
            referral_code: user.referral_code,
            referred_by: user.referred_by,
            event_ids: user.event_ids,
            team_ids: user.team_ids,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FestivalServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, FestivalServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                phone_number: body.phone_number,
                college_name: body.college_name,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me/discounts ─────────────────────────────────────────────────

pub async fn my_discounts(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<DiscountResponse>>, FestivalServiceError> {
    // Codes are bound to emails, so resolve the account first
    let profile = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = profile.execute(identity.user_id).await?;

    let usecase = MyDiscountsUseCase {
        discounts: state.discount_repo(),
    };
    let discounts = usecase.execute(&user.email).await?;
    Ok(Json(discounts.into_iter().map(Into::into).collect()))
}
