use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_auth_types::identity::Identity;

use crate::domain::types::Discount;
use crate::error::FestivalServiceError;
use crate::state::AppState;
use crate::usecase::account::GetProfileUseCase;
use crate::usecase::discount::ValidateDiscountUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DiscountResponse {
    pub id: Uuid,
    pub code: String,
    pub user_id: Option<Uuid>,
    pub user_email: Option<String>,
    pub discount_type: &'static str,
    pub discount_value: i64,
    pub event_id: Option<Uuid>,
    pub event_name: Option<String>,
    pub is_used: bool,
    pub usage_count: i32,
    pub max_usage: i32,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms_opt")]
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms_opt")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: String,
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        Self {
            id: discount.id,
            code: discount.code,
            user_id: discount.user_id,
            user_email: discount.user_email,
            discount_type: discount.discount_type.as_str(),
            discount_value: discount.discount_value,
            event_id: discount.event_id,
            event_name: discount.event_name,
            is_used: discount.is_used,
            usage_count: discount.usage_count,
            max_usage: discount.max_usage,
            used_at: discount.used_at,
            expires_at: discount.expires_at,
            created_at: discount.created_at,
            created_by: discount.created_by,
        }
    }
}

// ── POST /discounts/validate ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateDiscountRequest {
    pub code: String,
    /// Event slug or uuid the code would be applied to.
    pub event_id: String,
}

#[derive(Serialize)]
pub struct ValidateDiscountResponse {
    pub code: String,
    pub discount_type: &'static str,
    pub discount_value: i64,
    /// Rupees off this event's registration fee.
    pub amount: i64,
}

pub async fn validate_discount(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ValidateDiscountRequest>,
) -> Result<Json<ValidateDiscountResponse>, FestivalServiceError> {
    // The email checked is the signed-in account's, never one off the wire
    let profile = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = profile.execute(identity.user_id).await?;

    let usecase = ValidateDiscountUseCase {
        discounts: state.discount_repo(),
        events: state.event_repo(),
    };
    let out = usecase
        .execute(&body.code, &user.email, &body.event_id)
        .await?;

    Ok(Json(ValidateDiscountResponse {
        discount_type: out.discount.discount_type.as_str(),
        discount_value: out.discount.discount_value,
        code: out.discount.code,
        amount: out.amount,
    }))
}
