use chrono::{DateTime, Utc};
use uuid::Uuid;

use lumiere_domain::codes::format_discount_code;
use lumiere_domain::pagination::PageRequest;

use crate::domain::repository::{DiscountRepository, EventRepository, UserRepository};
use crate::domain::types::{Discount, DiscountType, Event, validate_email};
use crate::error::FestivalServiceError;
use crate::usecase::code::unique_discount_code;
use crate::usecase::event::find_event;

/// Check a code against an account and an event, without consuming it.
///
/// Rejections are ordered: unknown code, fully used, expired, bound to
/// another account, bound to another event. Returns the discount and the
/// rupee amount it takes off the event's registration fee.
pub(crate) async fn check_discount<D: DiscountRepository>(
    discounts: &D,
    code: &str,
    user_email: &str,
    event: &Event,
) -> Result<(Discount, i64), FestivalServiceError> {
    let code = format_discount_code(code);
    let email = user_email.trim().to_lowercase();

    let discount = discounts
        .find_by_code(&code)
        .await?
        .ok_or(FestivalServiceError::DiscountNotFound)?;

    if discount.is_exhausted() {
        return Err(FestivalServiceError::DiscountAlreadyUsed);
    }
    if discount.is_expired(Utc::now()) {
        return Err(FestivalServiceError::DiscountExpired);
    }
    if let Some(bound) = &discount.user_email {
        if *bound != email {
            return Err(FestivalServiceError::DiscountNotYours);
        }
    }
    if let Some(bound) = discount.event_id {
        if bound != event.id {
            return Err(FestivalServiceError::DiscountWrongEvent);
        }
    }

    let amount = discount.amount_off(event.reg_fees);

    Ok((discount, amount))
}

// ── CreateDiscount ───────────────────────────────────────────────────────────

pub struct CreateDiscountInput {
    pub discount_type: String,
    pub discount_value: i64,
    /// Restrict the code to one account. Stored lowercase.
    pub user_email: Option<String>,
    /// Restrict the code to one event, by slug or uuid.
    pub event_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_usage: Option<i32>,
}

pub struct CreateDiscountUseCase<D: DiscountRepository, U: UserRepository, E: EventRepository> {
    pub discounts: D,
    pub users: U,
    pub events: E,
}

impl<D: DiscountRepository, U: UserRepository, E: EventRepository> CreateDiscountUseCase<D, U, E> {
    pub async fn execute(
        &self,
        input: CreateDiscountInput,
        created_by: &str,
    ) -> Result<Discount, FestivalServiceError> {
        // 1. Type and value bounds
        let discount_type = DiscountType::from_str(&input.discount_type)
            .ok_or(FestivalServiceError::InvalidDiscountType)?;
        let value_ok = match discount_type {
            DiscountType::Flat => input.discount_value > 0,
            DiscountType::Percentage => (1..=100).contains(&input.discount_value),
        };
        if !value_ok {
            return Err(FestivalServiceError::InvalidDiscountValue);
        }

        // 2. Optional account binding; the uuid is a best-effort backlink
        let user_email = match input.user_email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => {
                if !validate_email(email) {
                    return Err(FestivalServiceError::InvalidEmail);
                }
                Some(email.to_lowercase())
            }
            _ => None,
        };
        let user_id = match &user_email {
            Some(email) => self.users.find_by_email(email).await?.map(|user| user.id),
            None => None,
        };

        // 3. Optional event binding, with the display name snapshotted
        let (event_id, event_name) = match input.event_id.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                let event = find_event(&self.events, key).await?;
                (Some(event.id), Some(event.event_name))
            }
            _ => (None, None),
        };

        // 4. Fresh unique code, then the row
        let code = unique_discount_code(&self.discounts).await?;
        let discount = Discount {
            id: Uuid::new_v4(),
            code,
            user_id,
            user_email,
            discount_type,
            discount_value: input.discount_value,
            event_id,
            event_name,
            is_used: false,
            usage_count: 0,
            max_usage: input.max_usage.unwrap_or(1).max(1),
            used_at: None,
            expires_at: input.expires_at,
            created_at: Utc::now(),
            created_by: created_by.to_owned(),
        };

        self.discounts.create(&discount).await?;

        Ok(discount)
    }
}

// ── ValidateDiscount ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ValidateDiscountOutput {
    pub discount: Discount,
    pub amount: i64,
}

/// Read-only check from the submission form; nothing is consumed here.
pub struct ValidateDiscountUseCase<D: DiscountRepository, E: EventRepository> {
    pub discounts: D,
    pub events: E,
}

impl<D: DiscountRepository, E: EventRepository> ValidateDiscountUseCase<D, E> {
    pub async fn execute(
        &self,
        code: &str,
        user_email: &str,
        event_key: &str,
    ) -> Result<ValidateDiscountOutput, FestivalServiceError> {
        let event = find_event(&self.events, event_key).await?;
        let (discount, amount) = check_discount(&self.discounts, code, user_email, &event).await?;

        Ok(ValidateDiscountOutput { discount, amount })
    }
}

// ── ListDiscounts ────────────────────────────────────────────────────────────

pub struct ListDiscountsUseCase<D: DiscountRepository> {
    pub discounts: D,
}

impl<D: DiscountRepository> ListDiscountsUseCase<D> {
    pub async fn execute(
        &self,
        user_email: Option<&str>,
        event_id: Option<Uuid>,
        is_used: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Discount>, FestivalServiceError> {
        let user_email = user_email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_lowercase);

        self.discounts
            .list(user_email.as_deref(), event_id, is_used, page.clamped())
            .await
    }
}

// ── MyDiscounts ──────────────────────────────────────────────────────────────

pub struct MyDiscountsUseCase<D: DiscountRepository> {
    pub discounts: D,
}

impl<D: DiscountRepository> MyDiscountsUseCase<D> {
    pub async fn execute(&self, email: &str) -> Result<Vec<Discount>, FestivalServiceError> {
        self.discounts.list_by_email(&email.trim().to_lowercase()).await
    }
}

// ── DeleteDiscount ───────────────────────────────────────────────────────────

pub struct DeleteDiscountUseCase<D: DiscountRepository> {
    pub discounts: D,
}

impl<D: DiscountRepository> DeleteDiscountUseCase<D> {
    /// Accepts the human code or the row uuid.
    pub async fn execute(&self, key: &str) -> Result<(), FestivalServiceError> {
        let id = match self.discounts.find_by_code(&format_discount_code(key)).await? {
            Some(discount) => discount.id,
            None => key
                .parse::<Uuid>()
                .map_err(|_| FestivalServiceError::DiscountNotFound)?,
        };

        if !self.discounts.delete(id).await? {
            return Err(FestivalServiceError::DiscountNotFound);
        }

        Ok(())
    }
}

// ── DiscountStats ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountStats {
    pub total: u64,
    pub used: u64,
    pub unused: u64,
    /// Expired counts only codes that were never used.
    pub expired: u64,
    pub total_amount_issued: i64,
    pub total_amount_used: i64,
}

pub struct DiscountStatsUseCase<D: DiscountRepository> {
    pub discounts: D,
}

impl<D: DiscountRepository> DiscountStatsUseCase<D> {
    /// One full scan, folded here. The table is admin-sized.
    pub async fn execute(&self) -> Result<DiscountStats, FestivalServiceError> {
        let all = self.discounts.list_all().await?;
        let now = Utc::now();

        let mut stats = DiscountStats::default();
        for discount in &all {
            stats.total += 1;
            stats.total_amount_issued += discount.discount_value;
            if discount.is_used {
                stats.used += 1;
                stats.total_amount_used += discount.discount_value;
            } else {
                stats.unused += 1;
                if discount.is_expired(now) {
                    stats.expired += 1;
                }
            }
        }

        Ok(stats)
    }
}
