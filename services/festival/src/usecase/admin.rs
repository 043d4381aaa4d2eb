use uuid::Uuid;

use lumiere_domain::pagination::{PageRequest, Sort};
use lumiere_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{SubmissionRepository, UserRepository};
use crate::domain::types::{
    AdminUserChanges, PaymentReview, PaymentStatus, Submission, User, validate_phone,
};
use crate::error::FestivalServiceError;
use crate::usecase::submission::find_submission;

/// `GET /admin/activities` caps its window here.
const MAX_ACTIVITY_LIMIT: u64 = 100;
const DEFAULT_ACTIVITY_LIMIT: u64 = 10;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    /// `search` is an email prefix; matching is done lowercase.
    pub async fn execute(
        &self,
        search: Option<&str>,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<User>, FestivalServiceError> {
        let search = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.users.list(search.as_deref(), sort, page.clamped()).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
    pub role: Option<u8>,
    pub status: Option<String>,
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, FestivalServiceError> {
        // 1. Normalize and validate whatever was sent
        let name = match input.name.as_deref().map(str::trim) {
            Some("") => return Err(FestivalServiceError::MissingField("name")),
            other => other.map(str::to_owned),
        };
        let phone_number = match input.phone_number.as_deref().map(str::trim) {
            Some(phone) if !validate_phone(phone) => {
                return Err(FestivalServiceError::InvalidPhoneNumber);
            }
            other => other.map(str::to_owned),
        };
        let college_name = match input.college_name.as_deref().map(str::trim) {
            Some("") => return Err(FestivalServiceError::MissingField("college_name")),
            other => other.map(str::to_owned),
        };
        let role = match input.role {
            Some(role) => Some(
                UserRole::from_u8(role)
                    .ok_or(FestivalServiceError::InvalidRole)?
                    .as_u8(),
            ),
            None => None,
        };
        let status = match input.status.as_deref() {
            Some(status) => {
                Some(UserStatus::from_str(status).ok_or(FestivalServiceError::InvalidUserStatus)?)
            }
            None => None,
        };

        let changes = AdminUserChanges {
            name,
            phone_number,
            college_name,
            role,
            status,
        };
        if changes.is_empty() {
            return Err(FestivalServiceError::EmptyUpdate);
        }

        // 2. Sparse write, then re-read the row
        if !self.users.update_admin(user_id, &changes).await? {
            return Err(FestivalServiceError::UserNotFound);
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)
    }
}

// ── ListSubmissions ──────────────────────────────────────────────────────────

pub struct ListSubmissionsUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> ListSubmissionsUseCase<S> {
    pub async fn execute(
        &self,
        payment_status: Option<PaymentStatus>,
        event_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, FestivalServiceError> {
        self.submissions
            .list(payment_status, event_id, page.clamped())
            .await
    }
}

// ── ReviewPayment ────────────────────────────────────────────────────────────

pub struct ReviewPaymentInput {
    pub payment_status: String,
    pub rejection_reason: Option<String>,
}

pub struct ReviewPaymentUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> ReviewPaymentUseCase<S> {
    /// Admin override to any payment status, including back to `pending`.
    /// Every review stamps the reviewer, whichever way it went.
    pub async fn execute(
        &self,
        admin_email: &str,
        key: &str,
        input: ReviewPaymentInput,
    ) -> Result<Submission, FestivalServiceError> {
        let payment_status = PaymentStatus::from_kebab_case(&input.payment_status)
            .ok_or(FestivalServiceError::InvalidPaymentStatus)?;

        // The reason column only means something on a rejection
        let rejection_reason = input
            .rejection_reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty() && payment_status == PaymentStatus::Rejected)
            .map(str::to_owned);

        let submission = find_submission(&self.submissions, key).await?;
        let review = PaymentReview {
            payment_status,
            rejection_reason,
            verified_by: admin_email.to_owned(),
        };
        if !self.submissions.review_payment(submission.id, &review).await? {
            return Err(FestivalServiceError::SubmissionNotFound);
        }

        self.submissions
            .find_by_id(submission.id)
            .await?
            .ok_or(FestivalServiceError::SubmissionNotFound)
    }
}

// ── DashboardStats ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_submissions: u64,
    pub pending_payments: u64,
    pub verified_payments: u64,
    /// Σ `total_fees` over verified submissions, in rupees.
    pub total_revenue: i64,
}

pub struct DashboardStatsUseCase<U: UserRepository, S: SubmissionRepository> {
    pub users: U,
    pub submissions: S,
}

impl<U: UserRepository, S: SubmissionRepository> DashboardStatsUseCase<U, S> {
    pub async fn execute(&self) -> Result<DashboardStats, FestivalServiceError> {
        let total_users = self.users.count().await?;
        let total_submissions = self.submissions.count().await?;
        let pending_payments = self
            .submissions
            .count_by_payment_status(PaymentStatus::Pending)
            .await?;
        let verified_payments = self
            .submissions
            .count_by_payment_status(PaymentStatus::Verified)
            .await?;
        let total_revenue = self.submissions.sum_verified_fees().await?;

        Ok(DashboardStats {
            total_users,
            total_submissions,
            pending_payments,
            verified_payments,
            total_revenue,
        })
    }
}

// ── RecentActivities ─────────────────────────────────────────────────────────

pub struct RecentActivitiesUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> RecentActivitiesUseCase<S> {
    pub async fn execute(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<Submission>, FestivalServiceError> {
        let limit = limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);

        self.submissions.recent(limit).await
    }
}
