#![allow(async_fn_in_trait)]

use uuid::Uuid;

use lumiere_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    AdminUserChanges, Discount, Event, EventChanges, PaymentReview, PaymentStatus, ProfileChanges,
    Submission, Team, TeamMember, TeamStatus, User,
};
use crate::error::FestivalServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FestivalServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FestivalServiceError>;

    /// Returns the user together with the stored password hash.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, FestivalServiceError>;

    async fn create(&self, user: &User, password_hash: &str) -> Result<(), FestivalServiceError>;

    async fn email_exists(&self, email: &str) -> Result<bool, FestivalServiceError>;

    async fn referral_code_exists(&self, code: &str) -> Result<bool, FestivalServiceError>;

    /// Returns the subset of `emails` that belongs to no account.
    async fn find_unregistered(
        &self,
        emails: &[String],
    ) -> Result<Vec<String>, FestivalServiceError>;

    /// Partial self-service update. Returns `true` if the user exists.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<bool, FestivalServiceError>;

    /// Partial admin update. Returns `true` if the user exists.
    async fn update_admin(
        &self,
        id: Uuid,
        changes: &AdminUserChanges,
    ) -> Result<bool, FestivalServiceError>;

    /// Append an event to the `event_ids` side-list.
    async fn add_event(&self, id: Uuid, event_id: Uuid) -> Result<bool, FestivalServiceError>;

    /// Append a team to the `team_ids` side-list.
    async fn add_team(&self, id: Uuid, team_id: Uuid) -> Result<bool, FestivalServiceError>;

    /// Drop a team from the `team_ids` side-list.
    async fn remove_team(&self, id: Uuid, team_id: Uuid) -> Result<bool, FestivalServiceError>;

    /// Admin listing, ordered by creation time. `search` is an email prefix.
    async fn list(
        &self,
        search: Option<&str>,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<User>, FestivalServiceError>;

    async fn count(&self) -> Result<u64, FestivalServiceError>;
}

/// Repository for festival events.
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<(), FestivalServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, FestivalServiceError>;

    /// Lookup by the human-readable slug.
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<Event>, FestivalServiceError>;

    /// All events ordered by `date_time`, optionally one category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Event>, FestivalServiceError>;

    /// Partial update. Returns `true` if the event exists.
    async fn update(
        &self,
        id: Uuid,
        changes: &EventChanges,
    ) -> Result<bool, FestivalServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError>;

    /// Atomic `current_teams = current_teams + delta`.
    async fn adjust_current_teams(
        &self,
        id: Uuid,
        delta: i32,
    ) -> Result<bool, FestivalServiceError>;
}

/// Repository for film submissions.
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &Submission) -> Result<(), FestivalServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, FestivalServiceError>;

    /// Lookup by the human-readable `LUM-2026-NNNN` id.
    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<Submission>, FestivalServiceError>;

    async fn submission_id_exists(
        &self,
        submission_id: &str,
    ) -> Result<bool, FestivalServiceError>;

    /// One submission per (user, event); the pre-write duplicate check.
    async fn exists_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, FestivalServiceError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Submission>, FestivalServiceError>;

    /// Admin listing, newest first.
    async fn list(
        &self,
        payment_status: Option<PaymentStatus>,
        event_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, FestivalServiceError>;

    /// Move `pending → confirmation-pending`, storing the transaction id and
    /// the submission time. Returns `true` if the row exists.
    async fn submit_payment(
        &self,
        id: Uuid,
        transaction_id: &str,
    ) -> Result<bool, FestivalServiceError>;

    /// Admin override to any payment status. Always stamps `verified_by` and
    /// `verified_at`. Returns `true` if the row exists.
    async fn review_payment(
        &self,
        id: Uuid,
        review: &PaymentReview,
    ) -> Result<bool, FestivalServiceError>;

    async fn count(&self) -> Result<u64, FestivalServiceError>;

    async fn count_by_payment_status(
        &self,
        payment_status: PaymentStatus,
    ) -> Result<u64, FestivalServiceError>;

    /// Σ `total_fees` over verified submissions.
    async fn sum_verified_fees(&self) -> Result<i64, FestivalServiceError>;

    /// Latest submissions, newest first.
    async fn recent(&self, limit: u64) -> Result<Vec<Submission>, FestivalServiceError>;
}

/// Repository for teams.
pub trait TeamRepository: Send + Sync {
    async fn create(&self, team: &Team) -> Result<(), FestivalServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, FestivalServiceError>;

    /// Lookup by the human-readable `TEAM-…` id.
    async fn find_by_team_id(&self, team_id: &str) -> Result<Option<Team>, FestivalServiceError>;

    async fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Team>, FestivalServiceError>;

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Team>, FestivalServiceError>;

    /// Every team; membership is filtered in the service, not the query.
    async fn list_all(&self) -> Result<Vec<Team>, FestivalServiceError>;

    /// Rewrite the member list; `current_members` follows `members.len()`.
    /// Returns `true` if the team exists.
    async fn update_members(
        &self,
        id: Uuid,
        members: &[TeamMember],
        status: TeamStatus,
    ) -> Result<bool, FestivalServiceError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: TeamStatus,
    ) -> Result<bool, FestivalServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError>;
}

/// Repository for discount codes.
pub trait DiscountRepository: Send + Sync {
    async fn create(&self, discount: &Discount) -> Result<(), FestivalServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Discount>, FestivalServiceError>;

    async fn code_exists(&self, code: &str) -> Result<bool, FestivalServiceError>;

    /// Atomic redemption: bump `usage_count`, stamp `used_at`, refresh
    /// `is_used`. Returns `true` if the row exists.
    async fn record_usage(&self, id: Uuid) -> Result<bool, FestivalServiceError>;

    /// Admin listing, newest first.
    async fn list(
        &self,
        user_email: Option<&str>,
        event_id: Option<Uuid>,
        is_used: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Discount>, FestivalServiceError>;

    /// Codes bound to one user's email, newest first.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Discount>, FestivalServiceError>;

    /// Every code; the stats fold runs in the service.
    async fn list_all(&self) -> Result<Vec<Discount>, FestivalServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError>;
}
