use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_domain::user::UserStatus;

/// Extra team-member emails allowed on a submission, director excluded.
pub const MAX_TEAM_MEMBER_EMAILS: usize = 4;

/// Team size used when the event does not constrain it.
pub const DEFAULT_TEAM_MAX_MEMBERS: i32 = 5;

/// Human-readable submission ids are `LUM-2026-` + a zero-padded 4-digit number.
pub const SUBMISSION_ID_PREFIX: &str = "LUM-2026-";

/// The lifecycle lives entirely in `payment_status`; `status` never moves.
pub const SUBMISSION_STATUS_SUBMITTED: &str = "submitted";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Users ────────────────────────────────────────────────────────────────────

/// Participant or admin account.
///
/// `event_ids` and `team_ids` are denormalized side-lists kept in step by
/// separate writes after the owning row is written.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub college_name: String,
    pub role: u8,
    pub status: UserStatus,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub event_ids: Vec<Uuid>,
    pub team_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-service profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.college_name.is_none()
    }
}

/// Admin-side user update. Superset of [`ProfileChanges`].
#[derive(Debug, Clone, Default)]
pub struct AdminUserChanges {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
    pub role: Option<u8>,
    pub status: Option<UserStatus>,
}

impl AdminUserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone_number.is_none()
            && self.college_name.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Festival event or competition.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub event_id: String,
    pub category: String,
    pub event_name: String,
    pub reg_fees: i64,
    pub date_time: DateTime<Utc>,
    pub end_date_time: Option<DateTime<Utc>>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// A `team_limit` of 0 means unlimited.
    pub fn is_full(&self) -> bool {
        self.team_limit > 0 && self.current_teams >= self.team_limit
    }
}

/// Admin-side partial event update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub category: Option<String>,
    pub event_name: Option<String>,
    pub reg_fees: Option<i64>,
    pub date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
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

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.event_name.is_none()
            && self.reg_fees.is_none()
            && self.date_time.is_none()
            && self.end_date_time.is_none()
            && self.location.is_none()
            && self.brief_description.is_none()
            && self.image.is_none()
            && self.pdf_link.is_none()
            && self.contact_info.is_none()
            && self.is_team_event.is_none()
            && self.min_team_members.is_none()
            && self.max_team_members.is_none()
            && self.team_limit.is_none()
    }
}

// ── Submissions ──────────────────────────────────────────────────────────────

/// Payment half of the submission lifecycle.
///
/// The primary path is `pending → confirmation-pending → verified | rejected`
/// and only admins move past `confirmation-pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    ConfirmationPending,
    Verified,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ConfirmationPending => "confirmation-pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmation-pending" => Some(Self::ConfirmationPending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Film submission carrying the whole registration/payment lifecycle.
#[derive(Debug, Clone)]
pub struct Submission {
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
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_submitted_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin payment override. Always stamps who reviewed and when.
#[derive(Debug, Clone)]
pub struct PaymentReview {
    pub payment_status: PaymentStatus,
    pub rejection_reason: Option<String>,
    pub verified_by: String,
}

// ── Teams ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamStatus {
    Open,
    Full,
    Locked,
}

impl TeamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Full => "full",
            Self::Locked => "locked",
        }
    }

    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "full" => Some(Self::Full),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }

    /// Status implied by the member count alone; `locked` only ever comes
    /// from the lock toggle.
    pub fn for_count(current: i32, max: i32) -> Self {
        if current >= max { Self::Full } else { Self::Open }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Leader,
    Member,
}

/// One entry of `Team::members`, stored as a JSON array on the team row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

/// Team for a team event.
///
/// `members[0]` is always the leader and `leader_id` never changes;
/// `current_members` mirrors `members.len()`.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub team_id: String,
    pub event_id: Uuid,
    pub event_name: String,
    pub team_name: String,
    pub leader_id: Uuid,
    pub leader_email: String,
    pub leader_name: String,
    pub members: Vec<TeamMember>,
    pub max_members: i32,
    pub current_members: i32,
    pub invite_code: String,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|member| member.user_id == user_id)
    }
}

// ── Discounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    Flat,
    Percentage,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "FLAT",
            Self::Percentage => "PERCENTAGE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "FLAT" => Some(Self::Flat),
            "PERCENTAGE" => Some(Self::Percentage),
            _ => None,
        }
    }
}

/// Discount code, multi-use with `max_usage` 1 reproducing single-use codes.
///
/// Null `user_email` means a public code; null `event_id` means the code is
/// valid for every event.
#[derive(Debug, Clone)]
pub struct Discount {
    pub id: Uuid,
    pub code: String,
    pub user_id: Option<Uuid>,
    pub user_email: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub event_id: Option<Uuid>,
    pub event_name: Option<String>,
    pub is_used: bool,
    pub usage_count: i32,
    pub max_usage: i32,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Discount {
    /// Fully consumed once the counter reaches `max_usage`.
    pub fn is_exhausted(&self) -> bool {
        self.usage_count >= self.max_usage
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    /// Rupee amount off a fee: the flat value, or a floored percentage of it.
    pub fn amount_off(&self, fee: i64) -> i64 {
        match self.discount_type {
            DiscountType::Flat => self.discount_value,
            DiscountType::Percentage => fee * self.discount_value / 100,
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// One `@`, no whitespace, dotted domain.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') || domain.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Indian mobile number: exactly 10 digits, first digit 6-9.
pub fn validate_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10 && matches!(bytes[0], b'6'..=b'9') && bytes.iter().all(u8::is_ascii_digit)
}

pub fn validate_password(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len())
}

/// Film links must point at Google Drive.
pub fn validate_film_link(link: &str) -> bool {
    link.contains("drive.google.com")
}
