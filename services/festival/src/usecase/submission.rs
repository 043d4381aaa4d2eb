use chrono::Utc;
use uuid::Uuid;

use lumiere_domain::fees::calculate_total_fees;
use lumiere_domain::user::UserRole;

use crate::domain::repository::{
    DiscountRepository, EventRepository, SubmissionRepository, UserRepository,
};
use crate::domain::types::{
    MAX_TEAM_MEMBER_EMAILS, PaymentStatus, SUBMISSION_STATUS_SUBMITTED, Submission,
    validate_email, validate_film_link, validate_phone,
};
use crate::error::FestivalServiceError;
use crate::usecase::code::unique_submission_id;
use crate::usecase::discount::check_discount;
use crate::usecase::event::find_event;

/// Resolve a submission by its human-readable id first, uuid second.
pub(crate) async fn find_submission<S: SubmissionRepository>(
    submissions: &S,
    key: &str,
) -> Result<Submission, FestivalServiceError> {
    if let Some(submission) = submissions.find_by_submission_id(key).await? {
        return Ok(submission);
    }
    if let Ok(id) = key.parse::<Uuid>() {
        if let Some(submission) = submissions.find_by_id(id).await? {
            return Ok(submission);
        }
    }
    Err(FestivalServiceError::SubmissionNotFound)
}

// ── CreateSubmission ─────────────────────────────────────────────────────────

pub struct CreateSubmissionInput {
    /// Event slug or uuid.
    pub event_id: String,
    pub title: String,
    pub synopsis: String,
    pub duration_minutes: i32,
    pub language: String,
    pub director_name: String,
    pub director_email: String,
    pub director_phone: String,
    /// Emails of the other crew members; the submitter is implicit.
    pub team_member_emails: Vec<String>,
    pub film_link: String,
    pub poster_link: Option<String>,
    pub subtitles_link: Option<String>,
    pub accommodation_members: i32,
    pub discount_code: Option<String>,
}

pub struct CreateSubmissionUseCase<
    S: SubmissionRepository,
    U: UserRepository,
    E: EventRepository,
    D: DiscountRepository,
> {
    pub submissions: S,
    pub users: U,
    pub events: E,
    pub discounts: D,
}

impl<S, U, E, D> CreateSubmissionUseCase<S, U, E, D>
where
    S: SubmissionRepository,
    U: UserRepository,
    E: EventRepository,
    D: DiscountRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateSubmissionInput,
    ) -> Result<Submission, FestivalServiceError> {
        // 1. Field shape checks before any query
        let title = input.title.trim();
        if title.is_empty() {
            return Err(FestivalServiceError::MissingField("title"));
        }
        let synopsis = input.synopsis.trim();
        if synopsis.is_empty() {
            return Err(FestivalServiceError::MissingField("synopsis"));
        }
        if input.duration_minutes <= 0 {
            return Err(FestivalServiceError::InvalidDuration);
        }
        let language = input.language.trim();
        if language.is_empty() {
            return Err(FestivalServiceError::MissingField("language"));
        }
        let director_name = input.director_name.trim();
        if director_name.is_empty() {
            return Err(FestivalServiceError::MissingField("director_name"));
        }
        let director_email = input.director_email.trim().to_lowercase();
        if !validate_email(&director_email) {
            return Err(FestivalServiceError::InvalidEmail);
        }
        let director_phone = input.director_phone.trim();
        if !validate_phone(director_phone) {
            return Err(FestivalServiceError::InvalidPhoneNumber);
        }
        let film_link = input.film_link.trim();
        if film_link.is_empty() {
            return Err(FestivalServiceError::MissingField("film_link"));
        }
        if !validate_film_link(film_link) {
            return Err(FestivalServiceError::InvalidFilmLink);
        }

        // 2. Crew emails: blanks dropped, at most four besides the submitter
        let team_member_emails: Vec<String> = input
            .team_member_emails
            .iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        if team_member_emails.len() > MAX_TEAM_MEMBER_EMAILS {
            return Err(FestivalServiceError::TooManyTeamMembers);
        }

        // 3. Everyone on the form must hold an account
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)?;
        let mut emails_to_check = vec![director_email.clone()];
        emails_to_check.extend(team_member_emails.iter().cloned());
        let unregistered = self.users.find_unregistered(&emails_to_check).await?;
        if !unregistered.is_empty() {
            return Err(FestivalServiceError::UnregisteredEmails(
                unregistered.join(", "),
            ));
        }

        // 4. Event must exist, and one submission per user per event
        let event = find_event(&self.events, &input.event_id).await?;
        if self
            .submissions
            .exists_for_user_event(user.id, event.id)
            .await?
        {
            return Err(FestivalServiceError::AlreadyRegistered);
        }

        // 5. Discount check happens before the fee math, not after
        let discount = match input.discount_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                Some(check_discount(&self.discounts, code, &user.email, &event).await?)
            }
            _ => None,
        };
        let discount_amount = discount.as_ref().map_or(0, |(_, amount)| *amount);

        // 6. Fee breakdown, floored at zero
        let accommodation_members = input.accommodation_members.max(0);
        let fees = calculate_total_fees(event.reg_fees, accommodation_members, discount_amount);

        // 7. Fresh unique id, then the row
        let submission_id = unique_submission_id(&self.submissions).await?;
        let now = Utc::now();
        let total_team_members = team_member_emails.len() as i32 + 1;
        let submission = Submission {
            id: Uuid::new_v4(),
            submission_id,
            user_id: user.id,
            user_email: user.email.clone(),
            event_id: event.id,
            title: title.to_owned(),
            synopsis: synopsis.to_owned(),
            duration_minutes: input.duration_minutes,
            language: language.to_owned(),
            director_name: director_name.to_owned(),
            director_email,
            director_phone: director_phone.to_owned(),
            team_member_emails,
            total_team_members,
            film_link: film_link.to_owned(),
            poster_link: input
                .poster_link
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            subtitles_link: input
                .subtitles_link
                .as_deref()
                .map(str::trim)
                .filter(|link| !link.is_empty())
                .map(str::to_owned),
            fee: event.reg_fees,
            discount_code: discount.as_ref().map(|(d, _)| d.code.clone()),
            discount_amount,
            accommodation_members,
            accommodation_fees: fees.accommodation_fees,
            total_fees: fees.total,
            status: SUBMISSION_STATUS_SUBMITTED.to_owned(),
            payment_status: PaymentStatus::Pending,
            transaction_id: None,
            payment_submitted_at: None,
            rejection_reason: None,
            verified_by: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        };
        self.submissions.create(&submission).await?;

        // 8. Post-insert side effects: consume the code, note the event
        if let Some((discount, _)) = &discount {
            self.discounts.record_usage(discount.id).await?;
        }
        self.users.add_event(user.id, event.id).await?;

        Ok(submission)
    }
}

// ── SubmitPayment ────────────────────────────────────────────────────────────

pub struct SubmitPaymentUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> SubmitPaymentUseCase<S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        key: &str,
        transaction_id: &str,
    ) -> Result<Submission, FestivalServiceError> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(FestivalServiceError::MissingField("transaction_id"));
        }

        let submission = find_submission(&self.submissions, key).await?;

        // Owner-only, and the owner gets exactly one shot
        if submission.user_id != user_id {
            return Err(FestivalServiceError::Forbidden);
        }
        if submission.payment_status != PaymentStatus::Pending {
            return Err(FestivalServiceError::InvalidPaymentState);
        }

        if !self
            .submissions
            .submit_payment(submission.id, transaction_id)
            .await?
        {
            return Err(FestivalServiceError::SubmissionNotFound);
        }

        self.submissions
            .find_by_id(submission.id)
            .await?
            .ok_or(FestivalServiceError::SubmissionNotFound)
    }
}

// ── GetSubmission ────────────────────────────────────────────────────────────

pub struct GetSubmissionUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> GetSubmissionUseCase<S> {
    /// Owners see their own; admins see everything.
    pub async fn execute(
        &self,
        user_id: Uuid,
        user_role: u8,
        key: &str,
    ) -> Result<Submission, FestivalServiceError> {
        let submission = find_submission(&self.submissions, key).await?;

        if submission.user_id != user_id && user_role < UserRole::Admin.as_u8() {
            return Err(FestivalServiceError::Forbidden);
        }

        Ok(submission)
    }
}

// ── MySubmissions ────────────────────────────────────────────────────────────

pub struct MySubmissionsUseCase<S: SubmissionRepository> {
    pub submissions: S,
}

impl<S: SubmissionRepository> MySubmissionsUseCase<S> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Submission>, FestivalServiceError> {
        self.submissions.list_by_user(user_id).await
    }
}
