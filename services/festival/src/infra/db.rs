use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Alias, Expr},
};
use uuid::Uuid;

use lumiere_domain::pagination::{PageRequest, Sort};
use lumiere_domain::user::UserStatus;
use lumiere_festival_schema::{discounts, events, submissions, teams, users};

use crate::domain::repository::{
    DiscountRepository, EventRepository, SubmissionRepository, TeamRepository, UserRepository,
};
use crate::domain::types::{
    AdminUserChanges, Discount, DiscountType, Event, EventChanges, PaymentReview, PaymentStatus,
    ProfileChanges, Submission, Team, TeamMember, TeamStatus, User,
};
use crate::error::FestivalServiceError;

// JSON list columns read as empty when malformed instead of failing the row.

fn uuid_list(value: serde_json::Value) -> Vec<Uuid> {
    serde_json::from_value(value).unwrap_or_default()
}

fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

fn member_list(value: serde_json::Value) -> Vec<TeamMember> {
    serde_json::from_value(value).unwrap_or_default()
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FestivalServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FestivalServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, FestivalServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user credentials")?;
        Ok(model.map(|model| {
            let password_hash = model.password_hash.clone();
            (user_from_model(model), password_hash)
        }))
    }

    async fn create(&self, user: &User, password_hash: &str) -> Result<(), FestivalServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            college_name: Set(user.college_name.clone()),
            password_hash: Set(password_hash.to_owned()),
            role: Set(user.role as i16),
            status: Set(user.status.as_str().to_owned()),
            referral_code: Set(user.referral_code.clone()),
            referred_by: Set(user.referred_by.clone()),
            event_ids: Set(serde_json::json!(user.event_ids)),
            team_ids: Set(serde_json::json!(user.team_ids)),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, FestivalServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("check email exists")?;
        Ok(count > 0)
    }

    async fn referral_code_exists(&self, code: &str) -> Result<bool, FestivalServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::ReferralCode.eq(code))
            .count(&self.db)
            .await
            .context("check referral code exists")?;
        Ok(count > 0)
    }

    async fn find_unregistered(
        &self,
        emails: &[String],
    ) -> Result<Vec<String>, FestivalServiceError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let registered: Vec<String> = users::Entity::find()
            .select_only()
            .column(users::Column::Email)
            .filter(users::Column::Email.is_in(emails.iter().cloned()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find registered emails")?;
        let registered: HashSet<String> = registered.into_iter().collect();
        Ok(emails
            .iter()
            .filter(|email| !registered.contains(email.as_str()))
            .cloned()
            .collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<bool, FestivalServiceError> {
        let mut user = users::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            user.name = Set(name.clone());
        }
        if let Some(phone_number) = &changes.phone_number {
            user.phone_number = Set(phone_number.clone());
        }
        if let Some(college_name) = &changes.college_name {
            user.college_name = Set(college_name.clone());
        }
        let result = users::Entity::update_many()
            .set(user)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user profile")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_admin(
        &self,
        id: Uuid,
        changes: &AdminUserChanges,
    ) -> Result<bool, FestivalServiceError> {
        let mut user = users::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            user.name = Set(name.clone());
        }
        if let Some(phone_number) = &changes.phone_number {
            user.phone_number = Set(phone_number.clone());
        }
        if let Some(college_name) = &changes.college_name {
            user.college_name = Set(college_name.clone());
        }
        if let Some(role) = changes.role {
            user.role = Set(role as i16);
        }
        if let Some(status) = changes.status {
            user.status = Set(status.as_str().to_owned());
        }
        let result = users::Entity::update_many()
            .set(user)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user as admin")?;
        Ok(result.rows_affected > 0)
    }

    async fn add_event(&self, id: Uuid, event_id: Uuid) -> Result<bool, FestivalServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for event list")?;
        let Some(model) = model else {
            return Ok(false);
        };
        let mut event_ids = uuid_list(model.event_ids);
        // The side-lists are sets; repeat appends are no-ops.
        if event_ids.contains(&event_id) {
            return Ok(true);
        }
        event_ids.push(event_id);
        let user = users::ActiveModel {
            event_ids: Set(serde_json::json!(event_ids)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = users::Entity::update_many()
            .set(user)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("append user event")?;
        Ok(result.rows_affected > 0)
    }

    async fn add_team(&self, id: Uuid, team_id: Uuid) -> Result<bool, FestivalServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for team list")?;
        let Some(model) = model else {
            return Ok(false);
        };
        let mut team_ids = uuid_list(model.team_ids);
        if team_ids.contains(&team_id) {
            return Ok(true);
        }
        team_ids.push(team_id);
        let user = users::ActiveModel {
            team_ids: Set(serde_json::json!(team_ids)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = users::Entity::update_many()
            .set(user)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("append user team")?;
        Ok(result.rows_affected > 0)
    }

    async fn remove_team(&self, id: Uuid, team_id: Uuid) -> Result<bool, FestivalServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for team list")?;
        let Some(model) = model else {
            return Ok(false);
        };
        let mut team_ids = uuid_list(model.team_ids);
        let before = team_ids.len();
        team_ids.retain(|id| *id != team_id);
        if team_ids.len() == before {
            return Ok(true);
        }
        let user = users::ActiveModel {
            team_ids: Set(serde_json::json!(team_ids)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = users::Entity::update_many()
            .set(user)
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("drop user team")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        search: Option<&str>,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<User>, FestivalServiceError> {
        let page = page.clamped();
        let mut query = users::Entity::find();
        if let Some(prefix) = search {
            query = query.filter(users::Column::Email.starts_with(prefix));
        }
        query = match sort {
            Sort::Desc => query.order_by_desc(users::Column::CreatedAt),
            Sort::Asc => query.order_by_asc(users::Column::CreatedAt),
        };
        let models = query
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn count(&self) -> Result<u64, FestivalServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone_number: model.phone_number,
        college_name: model.college_name,
        role: model.role as u8,
        status: UserStatus::from_str(&model.status).unwrap_or(UserStatus::Active),
        referral_code: model.referral_code,
        referred_by: model.referred_by,
        event_ids: uuid_list(model.event_ids),
        team_ids: uuid_list(model.team_ids),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Event repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl EventRepository for DbEventRepository {
    async fn create(&self, event: &Event) -> Result<(), FestivalServiceError> {
        events::ActiveModel {
            id: Set(event.id),
            event_id: Set(event.event_id.clone()),
            category: Set(event.category.clone()),
            event_name: Set(event.event_name.clone()),
            reg_fees: Set(event.reg_fees),
            date_time: Set(event.date_time),
            end_date_time: Set(event.end_date_time),
            location: Set(event.location.clone()),
            brief_description: Set(event.brief_description.clone()),
            image: Set(event.image.clone()),
            pdf_link: Set(event.pdf_link.clone()),
            contact_info: Set(event.contact_info.clone()),
            is_team_event: Set(event.is_team_event),
            min_team_members: Set(event.min_team_members),
            max_team_members: Set(event.max_team_members),
            team_limit: Set(event.team_limit),
            current_teams: Set(event.current_teams),
            created_at: Set(event.created_at),
            updated_at: Set(event.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create event")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, FestivalServiceError> {
        let model = events::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find event by id")?;
        Ok(model.map(event_from_model))
    }

    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<Event>, FestivalServiceError> {
        let model = events::Entity::find()
            .filter(events::Column::EventId.eq(event_id))
            .one(&self.db)
            .await
            .context("find event by slug")?;
        Ok(model.map(event_from_model))
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Event>, FestivalServiceError> {
        let mut query = events::Entity::find();
        if let Some(category) = category {
            query = query.filter(events::Column::Category.eq(category));
        }
        let models = query
            .order_by_asc(events::Column::DateTime)
            .all(&self.db)
            .await
            .context("list events")?;
        Ok(models.into_iter().map(event_from_model).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &EventChanges,
    ) -> Result<bool, FestivalServiceError> {
        let mut event = events::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(category) = &changes.category {
            event.category = Set(category.clone());
        }
        if let Some(event_name) = &changes.event_name {
            event.event_name = Set(event_name.clone());
        }
        if let Some(reg_fees) = changes.reg_fees {
            event.reg_fees = Set(reg_fees);
        }
        if let Some(date_time) = changes.date_time {
            event.date_time = Set(date_time);
        }
        if let Some(end_date_time) = changes.end_date_time {
            event.end_date_time = Set(Some(end_date_time));
        }
        if let Some(location) = &changes.location {
            event.location = Set(Some(location.clone()));
        }
        if let Some(brief_description) = &changes.brief_description {
            event.brief_description = Set(Some(brief_description.clone()));
        }
        if let Some(image) = &changes.image {
            event.image = Set(Some(image.clone()));
        }
        if let Some(pdf_link) = &changes.pdf_link {
            event.pdf_link = Set(Some(pdf_link.clone()));
        }
        if let Some(contact_info) = &changes.contact_info {
            event.contact_info = Set(Some(contact_info.clone()));
        }
        if let Some(is_team_event) = changes.is_team_event {
            event.is_team_event = Set(is_team_event);
        }
        if let Some(min_team_members) = changes.min_team_members {
            event.min_team_members = Set(min_team_members);
        }
        if let Some(max_team_members) = changes.max_team_members {
            event.max_team_members = Set(max_team_members);
        }
        if let Some(team_limit) = changes.team_limit {
            event.team_limit = Set(team_limit);
        }
        let result = events::Entity::update_many()
            .set(event)
            .filter(events::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update event")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError> {
        let result = events::Entity::delete_many()
            .filter(events::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete event")?;
        Ok(result.rows_affected > 0)
    }

    async fn adjust_current_teams(
        &self,
        id: Uuid,
        delta: i32,
    ) -> Result<bool, FestivalServiceError> {
        let result = events::Entity::update_many()
            .col_expr(
                events::Column::CurrentTeams,
                Expr::col(events::Column::CurrentTeams).add(delta),
            )
            .filter(events::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("adjust current teams")?;
        Ok(result.rows_affected > 0)
    }
}

fn event_from_model(model: events::Model) -> Event {
    Event {
        id: model.id,
        event_id: model.event_id,
        category: model.category,
        event_name: model.event_name,
        reg_fees: model.reg_fees,
        date_time: model.date_time,
        end_date_time: model.end_date_time,
        location: model.location,
        brief_description: model.brief_description,
        image: model.image,
        pdf_link: model.pdf_link,
        contact_info: model.contact_info,
        is_team_event: model.is_team_event,
        min_team_members: model.min_team_members,
        max_team_members: model.max_team_members,
        team_limit: model.team_limit,
        current_teams: model.current_teams,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Submission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubmissionRepository {
    pub db: DatabaseConnection,
}

impl SubmissionRepository for DbSubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<(), FestivalServiceError> {
        submissions::ActiveModel {
            id: Set(submission.id),
            submission_id: Set(submission.submission_id.clone()),
            user_id: Set(submission.user_id),
            user_email: Set(submission.user_email.clone()),
            event_id: Set(submission.event_id),
            title: Set(submission.title.clone()),
            synopsis: Set(submission.synopsis.clone()),
            duration_minutes: Set(submission.duration_minutes),
            language: Set(submission.language.clone()),
            director_name: Set(submission.director_name.clone()),
            director_email: Set(submission.director_email.clone()),
            director_phone: Set(submission.director_phone.clone()),
            team_member_emails: Set(serde_json::json!(submission.team_member_emails)),
            total_team_members: Set(submission.total_team_members),
            film_link: Set(submission.film_link.clone()),
            poster_link: Set(submission.poster_link.clone()),
            subtitles_link: Set(submission.subtitles_link.clone()),
            fee: Set(submission.fee),
            discount_code: Set(submission.discount_code.clone()),
            discount_amount: Set(submission.discount_amount),
            accommodation_members: Set(submission.accommodation_members),
            accommodation_fees: Set(submission.accommodation_fees),
            total_fees: Set(submission.total_fees),
            status: Set(submission.status.clone()),
            payment_status: Set(submission.payment_status.as_str().to_owned()),
            transaction_id: Set(submission.transaction_id.clone()),
            payment_submitted_at: Set(submission.payment_submitted_at),
            rejection_reason: Set(submission.rejection_reason.clone()),
            verified_by: Set(submission.verified_by.clone()),
            verified_at: Set(submission.verified_at),
            created_at: Set(submission.created_at),
            updated_at: Set(submission.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create submission")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, FestivalServiceError> {
        let model = submissions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find submission by id")?;
        Ok(model.map(submission_from_model))
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<Submission>, FestivalServiceError> {
        let model = submissions::Entity::find()
            .filter(submissions::Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .context("find submission by public id")?;
        Ok(model.map(submission_from_model))
    }

    async fn submission_id_exists(
        &self,
        submission_id: &str,
    ) -> Result<bool, FestivalServiceError> {
        let count = submissions::Entity::find()
            .filter(submissions::Column::SubmissionId.eq(submission_id))
            .count(&self.db)
            .await
            .context("check submission id exists")?;
        Ok(count > 0)
    }

    async fn exists_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, FestivalServiceError> {
        let count = submissions::Entity::find()
            .filter(submissions::Column::UserId.eq(user_id))
            .filter(submissions::Column::EventId.eq(event_id))
            .count(&self.db)
            .await
            .context("check submission exists for user and event")?;
        Ok(count > 0)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Submission>, FestivalServiceError> {
        let models = submissions::Entity::find()
            .filter(submissions::Column::UserId.eq(user_id))
            .order_by_desc(submissions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list submissions by user")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }

    async fn list(
        &self,
        payment_status: Option<PaymentStatus>,
        event_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, FestivalServiceError> {
        let page = page.clamped();
        let mut query = submissions::Entity::find();
        if let Some(payment_status) = payment_status {
            query = query
                .filter(submissions::Column::PaymentStatus.eq(payment_status.as_str()));
        }
        if let Some(event_id) = event_id {
            query = query.filter(submissions::Column::EventId.eq(event_id));
        }
        let models = query
            .order_by_desc(submissions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list submissions")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }

    async fn submit_payment(
        &self,
        id: Uuid,
        transaction_id: &str,
    ) -> Result<bool, FestivalServiceError> {
        let now = Utc::now();
        let submission = submissions::ActiveModel {
            payment_status: Set(PaymentStatus::ConfirmationPending.as_str().to_owned()),
            transaction_id: Set(Some(transaction_id.to_owned())),
            payment_submitted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = submissions::Entity::update_many()
            .set(submission)
            .filter(submissions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("submit payment")?;
        Ok(result.rows_affected > 0)
    }

    async fn review_payment(
        &self,
        id: Uuid,
        review: &PaymentReview,
    ) -> Result<bool, FestivalServiceError> {
        let now = Utc::now();
        let submission = submissions::ActiveModel {
            payment_status: Set(review.payment_status.as_str().to_owned()),
            rejection_reason: Set(review.rejection_reason.clone()),
            verified_by: Set(Some(review.verified_by.clone())),
            verified_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = submissions::Entity::update_many()
            .set(submission)
            .filter(submissions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("review payment")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, FestivalServiceError> {
        let count = submissions::Entity::find()
            .count(&self.db)
            .await
            .context("count submissions")?;
        Ok(count)
    }

    async fn count_by_payment_status(
        &self,
        payment_status: PaymentStatus,
    ) -> Result<u64, FestivalServiceError> {
        let count = submissions::Entity::find()
            .filter(submissions::Column::PaymentStatus.eq(payment_status.as_str()))
            .count(&self.db)
            .await
            .context("count submissions by payment status")?;
        Ok(count)
    }

    async fn sum_verified_fees(&self) -> Result<i64, FestivalServiceError> {
        // SUM over bigint comes back as numeric, so cast before decoding.
        let total: Option<Option<i64>> = submissions::Entity::find()
            .select_only()
            .column_as(
                submissions::Column::TotalFees.sum().cast_as(Alias::new("bigint")),
                "total",
            )
            .filter(submissions::Column::PaymentStatus.eq(PaymentStatus::Verified.as_str()))
            .into_tuple()
            .one(&self.db)
            .await
            .context("sum verified fees")?;
        Ok(total.flatten().unwrap_or(0))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Submission>, FestivalServiceError> {
        let models = submissions::Entity::find()
            .order_by_desc(submissions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent submissions")?;
        Ok(models.into_iter().map(submission_from_model).collect())
    }
}

fn submission_from_model(model: submissions::Model) -> Submission {
    Submission {
        id: model.id,
        submission_id: model.submission_id,
        user_id: model.user_id,
        user_email: model.user_email,
        event_id: model.event_id,
        title: model.title,
        synopsis: model.synopsis,
        duration_minutes: model.duration_minutes,
        language: model.language,
        director_name: model.director_name,
        director_email: model.director_email,
        director_phone: model.director_phone,
        team_member_emails: string_list(model.team_member_emails),
        total_team_members: model.total_team_members,
        film_link: model.film_link,
        poster_link: model.poster_link,
        subtitles_link: model.subtitles_link,
        fee: model.fee,
        discount_code: model.discount_code,
        discount_amount: model.discount_amount,
        accommodation_members: model.accommodation_members,
        accommodation_fees: model.accommodation_fees,
        total_fees: model.total_fees,
        status: model.status,
        payment_status: PaymentStatus::from_kebab_case(&model.payment_status)
            .unwrap_or(PaymentStatus::Pending),
        transaction_id: model.transaction_id,
        payment_submitted_at: model.payment_submitted_at,
        rejection_reason: model.rejection_reason,
        verified_by: model.verified_by,
        verified_at: model.verified_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl TeamRepository for DbTeamRepository {
    async fn create(&self, team: &Team) -> Result<(), FestivalServiceError> {
        teams::ActiveModel {
            id: Set(team.id),
            team_id: Set(team.team_id.clone()),
            event_id: Set(team.event_id),
            event_name: Set(team.event_name.clone()),
            team_name: Set(team.team_name.clone()),
            leader_id: Set(team.leader_id),
            leader_email: Set(team.leader_email.clone()),
            leader_name: Set(team.leader_name.clone()),
            members: Set(serde_json::json!(team.members)),
            max_members: Set(team.max_members),
            current_members: Set(team.current_members),
            invite_code: Set(team.invite_code.clone()),
            status: Set(team.status.as_str().to_owned()),
            created_at: Set(team.created_at),
            updated_at: Set(team.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create team")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, FestivalServiceError> {
        let model = teams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team by id")?;
        Ok(model.map(team_from_model))
    }

    async fn find_by_team_id(&self, team_id: &str) -> Result<Option<Team>, FestivalServiceError> {
        let model = teams::Entity::find()
            .filter(teams::Column::TeamId.eq(team_id))
            .one(&self.db)
            .await
            .context("find team by public id")?;
        Ok(model.map(team_from_model))
    }

    async fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Team>, FestivalServiceError> {
        let model = teams::Entity::find()
            .filter(teams::Column::InviteCode.eq(invite_code))
            .one(&self.db)
            .await
            .context("find team by invite code")?;
        Ok(model.map(team_from_model))
    }

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Team>, FestivalServiceError> {
        let models = teams::Entity::find()
            .filter(teams::Column::EventId.eq(event_id))
            .order_by_asc(teams::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list teams by event")?;
        Ok(models.into_iter().map(team_from_model).collect())
    }

    async fn list_all(&self) -> Result<Vec<Team>, FestivalServiceError> {
        let models = teams::Entity::find()
            .order_by_desc(teams::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list all teams")?;
        Ok(models.into_iter().map(team_from_model).collect())
    }

    async fn update_members(
        &self,
        id: Uuid,
        members: &[TeamMember],
        status: TeamStatus,
    ) -> Result<bool, FestivalServiceError> {
        let team = teams::ActiveModel {
            members: Set(serde_json::json!(members)),
            current_members: Set(members.len() as i32),
            status: Set(status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = teams::Entity::update_many()
            .set(team)
            .filter(teams::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update team members")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TeamStatus,
    ) -> Result<bool, FestivalServiceError> {
        let team = teams::ActiveModel {
            status: Set(status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = teams::Entity::update_many()
            .set(team)
            .filter(teams::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update team status")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError> {
        let result = teams::Entity::delete_many()
            .filter(teams::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete team")?;
        Ok(result.rows_affected > 0)
    }
}

fn team_from_model(model: teams::Model) -> Team {
    Team {
        id: model.id,
        team_id: model.team_id,
        event_id: model.event_id,
        event_name: model.event_name,
        team_name: model.team_name,
        leader_id: model.leader_id,
        leader_email: model.leader_email,
        leader_name: model.leader_name,
        members: member_list(model.members),
        max_members: model.max_members,
        current_members: model.current_members,
        invite_code: model.invite_code,
        status: TeamStatus::from_kebab_case(&model.status).unwrap_or(TeamStatus::Open),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Discount repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDiscountRepository {
    pub db: DatabaseConnection,
}

impl DiscountRepository for DbDiscountRepository {
    async fn create(&self, discount: &Discount) -> Result<(), FestivalServiceError> {
        discounts::ActiveModel {
            id: Set(discount.id),
            code: Set(discount.code.clone()),
            user_id: Set(discount.user_id),
            user_email: Set(discount.user_email.clone()),
            discount_type: Set(discount.discount_type.as_str().to_owned()),
            discount_value: Set(discount.discount_value),
            event_id: Set(discount.event_id),
            event_name: Set(discount.event_name.clone()),
            is_used: Set(discount.is_used),
            usage_count: Set(discount.usage_count),
            max_usage: Set(discount.max_usage),
            used_at: Set(discount.used_at),
            expires_at: Set(discount.expires_at),
            created_at: Set(discount.created_at),
            created_by: Set(discount.created_by.clone()),
        }
        .insert(&self.db)
        .await
        .context("create discount")?;
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Discount>, FestivalServiceError> {
        let model = discounts::Entity::find()
            .filter(discounts::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find discount by code")?;
        Ok(model.map(discount_from_model))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, FestivalServiceError> {
        let count = discounts::Entity::find()
            .filter(discounts::Column::Code.eq(code))
            .count(&self.db)
            .await
            .context("check discount code exists")?;
        Ok(count > 0)
    }

    async fn record_usage(&self, id: Uuid) -> Result<bool, FestivalServiceError> {
        // Every SET clause sees the old row, so both columns add 1 themselves.
        let result = discounts::Entity::update_many()
            .col_expr(
                discounts::Column::UsageCount,
                Expr::col(discounts::Column::UsageCount).add(1),
            )
            .col_expr(
                discounts::Column::IsUsed,
                Expr::expr(Expr::col(discounts::Column::UsageCount).add(1))
                    .gte(Expr::col(discounts::Column::MaxUsage)),
            )
            .col_expr(discounts::Column::UsedAt, Expr::value(Utc::now()))
            .filter(discounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("record discount usage")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        user_email: Option<&str>,
        event_id: Option<Uuid>,
        is_used: Option<bool>,
        page: PageRequest,
    ) -> Result<Vec<Discount>, FestivalServiceError> {
        let page = page.clamped();
        let mut query = discounts::Entity::find();
        if let Some(user_email) = user_email {
            query = query.filter(discounts::Column::UserEmail.eq(user_email));
        }
        if let Some(event_id) = event_id {
            query = query.filter(discounts::Column::EventId.eq(event_id));
        }
        if let Some(is_used) = is_used {
            query = query.filter(discounts::Column::IsUsed.eq(is_used));
        }
        let models = query
            .order_by_desc(discounts::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list discounts")?;
        Ok(models.into_iter().map(discount_from_model).collect())
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Discount>, FestivalServiceError> {
        let models = discounts::Entity::find()
            .filter(discounts::Column::UserEmail.eq(email))
            .order_by_desc(discounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list discounts by email")?;
        Ok(models.into_iter().map(discount_from_model).collect())
    }

    async fn list_all(&self) -> Result<Vec<Discount>, FestivalServiceError> {
        let models = discounts::Entity::find()
            .order_by_desc(discounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list all discounts")?;
        Ok(models.into_iter().map(discount_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FestivalServiceError> {
        let result = discounts::Entity::delete_many()
            .filter(discounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete discount")?;
        Ok(result.rows_affected > 0)
    }
}

fn discount_from_model(model: discounts::Model) -> Discount {
    Discount {
        id: model.id,
        code: model.code,
        user_id: model.user_id,
        user_email: model.user_email,
        discount_type: DiscountType::from_str(&model.discount_type)
            .unwrap_or(DiscountType::Flat),
        discount_value: model.discount_value,
        event_id: model.event_id,
        event_name: model.event_name,
        is_used: model.is_used,
        usage_count: model.usage_count,
        max_usage: model.max_usage,
        used_at: model.used_at,
        expires_at: model.expires_at,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}
