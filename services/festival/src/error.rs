use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Festival service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum FestivalServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("submission not found")]
    SubmissionNotFound,
    #[error("team not found")]
    TeamNotFound,
    #[error("invalid discount code")]
    DiscountNotFound,
    #[error("invalid invite code")]
    InvalidInviteCode,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("already submitted for this event")]
    AlreadyRegistered,
    #[error("could not allocate a unique submission id")]
    SubmissionIdExhausted,
    #[error("discount code already used")]
    DiscountAlreadyUsed,
    #[error("discount code expired")]
    DiscountExpired,
    #[error("discount code is not valid for your account")]
    DiscountNotYours,
    #[error("discount code is not valid for this event")]
    DiscountWrongEvent,
    #[error("team is full")]
    TeamFull,
    #[error("team is locked")]
    TeamLocked,
    #[error("already a member of this team")]
    AlreadyInTeam,
    #[error("the leader cannot leave the team")]
    LeaderCannotLeave,
    #[error("the leader cannot be removed")]
    CannotRemoveLeader,
    #[error("only the team leader can do this")]
    NotTeamLeader,
    #[error("payment already submitted or reviewed")]
    InvalidPaymentState,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid phone number")]
    InvalidPhoneNumber,
    #[error("password must be 8-128 characters")]
    InvalidPassword,
    #[error("film link must be a google drive link")]
    InvalidFilmLink,
    #[error("duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("invalid referral code")]
    InvalidReferralCode,
    #[error("discount type must be FLAT or PERCENTAGE")]
    InvalidDiscountType,
    #[error("invalid discount value")]
    InvalidDiscountValue,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid account status")]
    InvalidUserStatus,
    #[error("invalid payment status")]
    InvalidPaymentStatus,
    #[error("at most 4 team member emails")]
    TooManyTeamMembers,
    #[error("emails not registered: {0}")]
    UnregisteredEmails(String),
    #[error("no fields to update")]
    EmptyUpdate,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FestivalServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::DiscountNotFound => "DISCOUNT_NOT_FOUND",
            Self::InvalidInviteCode => "INVALID_INVITE_CODE",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::SubmissionIdExhausted => "SUBMISSION_ID_EXHAUSTED",
            Self::DiscountAlreadyUsed => "DISCOUNT_ALREADY_USED",
            Self::DiscountExpired => "DISCOUNT_EXPIRED",
            Self::DiscountNotYours => "DISCOUNT_NOT_YOURS",
            Self::DiscountWrongEvent => "DISCOUNT_WRONG_EVENT",
            Self::TeamFull => "TEAM_FULL",
            Self::TeamLocked => "TEAM_LOCKED",
            Self::AlreadyInTeam => "ALREADY_IN_TEAM",
            Self::LeaderCannotLeave => "LEADER_CANNOT_LEAVE",
            Self::CannotRemoveLeader => "CANNOT_REMOVE_LEADER",
            Self::NotTeamLeader => "NOT_TEAM_LEADER",
            Self::InvalidPaymentState => "INVALID_PAYMENT_STATE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidFilmLink => "INVALID_FILM_LINK",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::InvalidReferralCode => "INVALID_REFERRAL_CODE",
            Self::InvalidDiscountType => "INVALID_DISCOUNT_TYPE",
            Self::InvalidDiscountValue => "INVALID_DISCOUNT_VALUE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidUserStatus => "INVALID_USER_STATUS",
            Self::InvalidPaymentStatus => "INVALID_PAYMENT_STATUS",
            Self::TooManyTeamMembers => "TOO_MANY_TEAM_MEMBERS",
            Self::UnregisteredEmails(_) => "UNREGISTERED_EMAILS",
            Self::EmptyUpdate => "EMPTY_UPDATE",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FestivalServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::EventNotFound
            | Self::SubmissionNotFound
            | Self::TeamNotFound
            | Self::DiscountNotFound
            | Self::InvalidInviteCode => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::AlreadyRegistered
            | Self::SubmissionIdExhausted
            | Self::DiscountAlreadyUsed
            | Self::TeamFull
            | Self::TeamLocked
            | Self::AlreadyInTeam
            | Self::InvalidPaymentState => StatusCode::CONFLICT,
            Self::DiscountExpired
            | Self::DiscountNotYours
            | Self::DiscountWrongEvent
            | Self::LeaderCannotLeave
            | Self::CannotRemoveLeader
            | Self::MissingField(_)
            | Self::InvalidEmail
            | Self::InvalidPhoneNumber
            | Self::InvalidPassword
            | Self::InvalidFilmLink
            | Self::InvalidDuration
            | Self::InvalidReferralCode
            | Self::InvalidDiscountType
            | Self::InvalidDiscountValue
            | Self::InvalidRole
            | Self::InvalidUserStatus
            | Self::InvalidPaymentStatus
            | Self::TooManyTeamMembers
            | Self::UnregisteredEmails(_)
            | Self::EmptyUpdate => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotTeamLeader | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
