use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use lumiere_domain::user::{UserRole, UserStatus};

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    ProfileChanges, User, validate_email, validate_password, validate_phone,
};
use crate::error::FestivalServiceError;
use crate::usecase::code::unique_referral_code;
use crate::usecase::token::{issue_access_token, issue_refresh_token};

fn hash_password(password: &str) -> Result<String, FestivalServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FestivalServiceError::Internal(e.into()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── SignUp ───────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub college_name: String,
    pub password: String,
    pub referred_by: Option<String>,
}

#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct SignUpUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> SignUpUseCase<U> {
    pub async fn execute(&self, input: SignUpInput) -> Result<SignUpOutput, FestivalServiceError> {
        // 1. Field shape checks before any query
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FestivalServiceError::MissingField("name"));
        }
        let email = input.email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(FestivalServiceError::InvalidEmail);
        }
        let phone_number = input.phone_number.trim();
        if !validate_phone(phone_number) {
            return Err(FestivalServiceError::InvalidPhoneNumber);
        }
        let college_name = input.college_name.trim();
        if college_name.is_empty() {
            return Err(FestivalServiceError::MissingField("college_name"));
        }
        if !validate_password(&input.password) {
            return Err(FestivalServiceError::InvalidPassword);
        }

        // 2. Unique email → 409
        if self.users.email_exists(&email).await? {
            return Err(FestivalServiceError::UserAlreadyExists);
        }

        // 3. A referrer, when named, must exist
        let referred_by = match input.referred_by.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                let code = code.to_uppercase();
                if !self.users.referral_code_exists(&code).await? {
                    return Err(FestivalServiceError::InvalidReferralCode);
                }
                Some(code)
            }
            _ => None,
        };

        // 4. Allocate our own referral code, hash the password
        let referral_code = unique_referral_code(&self.users).await?;
        let password_hash = hash_password(&input.password)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email,
            phone_number: phone_number.to_owned(),
            college_name: college_name.to_owned(),
            role: UserRole::Participant.as_u8(),
            status: UserStatus::Active,
            referral_code,
            referred_by,
            event_ids: Vec::new(),
            team_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        // 5. Write, then sign the new account straight in
        self.users.create(&user, &password_hash).await?;

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(SignUpOutput {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct SignInUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> SignInUseCase<U> {
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, FestivalServiceError> {
        // 1. Look up credentials by lowercased email
        let email = input.email.trim().to_lowercase();
        let Some((user, password_hash)) = self.users.find_credentials(&email).await? else {
            return Err(FestivalServiceError::InvalidCredentials);
        };

        // 2. Verify the password; unknown email and wrong password are
        //    indistinguishable to the caller
        if !verify_password(&input.password, &password_hash) {
            return Err(FestivalServiceError::InvalidCredentials);
        }

        // 3. Deactivated accounts keep their data but cannot sign in
        if user.status == UserStatus::Inactive {
            return Err(FestivalServiceError::Forbidden);
        }

        // 4. Issue the token pair
        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(SignInOutput {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── AdminSignIn ──────────────────────────────────────────────────────────────

pub struct AdminSignInUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> AdminSignInUseCase<U> {
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, FestivalServiceError> {
        // 1. Same credential checks as a normal sign-in
        let email = input.email.trim().to_lowercase();
        let Some((user, password_hash)) = self.users.find_credentials(&email).await? else {
            return Err(FestivalServiceError::InvalidCredentials);
        };
        if !verify_password(&input.password, &password_hash) {
            return Err(FestivalServiceError::InvalidCredentials);
        }

        // 2. Role and status gates only after the password verified
        if user.role < UserRole::Admin.as_u8() || user.status == UserStatus::Inactive {
            return Err(FestivalServiceError::Forbidden);
        }

        // 3. Issue the token pair
        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(SignInOutput {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, FestivalServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, FestivalServiceError> {
        // 1. Normalize and validate what was provided
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

        let changes = ProfileChanges {
            name,
            phone_number,
            college_name,
        };
        if changes.is_empty() {
            return Err(FestivalServiceError::EmptyUpdate);
        }

        // 2. Write, then return the fresh row
        if !self.users.update_profile(user_id, &changes).await? {
            return Err(FestivalServiceError::UserNotFound);
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)
    }
}
