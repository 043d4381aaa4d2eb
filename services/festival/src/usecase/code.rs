use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;

use crate::domain::repository::{DiscountRepository, SubmissionRepository, UserRepository};
use crate::domain::types::SUBMISSION_ID_PREFIX;
use crate::error::FestivalServiceError;

/// Charset for referral codes, invite codes, and team-id suffixes.
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Discount codes open with six plain letters.
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

const REFERRAL_CODE_LEN: usize = 6;
const INVITE_CODE_LEN: usize = 6;
const TEAM_ID_SUFFIX_LEN: usize = 7;

/// Attempts before the referral fallback kicks in or submission-id
/// allocation gives up.
const MAX_CODE_ATTEMPTS: usize = 10;

fn unix_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_millis()
}

fn random_chars(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

// ── Candidate generators ─────────────────────────────────────────────────────

/// Candidate discount code: 6 uppercase letters + 2 digits.
pub fn generate_discount_code() -> String {
    let mut code = random_chars(LETTERS, 6);
    code.push_str(&random_chars(DIGITS, 2));
    code
}

/// Candidate referral code: 6 uppercase alphanumerics.
pub fn generate_referral_code() -> String {
    random_chars(ALNUM, REFERRAL_CODE_LEN)
}

/// Team invite code: 6 uppercase alphanumerics, no uniqueness round-trip.
pub fn generate_invite_code() -> String {
    random_chars(ALNUM, INVITE_CODE_LEN)
}

/// Human team id: `TEAM-{unix-ms}-{7 uppercase alnum}`, no uniqueness
/// round-trip.
pub fn generate_team_id() -> String {
    format!(
        "TEAM-{}-{}",
        unix_ms(),
        random_chars(ALNUM, TEAM_ID_SUFFIX_LEN)
    )
}

/// Candidate submission id: `LUM-2026-` + zero-padded random 0001–9999.
pub fn generate_submission_id() -> String {
    let mut rng = rand::rng();
    format!("{SUBMISSION_ID_PREFIX}{:04}", rng.random_range(1..=9999))
}

/// Human event slug: `{name}_{category}_{last 6 digits of unix-ms}`.
pub fn generate_event_id(event_name: &str, category: &str) -> String {
    let ms = unix_ms().to_string();
    let tail = &ms[ms.len().saturating_sub(6)..];
    format!("{}_{}_{}", slugify(event_name), slugify(category), tail)
}

/// Lowercase, whitespace to `_`, everything outside `[a-z0-9_]` dropped.
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

// ── Uniqueness wrappers ──────────────────────────────────────────────────────

/// Regenerate until the store no longer knows the candidate.
pub async fn unique_discount_code<R: DiscountRepository>(
    repo: &R,
) -> Result<String, FestivalServiceError> {
    let mut code = generate_discount_code();
    while repo.code_exists(&code).await? {
        code = generate_discount_code();
    }
    Ok(code)
}

/// Ten attempts, then a fresh candidate with the last two digits of unix-ms
/// appended so allocation always terminates.
pub async fn unique_referral_code<R: UserRepository>(
    repo: &R,
) -> Result<String, FestivalServiceError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_referral_code();
        if !repo.referral_code_exists(&code).await? {
            return Ok(code);
        }
    }
    let ms = unix_ms().to_string();
    Ok(format!("{}{}", generate_referral_code(), &ms[ms.len() - 2..]))
}

/// Ten attempts over a 4-digit space, then a conflict error.
pub async fn unique_submission_id<R: SubmissionRepository>(
    repo: &R,
) -> Result<String, FestivalServiceError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let id = generate_submission_id();
        if !repo.submission_id_exists(&id).await? {
            return Ok(id);
        }
    }
    Err(FestivalServiceError::SubmissionIdExhausted)
}
