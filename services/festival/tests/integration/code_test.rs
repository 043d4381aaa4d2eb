use lumiere_domain::codes::is_valid_discount_code_format;
use lumiere_festival::error::FestivalServiceError;
use lumiere_festival::usecase::code::{
    unique_discount_code, unique_referral_code, unique_submission_id,
};

use crate::helpers::{MockDiscountRepo, MockSubmissionRepo, MockUserRepo};

#[tokio::test]
async fn should_allocate_a_well_formed_discount_code() {
    let code = unique_discount_code(&MockDiscountRepo::empty()).await.unwrap();
    assert!(is_valid_discount_code_format(&code), "bad code: {code}");
}

#[tokio::test]
async fn should_allocate_a_six_char_referral_code() {
    let code = unique_referral_code(&MockUserRepo::empty()).await.unwrap();
    assert_eq!(code.len(), 6, "bad code: {code}");
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn should_extend_referral_code_when_every_candidate_collides() {
    let code = unique_referral_code(&MockUserRepo::exhausted()).await.unwrap();
    // Six random chars plus two clock digits.
    assert_eq!(code.len(), 8, "bad fallback code: {code}");
    assert!(code[6..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn should_allocate_a_sequentially_shaped_submission_id() {
    let id = unique_submission_id(&MockSubmissionRepo::empty()).await.unwrap();
    let serial = id.strip_prefix("LUM-2026-").unwrap();
    assert_eq!(serial.len(), 4, "bad id: {id}");
    assert!(serial.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn should_give_up_on_submission_ids_after_bounded_attempts() {
    let result = unique_submission_id(&MockSubmissionRepo::exhausted()).await;
    assert!(
        matches!(result, Err(FestivalServiceError::SubmissionIdExhausted)),
        "expected SubmissionIdExhausted, got {result:?}"
    );
}
