use lumiere_domain::user::{UserRole, UserStatus};
use lumiere_festival::error::FestivalServiceError;
use lumiere_festival::usecase::account::{
    AdminSignInUseCase, GetProfileUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use lumiere_festival::usecase::token::{RefreshTokenUseCase, issue_refresh_token, validate_token};

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

fn sign_up_input() -> SignUpInput {
    SignUpInput {
        name: "Ananya Rao".to_owned(),
        email: "ananya@college.edu".to_owned(),
        phone_number: "9876543210".to_owned(),
        college_name: "National Film School".to_owned(),
        password: "monsoon-light-12".to_owned(),
        referred_by: None,
    }
}

// ── SignUpUseCase ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_and_issue_token_pair() {
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let usecase = SignUpUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase.execute(sign_up_input()).await.unwrap();

    assert_eq!(output.user.email, "ananya@college.edu");
    assert_eq!(output.user.role, UserRole::Participant.as_u8());
    assert_eq!(output.user.status, UserStatus::Active);
    assert_eq!(output.user.referral_code.len(), 6);
    assert!(output.user.event_ids.is_empty());

    let claims = validate_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, output.user.id.to_string());
    assert_eq!(claims.exp, output.access_token_exp);
    validate_token(&output.refresh_token, TEST_JWT_SECRET).unwrap();

    let stored = users_handle.lock().unwrap();
    assert_eq!(stored.len(), 1);
    let (user, password_hash) = &stored[0];
    assert_eq!(user.id, output.user.id);
    assert!(
        password_hash.starts_with("$argon2"),
        "plaintext must never be stored: {password_hash}"
    );
}

#[tokio::test]
async fn should_lowercase_email_on_sign_up() {
    let usecase = SignUpUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase
        .execute(SignUpInput {
            email: "  Ananya@College.EDU ".to_owned(),
            ..sign_up_input()
        })
        .await
        .unwrap();

    assert_eq!(output.user.email, "ananya@college.edu");
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let usecase = SignUpUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(sign_up_input()).await;
    assert!(
        matches!(result, Err(FestivalServiceError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_sign_up_fields() {
    let usecase = SignUpUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(SignUpInput {
            name: "   ".to_owned(),
            ..sign_up_input()
        })
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("name"))
    ));

    let result = usecase
        .execute(SignUpInput {
            email: "no-at-sign".to_owned(),
            ..sign_up_input()
        })
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidEmail)));

    let result = usecase
        .execute(SignUpInput {
            phone_number: "12345".to_owned(),
            ..sign_up_input()
        })
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidPhoneNumber)
    ));

    let result = usecase
        .execute(SignUpInput {
            password: "short".to_owned(),
            ..sign_up_input()
        })
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidPassword)));
}

#[tokio::test]
async fn should_validate_referral_code_when_named() {
    let usecase = SignUpUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(SignUpInput {
            email: "vikram@college.edu".to_owned(),
            referred_by: Some("NOPE99".to_owned()),
            ..sign_up_input()
        })
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::InvalidReferralCode)),
        "expected InvalidReferralCode, got {result:?}"
    );

    // Lowercase input matches the stored uppercase code.
    let output = usecase
        .execute(SignUpInput {
            email: "vikram@college.edu".to_owned(),
            referred_by: Some(" ref001 ".to_owned()),
            ..sign_up_input()
        })
        .await
        .unwrap();
    assert_eq!(output.user.referred_by.as_deref(), Some("REF001"));
}

// ── SignInUseCase ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_in_with_the_password_used_at_sign_up() {
    let users = MockUserRepo::empty();
    let sign_up = SignUpUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let created = sign_up.execute(sign_up_input()).await.unwrap();

    let sign_in = SignInUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let output = sign_in
        .execute(SignInInput {
            email: "Ananya@college.edu".to_owned(),
            password: "monsoon-light-12".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.id, created.user.id);
    validate_token(&output.access_token, TEST_JWT_SECRET).unwrap();
}

#[tokio::test]
async fn should_not_distinguish_wrong_password_from_unknown_email() {
    let users = MockUserRepo::empty();
    let sign_up = SignUpUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    sign_up.execute(sign_up_input()).await.unwrap();

    let sign_in = SignInUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let wrong_password = sign_in
        .execute(SignInInput {
            email: "ananya@college.edu".to_owned(),
            password: "not-the-password".to_owned(),
        })
        .await;
    assert!(matches!(
        wrong_password,
        Err(FestivalServiceError::InvalidCredentials)
    ));

    let unknown_email = sign_in
        .execute(SignInInput {
            email: "nobody@college.edu".to_owned(),
            password: "monsoon-light-12".to_owned(),
        })
        .await;
    assert!(matches!(
        unknown_email,
        Err(FestivalServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_block_sign_in_for_inactive_accounts() {
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let sign_up = SignUpUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    sign_up.execute(sign_up_input()).await.unwrap();

    users_handle.lock().unwrap()[0].0.status = UserStatus::Inactive;

    let sign_in = SignInUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = sign_in
        .execute(SignInInput {
            email: "ananya@college.edu".to_owned(),
            password: "monsoon-light-12".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

// ── AdminSignInUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_only_admit_admins_through_admin_sign_in() {
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let sign_up = SignUpUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    sign_up.execute(sign_up_input()).await.unwrap();

    let admin_sign_in = AdminSignInUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let input = || SignInInput {
        email: "ananya@college.edu".to_owned(),
        password: "monsoon-light-12".to_owned(),
    };

    // Correct password, participant role.
    let result = admin_sign_in.execute(input()).await;
    assert!(
        matches!(result, Err(FestivalServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    users_handle.lock().unwrap()[0].0.role = UserRole::Admin.as_u8();
    let output = admin_sign_in.execute(input()).await.unwrap();
    assert_eq!(output.user.role, UserRole::Admin.as_u8());
}

// ── GetProfile / UpdateProfile ───────────────────────────────────────────────

#[tokio::test]
async fn should_return_user_not_found_for_missing_profile() {
    let usecase = GetProfileUseCase {
        users: MockUserRepo::empty(),
    };
    let result = usecase.execute(test_user().id).await;
    assert!(matches!(result, Err(FestivalServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_update_profile_and_return_the_fresh_row() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let updated = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("  Ananya R.  ".to_owned()),
                phone_number: None,
                college_name: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ananya R.");
    assert_eq!(updated.phone_number, user.phone_number);
}

#[tokio::test]
async fn should_reject_bad_profile_updates() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("".to_owned()),
                phone_number: None,
                college_name: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("name"))
    ));

    let result = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: None,
                phone_number: Some("123".to_owned()),
                college_name: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidPhoneNumber)
    ));

    let result = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: None,
                phone_number: None,
                college_name: None,
            },
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::EmptyUpdate)));
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_tokens_on_refresh() {
    let user = test_user();
    let refresh_token = issue_refresh_token(&user, TEST_JWT_SECRET).unwrap();
    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase.execute(&refresh_token).await.unwrap();

    assert_eq!(output.user_id, user.id);
    assert_eq!(output.user_role, user.role);
    validate_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    validate_token(&output.refresh_token, TEST_JWT_SECRET).unwrap();
}

#[tokio::test]
async fn should_reject_garbage_and_foreign_refresh_tokens() {
    let user = test_user();
    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute("not-a-jwt").await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidRefreshToken)
    ));

    let foreign = issue_refresh_token(&user, "some-other-secret").unwrap();
    let result = usecase.execute(&foreign).await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn should_refresh_with_the_current_role_not_the_token_role() {
    let user = test_user();
    let refresh_token = issue_refresh_token(&user, TEST_JWT_SECRET).unwrap();

    let users = MockUserRepo::new(vec![user.clone()]);
    users.users_handle().lock().unwrap()[0].0.role = UserRole::Admin.as_u8();

    let usecase = RefreshTokenUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let output = usecase.execute(&refresh_token).await.unwrap();

    // The account was promoted after the token was issued.
    assert_eq!(output.user_role, UserRole::Admin.as_u8());
    let claims = validate_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.role, UserRole::Admin.as_u8());
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_accounts() {
    let user = test_user();
    let refresh_token = issue_refresh_token(&user, TEST_JWT_SECRET).unwrap();
    let usecase = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(&refresh_token).await;
    assert!(
        matches!(result, Err(FestivalServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}
