use lumiere_domain::user::UserRole;
use lumiere_festival::domain::types::{PaymentStatus, User};
use lumiere_festival::error::FestivalServiceError;
use lumiere_festival::usecase::submission::{
    CreateSubmissionInput, CreateSubmissionUseCase, GetSubmissionUseCase, MySubmissionsUseCase,
    SubmitPaymentUseCase,
};
use uuid::Uuid;

use crate::helpers::{
    MockDiscountRepo, MockEventRepo, MockSubmissionRepo, MockUserRepo, test_discount, test_event,
    test_submission, test_user,
};

fn crew_member(email: &str) -> User {
    let mut user = test_user();
    user.id = Uuid::new_v4();
    user.email = email.to_owned();
    user
}

fn create_input() -> CreateSubmissionInput {
    CreateSubmissionInput {
        event_id: test_event().event_id,
        title: "Monsoon Light".to_owned(),
        synopsis: "A city remembers the rain.".to_owned(),
        duration_minutes: 12,
        language: "Hindi".to_owned(),
        director_name: "Ananya Rao".to_owned(),
        director_email: "ananya@college.edu".to_owned(),
        director_phone: "9876543210".to_owned(),
        team_member_emails: vec![],
        film_link: "https://drive.google.com/file/d/abc123/view".to_owned(),
        poster_link: None,
        subtitles_link: None,
        accommodation_members: 0,
        discount_code: None,
    }
}

struct Fixture {
    submissions: MockSubmissionRepo,
    users: MockUserRepo,
    events: MockEventRepo,
    discounts: MockDiscountRepo,
    user: User,
}

impl Fixture {
    fn new() -> Self {
        let user = test_user();
        Self {
            submissions: MockSubmissionRepo::empty(),
            users: MockUserRepo::new(vec![user.clone()]),
            events: MockEventRepo::new(vec![test_event()]),
            discounts: MockDiscountRepo::empty(),
            user,
        }
    }

    fn create(
        &self,
    ) -> CreateSubmissionUseCase<MockSubmissionRepo, MockUserRepo, MockEventRepo, MockDiscountRepo>
    {
        CreateSubmissionUseCase {
            submissions: self.submissions.clone(),
            users: self.users.clone(),
            events: self.events.clone(),
            discounts: self.discounts.clone(),
        }
    }
}

// ── CreateSubmission ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_submission_with_the_fee_snapshot() {
    let fx = Fixture::new();
    fx.users
        .users_handle()
        .lock()
        .unwrap()
        .push((crew_member("vikram@college.edu"), String::new()));

    let submission = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                // Blanks are dropped, casing is normalized.
                team_member_emails: vec![
                    "  Vikram@College.edu ".to_owned(),
                    "".to_owned(),
                    "   ".to_owned(),
                ],
                ..create_input()
            },
        )
        .await
        .unwrap();

    let serial = submission.submission_id.strip_prefix("LUM-2026-").unwrap();
    assert_eq!(serial.len(), 4, "bad id: {}", submission.submission_id);
    assert_eq!(submission.user_email, "ananya@college.edu");
    assert_eq!(submission.team_member_emails, vec!["vikram@college.edu"]);
    assert_eq!(submission.total_team_members, 2);
    assert_eq!(submission.fee, 500);
    assert_eq!(submission.total_fees, 500);
    assert_eq!(submission.status, "submitted");
    assert_eq!(submission.payment_status, PaymentStatus::Pending);

    assert_eq!(fx.submissions.submissions_handle().lock().unwrap().len(), 1);
    // The event lands on the account's side-list.
    let users = fx.users.users_handle();
    assert!(users.lock().unwrap()[0].0.event_ids.contains(&submission.event_id));
}

#[tokio::test]
async fn should_reject_malformed_submission_fields() {
    let fx = Fixture::new();
    let usecase = fx.create();

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                title: "  ".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("title"))
    ));

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                synopsis: "".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("synopsis"))
    ));

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                duration_minutes: 0,
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidDuration)));

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                director_email: "not-an-email".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidEmail)));

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                director_phone: "12".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidPhoneNumber)
    ));

    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                film_link: "   ".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("film_link"))
    ));

    // Anything off Google Drive is refused.
    let result = usecase
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                film_link: "https://youtu.be/abc123".to_owned(),
                ..create_input()
            },
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidFilmLink)));
}

#[tokio::test]
async fn should_cap_the_crew_at_four_besides_the_submitter() {
    let fx = Fixture::new();

    let result = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                team_member_emails: (1..=5).map(|n| format!("crew{n}@college.edu")).collect(),
                ..create_input()
            },
        )
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::TooManyTeamMembers)),
        "expected TooManyTeamMembers, got {result:?}"
    );
}

#[tokio::test]
async fn should_name_the_unregistered_crew_emails() {
    let fx = Fixture::new();

    let result = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                team_member_emails: vec!["ghost@college.edu".to_owned()],
                ..create_input()
            },
        )
        .await;
    assert!(
        matches!(
            result,
            Err(FestivalServiceError::UnregisteredEmails(ref emails))
                if emails.contains("ghost@college.edu")
        ),
        "expected UnregisteredEmails, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_one_submission_per_user_per_event() {
    let fx = Fixture::new();
    fx.submissions
        .submissions_handle()
        .lock()
        .unwrap()
        .push(test_submission(fx.user.id, test_event().id));

    let result = fx.create().execute(fx.user.id, create_input()).await;
    assert!(
        matches!(result, Err(FestivalServiceError::AlreadyRegistered)),
        "expected AlreadyRegistered, got {result:?}"
    );
}

#[tokio::test]
async fn should_apply_and_consume_a_discount_code() {
    let fx = Fixture::new();
    fx.discounts
        .discounts_handle()
        .lock()
        .unwrap()
        .push(test_discount("FESTIV25"));

    let submission = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                discount_code: Some(" festiv25 ".to_owned()),
                ..create_input()
            },
        )
        .await
        .unwrap();

    assert_eq!(submission.discount_code.as_deref(), Some("FESTIV25"));
    assert_eq!(submission.discount_amount, 100);
    assert_eq!(submission.total_fees, 400);

    // Single-use code is spent by the successful registration.
    let discounts = fx.discounts.discounts_handle();
    let discounts = discounts.lock().unwrap();
    assert_eq!(discounts[0].usage_count, 1);
    assert!(discounts[0].is_used);
    assert!(discounts[0].used_at.is_some());
}

#[tokio::test]
async fn should_floor_the_total_at_zero() {
    let fx = Fixture::new();
    let mut discount = test_discount("BIGSAV99");
    discount.discount_value = 600;
    fx.discounts.discounts_handle().lock().unwrap().push(discount);

    let submission = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                discount_code: Some("BIGSAV99".to_owned()),
                ..create_input()
            },
        )
        .await
        .unwrap();

    assert_eq!(submission.discount_amount, 600);
    assert_eq!(submission.total_fees, 0);
}

#[tokio::test]
async fn should_charge_accommodation_per_member() {
    let fx = Fixture::new();

    let submission = fx
        .create()
        .execute(
            fx.user.id,
            CreateSubmissionInput {
                accommodation_members: 2,
                ..create_input()
            },
        )
        .await
        .unwrap();

    assert_eq!(submission.accommodation_fees, 3000);
    assert_eq!(submission.total_fees, 3500);
}

// ── SubmitPayment ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_accept_payment_exactly_once() {
    let fx = Fixture::new();
    let submission = fx.create().execute(fx.user.id, create_input()).await.unwrap();

    let usecase = SubmitPaymentUseCase {
        submissions: fx.submissions.clone(),
    };

    let result = usecase
        .execute(fx.user.id, &submission.submission_id, "   ")
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("transaction_id"))
    ));

    let other = Uuid::new_v4();
    let result = usecase
        .execute(other, &submission.submission_id, "TXN-981")
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    let paid = usecase
        .execute(fx.user.id, &submission.submission_id, " TXN-981 ")
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::ConfirmationPending);
    assert_eq!(paid.transaction_id.as_deref(), Some("TXN-981"));
    assert!(paid.payment_submitted_at.is_some());

    let result = usecase
        .execute(fx.user.id, &submission.submission_id, "TXN-982")
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::InvalidPaymentState)),
        "expected InvalidPaymentState, got {result:?}"
    );
}

// ── GetSubmission / MySubmissions ────────────────────────────────────────────

#[tokio::test]
async fn should_show_submissions_to_owners_and_admins_only() {
    let owner = test_user();
    let submission = test_submission(owner.id, test_event().id);
    let usecase = GetSubmissionUseCase {
        submissions: MockSubmissionRepo::new(vec![submission.clone()]),
    };

    let seen = usecase
        .execute(owner.id, owner.role, &submission.submission_id)
        .await
        .unwrap();
    assert_eq!(seen.id, submission.id);

    // Resolves by row uuid as well.
    usecase
        .execute(owner.id, owner.role, &submission.id.to_string())
        .await
        .unwrap();

    let stranger = Uuid::new_v4();
    let result = usecase
        .execute(stranger, UserRole::Participant.as_u8(), &submission.submission_id)
        .await;
    assert!(
        matches!(result, Err(FestivalServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    usecase
        .execute(stranger, UserRole::Admin.as_u8(), &submission.submission_id)
        .await
        .unwrap();

    let result = usecase.execute(owner.id, owner.role, "LUM-2026-9999").await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::SubmissionNotFound)
    ));
}

#[tokio::test]
async fn should_list_only_the_callers_submissions() {
    let owner = test_user();
    let other = Uuid::new_v4();
    let usecase = MySubmissionsUseCase {
        submissions: MockSubmissionRepo::new(vec![
            test_submission(owner.id, test_event().id),
            test_submission(other, test_event().id),
        ]),
    };

    let mine = usecase.execute(owner.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, owner.id);
}
