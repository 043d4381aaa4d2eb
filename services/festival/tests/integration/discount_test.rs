use chrono::{Duration, Utc};
use lumiere_domain::codes::is_valid_discount_code_format;
use lumiere_domain::pagination::PageRequest;
use lumiere_festival::domain::types::{Discount, DiscountType};
use lumiere_festival::error::FestivalServiceError;
use lumiere_festival::usecase::discount::{
    CreateDiscountInput, CreateDiscountUseCase, DeleteDiscountUseCase, DiscountStats,
    DiscountStatsUseCase, ListDiscountsUseCase, MyDiscountsUseCase, ValidateDiscountUseCase,
};
use uuid::Uuid;

use crate::helpers::{
    MockDiscountRepo, MockEventRepo, MockUserRepo, test_discount, test_event, test_user,
};

fn create_input() -> CreateDiscountInput {
    CreateDiscountInput {
        discount_type: "FLAT".to_owned(),
        discount_value: 100,
        user_email: None,
        event_id: None,
        expires_at: None,
        max_usage: None,
    }
}

fn create_usecase(
    discounts: MockDiscountRepo,
) -> CreateDiscountUseCase<MockDiscountRepo, MockUserRepo, MockEventRepo> {
    CreateDiscountUseCase {
        discounts,
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::new(vec![test_event()]),
    }
}

// ── CreateDiscount ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_bound_discount_with_snapshot_and_backlink() {
    let discounts = MockDiscountRepo::empty();
    let usecase = create_usecase(discounts.clone());

    let discount = usecase
        .execute(
            CreateDiscountInput {
                user_email: Some(" Ananya@College.EDU ".to_owned()),
                event_id: Some(test_event().event_id),
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await
        .unwrap();

    assert!(is_valid_discount_code_format(&discount.code), "bad code: {}", discount.code);
    assert_eq!(discount.user_email.as_deref(), Some("ananya@college.edu"));
    assert_eq!(discount.user_id, Some(test_user().id));
    assert_eq!(discount.event_id, Some(test_event().id));
    assert_eq!(discount.event_name.as_deref(), Some("Short Film"));
    assert_eq!(discount.max_usage, 1);
    assert_eq!(discount.usage_count, 0);
    assert!(!discount.is_used);
    assert_eq!(discount.created_by, "priya@lumiere.fest");
    assert_eq!(discounts.discounts_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_create_public_discount_without_bindings() {
    let usecase = create_usecase(MockDiscountRepo::empty());

    let discount = usecase
        .execute(
            CreateDiscountInput {
                user_email: Some("   ".to_owned()),
                max_usage: Some(0),
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await
        .unwrap();

    assert_eq!(discount.user_email, None);
    assert_eq!(discount.user_id, None);
    assert_eq!(discount.event_id, None);
    // Zero usages would make the code dead on arrival.
    assert_eq!(discount.max_usage, 1);
}

#[tokio::test]
async fn should_enforce_type_and_value_bounds() {
    let usecase = create_usecase(MockDiscountRepo::empty());

    let result = usecase
        .execute(
            CreateDiscountInput {
                discount_type: "flat".to_owned(),
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidDiscountType)
    ));

    let result = usecase
        .execute(
            CreateDiscountInput {
                discount_value: 0,
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidDiscountValue)
    ));

    let result = usecase
        .execute(
            CreateDiscountInput {
                discount_type: "PERCENTAGE".to_owned(),
                discount_value: 101,
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::InvalidDiscountValue)
    ));

    let result = usecase
        .execute(
            CreateDiscountInput {
                user_email: Some("not-an-email".to_owned()),
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::InvalidEmail)));

    let result = usecase
        .execute(
            CreateDiscountInput {
                event_id: Some("no_such_event_1a2b3c".to_owned()),
                ..create_input()
            },
            "priya@lumiere.fest",
        )
        .await;
    assert!(matches!(result, Err(FestivalServiceError::EventNotFound)));
}

// ── ValidateDiscount ─────────────────────────────────────────────────────────

fn validate_usecase(
    discounts: Vec<Discount>,
) -> ValidateDiscountUseCase<MockDiscountRepo, MockEventRepo> {
    ValidateDiscountUseCase {
        discounts: MockDiscountRepo::new(discounts),
        events: MockEventRepo::new(vec![test_event()]),
    }
}

#[tokio::test]
async fn should_validate_without_consuming() {
    let usecase = validate_usecase(vec![test_discount("FESTIV25")]);

    let output = usecase
        .execute(" festiv25 ", "ananya@college.edu", &test_event().event_id)
        .await
        .unwrap();

    assert_eq!(output.amount, 100);
    assert_eq!(output.discount.usage_count, 0);
    assert!(!output.discount.is_used);
}

#[tokio::test]
async fn should_floor_percentage_amounts() {
    let mut event = test_event();
    event.reg_fees = 499;
    let mut discount = test_discount("TENOFF10");
    discount.discount_type = DiscountType::Percentage;
    discount.discount_value = 10;

    let usecase = ValidateDiscountUseCase {
        discounts: MockDiscountRepo::new(vec![discount]),
        events: MockEventRepo::new(vec![event.clone()]),
    };

    let output = usecase
        .execute("TENOFF10", "ananya@college.edu", &event.event_id)
        .await
        .unwrap();
    assert_eq!(output.amount, 49);
}

#[tokio::test]
async fn should_reject_codes_in_bound_order() {
    let mut spent = test_discount("SPENTX01");
    spent.usage_count = 1;

    let mut expired = test_discount("EXPIRE02");
    expired.expires_at = Some(Utc::now() - Duration::days(1));

    let mut foreign = test_discount("THEIRS03");
    foreign.user_email = Some("someone.else@college.edu".to_owned());

    let mut wrong_event = test_discount("OTHERE04");
    wrong_event.event_id = Some(Uuid::new_v4());

    // A code both spent and expired trips the usage check first.
    let mut spent_and_expired = test_discount("SPENTE05");
    spent_and_expired.usage_count = 1;
    spent_and_expired.expires_at = Some(Utc::now() - Duration::days(1));

    let usecase = validate_usecase(vec![spent, expired, foreign, wrong_event, spent_and_expired]);
    let event_key = test_event().event_id;

    let result = usecase.execute("NOSUCH99", "ananya@college.edu", &event_key).await;
    assert!(matches!(result, Err(FestivalServiceError::DiscountNotFound)));

    let result = usecase.execute("SPENTX01", "ananya@college.edu", &event_key).await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::DiscountAlreadyUsed)
    ));

    let result = usecase.execute("EXPIRE02", "ananya@college.edu", &event_key).await;
    assert!(matches!(result, Err(FestivalServiceError::DiscountExpired)));

    let result = usecase.execute("THEIRS03", "ananya@college.edu", &event_key).await;
    assert!(matches!(result, Err(FestivalServiceError::DiscountNotYours)));

    let result = usecase.execute("OTHERE04", "ananya@college.edu", &event_key).await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::DiscountWrongEvent)
    ));

    let result = usecase.execute("SPENTE05", "ananya@college.edu", &event_key).await;
    assert!(
        matches!(result, Err(FestivalServiceError::DiscountAlreadyUsed)),
        "expected DiscountAlreadyUsed, got {result:?}"
    );
}

// ── ListDiscounts / MyDiscounts ──────────────────────────────────────────────

#[tokio::test]
async fn should_filter_discounts_by_binding_and_usage() {
    let mut mine = test_discount("MINEAA01");
    mine.user_email = Some("ananya@college.edu".to_owned());
    let mut spent = test_discount("SPENTB02");
    spent.is_used = true;
    let open = test_discount("OPENCC03");

    let usecase = ListDiscountsUseCase {
        discounts: MockDiscountRepo::new(vec![mine, spent, open]),
    };

    let all = usecase
        .execute(None, None, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let bound = usecase
        .execute(Some(" Ananya@COLLEGE.edu "), None, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].code, "MINEAA01");

    let unspent = usecase
        .execute(None, None, Some(false), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(unspent.len(), 2);
}

#[tokio::test]
async fn should_list_my_discounts_by_normalized_email() {
    let mut mine = test_discount("MINEAA01");
    mine.user_email = Some("ananya@college.edu".to_owned());

    let usecase = MyDiscountsUseCase {
        discounts: MockDiscountRepo::new(vec![mine, test_discount("PUBLIC02")]),
    };

    let listed = usecase.execute(" Ananya@COLLEGE.edu ").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].code, "MINEAA01");
}

// ── DeleteDiscount ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_by_code_or_uuid() {
    let by_code = test_discount("DROPME01");
    let by_uuid = test_discount("DROPME02");
    let discounts = MockDiscountRepo::new(vec![by_code, by_uuid.clone()]);
    let usecase = DeleteDiscountUseCase {
        discounts: discounts.clone(),
    };

    usecase.execute("dropme01").await.unwrap();
    usecase.execute(&by_uuid.id.to_string()).await.unwrap();
    assert!(discounts.discounts_handle().lock().unwrap().is_empty());

    let result = usecase.execute("DROPME01").await;
    assert!(
        matches!(result, Err(FestivalServiceError::DiscountNotFound)),
        "expected DiscountNotFound, got {result:?}"
    );
}

// ── DiscountStats ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fold_stats_in_one_scan() {
    let mut spent = test_discount("SPENTA01");
    spent.is_used = true;

    let mut open = test_discount("OPENBB02");
    open.discount_value = 200;

    // Expired counts only among the unused.
    let mut stale = test_discount("STALEC03");
    stale.discount_value = 50;
    stale.expires_at = Some(Utc::now() - Duration::days(1));

    let mut spent_and_stale = test_discount("SPENTD04");
    spent_and_stale.is_used = true;
    spent_and_stale.expires_at = Some(Utc::now() - Duration::days(1));

    let usecase = DiscountStatsUseCase {
        discounts: MockDiscountRepo::new(vec![spent, open, stale, spent_and_stale]),
    };

    let stats = usecase.execute().await.unwrap();
    assert_eq!(
        stats,
        DiscountStats {
            total: 4,
            used: 2,
            unused: 2,
            expired: 1,
            total_amount_issued: 450,
            total_amount_used: 200,
        }
    );
}
