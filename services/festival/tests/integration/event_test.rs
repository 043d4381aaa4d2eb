use chrono::{Duration, Utc};
use lumiere_festival::domain::types::EventChanges;
use lumiere_festival::error::FestivalServiceError;
use lumiere_festival::usecase::event::{
    CreateEventInput, CreateEventUseCase, DeleteEventUseCase, GetEventUseCase, ListEventsUseCase,
    UpdateEventUseCase,
};

use crate::helpers::{MockEventRepo, test_event, test_team_event};

fn create_input() -> CreateEventInput {
    CreateEventInput {
        category: "Fiction".to_owned(),
        event_name: "Short Film: Fiction".to_owned(),
        reg_fees: Some(500),
        date_time: Utc::now() + Duration::days(30),
        end_date_time: None,
        location: Some("Main Auditorium".to_owned()),
        brief_description: None,
        image: None,
        pdf_link: None,
        contact_info: None,
        is_team_event: false,
        min_team_members: None,
        max_team_members: None,
        team_limit: None,
    }
}

// ── CreateEvent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_event_with_slug_id_and_solo_defaults() {
    let events = MockEventRepo::empty();
    let events_handle = events.events_handle();
    let usecase = CreateEventUseCase { events };

    let event = usecase.execute(create_input()).await.unwrap();

    // `short_film_fiction_NNNNNN`: slugged name + category + clock tail.
    let mut parts = event.event_id.rsplitn(2, '_');
    let tail = parts.next().unwrap();
    assert_eq!(parts.next(), Some("short_film_fiction"));
    assert_eq!(tail.len(), 6, "bad slug tail: {}", event.event_id);
    assert!(tail.chars().all(|c| c.is_ascii_digit()));

    assert_eq!(event.reg_fees, 500);
    assert!(!event.is_team_event);
    assert_eq!(event.min_team_members, 1);
    assert_eq!(event.max_team_members, 1);
    assert_eq!(event.team_limit, 0);
    assert_eq!(event.current_teams, 0);
    assert_eq!(events_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_default_reg_fees_to_zero() {
    let usecase = CreateEventUseCase {
        events: MockEventRepo::empty(),
    };
    let event = usecase
        .execute(CreateEventInput {
            reg_fees: None,
            ..create_input()
        })
        .await
        .unwrap();
    assert_eq!(event.reg_fees, 0);
}

#[tokio::test]
async fn should_require_event_name_and_category() {
    let usecase = CreateEventUseCase {
        events: MockEventRepo::empty(),
    };

    let result = usecase
        .execute(CreateEventInput {
            event_name: "  ".to_owned(),
            ..create_input()
        })
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("event_name"))
    ));

    let result = usecase
        .execute(CreateEventInput {
            category: "".to_owned(),
            ..create_input()
        })
        .await;
    assert!(matches!(
        result,
        Err(FestivalServiceError::MissingField("category"))
    ));
}

// ── GetEvent ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_event_by_slug_or_uuid() {
    let event = test_event();
    let usecase = GetEventUseCase {
        events: MockEventRepo::new(vec![event.clone()]),
    };

    let by_slug = usecase.execute(&event.event_id).await.unwrap();
    assert_eq!(by_slug.id, event.id);

    let by_uuid = usecase.execute(&event.id.to_string()).await.unwrap();
    assert_eq!(by_uuid.event_id, event.event_id);

    let result = usecase.execute("no_such_event_000000").await;
    assert!(
        matches!(result, Err(FestivalServiceError::EventNotFound)),
        "expected EventNotFound, got {result:?}"
    );
}

// ── ListEvents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_events_narrowed_to_a_category() {
    let usecase = ListEventsUseCase {
        events: MockEventRepo::new(vec![test_event(), test_team_event()]),
    };

    let all = usecase.execute(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let fiction = usecase.execute(Some(" fiction ")).await.unwrap();
    assert_eq!(fiction.len(), 1);
    assert_eq!(fiction[0].category, "fiction");

    // Blank narrows nothing.
    let blank = usecase.execute(Some("   ")).await.unwrap();
    assert_eq!(blank.len(), 2);
}

// ── UpdateEvent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_event_and_return_the_fresh_row() {
    let event = test_event();
    let usecase = UpdateEventUseCase {
        events: MockEventRepo::new(vec![event.clone()]),
    };

    let updated = usecase
        .execute(
            &event.event_id,
            EventChanges {
                reg_fees: Some(750),
                location: Some("Open Air Theatre".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.reg_fees, 750);
    assert_eq!(updated.location.as_deref(), Some("Open Air Theatre"));
    // The slug never moves on rename.
    assert_eq!(updated.event_id, event.event_id);
}

#[tokio::test]
async fn should_reject_empty_event_update() {
    let event = test_event();
    let usecase = UpdateEventUseCase {
        events: MockEventRepo::new(vec![event]),
    };

    let result = usecase.execute("anything", EventChanges::default()).await;
    assert!(
        matches!(result, Err(FestivalServiceError::EmptyUpdate)),
        "expected EmptyUpdate, got {result:?}"
    );
}

// ── DeleteEvent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_event_by_slug() {
    let event = test_event();
    let events = MockEventRepo::new(vec![event.clone()]);
    let events_handle = events.events_handle();
    let usecase = DeleteEventUseCase { events };

    usecase.execute(&event.event_id).await.unwrap();
    assert!(events_handle.lock().unwrap().is_empty());

    let result = usecase.execute(&event.event_id).await;
    assert!(
        matches!(result, Err(FestivalServiceError::EventNotFound)),
        "expected EventNotFound, got {result:?}"
    );
}
