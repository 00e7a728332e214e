use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use learn_core::model::{AnswerOutcome, DrillType, ItemId, MasteryRecord};
use learn_core::time::fixed_now;
use services::{Clock, PracticeLoopService, settings_from_json};
use storage::repository::{InMemoryRepository, MasteryStore};
use storage::{JsonCatalog, Storage};

const CATALOG: &str = r#"[
    { "id": 1, "kind": "vocabulary", "prompt": "el perro", "answer": "the dog" },
    { "id": 2, "kind": "grammar", "prompt": "ser vs estar", "answer": "estar",
      "examples": ["Estoy cansado.", "Es alto."] },
    { "id": 3, "kind": "phrase", "prompt": "buenos dias", "answer": "good morning" }
]"#;

fn completion_counter() -> (Arc<AtomicUsize>, Box<dyn FnMut() + Send>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&calls);
    (
        calls,
        Box::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

#[tokio::test]
async fn practice_loop_runs_to_completion_with_summary() {
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let mastery = InMemoryRepository::new();
    let settings = settings_from_json(r#"{ "mastery_streak": 2, "seed": 5 }"#).unwrap();
    let service = PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(catalog),
        Arc::new(mastery.clone()),
    )
    .with_settings(settings);
    let (calls, observer) = completion_counter();
    let mut session = service.start_session_with_observer(observer).await.unwrap();
    assert_eq!(session.progress().remaining, 3);

    // Miss every item once, then answer correctly until mastered.
    let mut missed = HashSet::new();
    let mut steps = 0;
    while !session.is_complete() {
        let entry = session.current().expect("incomplete session has an entry");
        let outcome = if missed.insert(entry.item_id) {
            AnswerOutcome::Incorrect
        } else {
            AnswerOutcome::Correct
        };
        service.answer_current(&mut session, outcome).await.unwrap();
        service.continue_current(&mut session).await.unwrap();

        let ids: Vec<_> = (1..=3).map(ItemId::new).collect();
        let snapshot = mastery.snapshot(&ids).await.unwrap();
        let unmastered = ids
            .iter()
            .filter(|id| !snapshot.get(*id).is_some_and(|r| r.is_mastered))
            .count();
        assert_eq!(session.queue().len(), unmastered);
        steps += 1;
        assert!(steps <= 20, "session did not converge");
    }

    // Extra continues after completion are harmless and silent.
    for _ in 0..3 {
        let outcome = service.continue_current(&mut session).await.unwrap();
        assert!(!outcome.removed && !outcome.completed);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let summary = session.summary().expect("summary built on completion");
    assert_eq!(summary.total_answers(), 9);
    assert_eq!(summary.incorrect(), 3);
    assert_eq!(summary.correct(), 6);
    assert_eq!(summary.items_mastered(), 3);
    assert_eq!(summary.items_practiced(), 3);

    for id in 1..=3 {
        let record = mastery.get_mastery(ItemId::new(id)).await.unwrap().unwrap();
        assert!(record.is_mastered);
        assert_eq!(record.incorrect_count, 1);
    }

    // The grammar item only ever sees structured drills.
    assert!(
        session
            .logs()
            .iter()
            .filter(|log| log.item_id == ItemId::new(2))
            .all(|log| log.drill_type.is_structured())
    );
}

#[tokio::test]
async fn failing_single_item_alternates_two_drill_types() {
    let catalog = JsonCatalog::from_json_str(
        r#"[{ "id": 7, "kind": "vocabulary", "prompt": "la casa", "answer": "the house" }]"#,
    )
    .unwrap();
    let mastery = InMemoryRepository::new();
    let settings = settings_from_json(
        r#"{ "enabled_drill_types": ["translate-to-source", "listening-identification"] }"#,
    )
    .unwrap();
    let service = PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(catalog),
        Arc::new(mastery),
    )
    .with_settings(settings);
    let mut session = service.start_session().await.unwrap();

    let mut shown = Vec::new();
    for _ in 0..5 {
        shown.push(session.current().unwrap().drill_type);
        service
            .answer_current(&mut session, AnswerOutcome::Incorrect)
            .await
            .unwrap();
        service.continue_current(&mut session).await.unwrap();
        assert_eq!(session.queue().len(), 1);
    }

    for pair in shown.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(shown.iter().all(|d| matches!(
        d,
        DrillType::TranslateToSource | DrillType::ListeningIdentification
    )));
}

#[tokio::test]
async fn already_mastered_catalog_completes_on_start() {
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let storage = Storage::in_memory(catalog.items().to_vec());
    for id in 1..=3 {
        storage
            .mastery
            .upsert_mastery(ItemId::new(id), MasteryRecord::mastered())
            .await
            .unwrap();
    }
    let service = PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::clone(&storage.catalog),
        Arc::clone(&storage.mastery),
    );
    let (calls, observer) = completion_counter();

    let session = service.start_session_with_observer(observer).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(session.is_complete());
    assert!(session.current().is_none());
    assert_eq!(session.progress().mastered, 3);
}
