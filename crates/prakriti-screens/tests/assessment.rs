use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use prakriti_auth::session::Session;
use prakriti_core::models::account::Account;
use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::question::Question;
use prakriti_core::tables;
use prakriti_screens::assessment::{
    AssessmentEvent, AssessmentPhase, AssessmentScreen, DotState, ForwardAction, Notice,
};
use prakriti_screens::error::ScreenError;
use prakriti_store::backend::{Backend, BoxFuture};
use prakriti_store::error::StoreError;
use prakriti_store::memory::{MemoryBackend, Operation};
use prakriti_store::query::Query;
use serde_json::{Value, json};
use uuid::Uuid;

fn question(order: i32, category: &str) -> Question {
    Question {
        id: Uuid::new_v4(),
        display_order: order,
        category: category.to_string(),
        question: format!("Question {order}"),
        vata_option: format!("vata {order}"),
        pitta_option: format!("pitta {order}"),
        kapha_option: format!("kapha {order}"),
    }
}

fn user() -> Account {
    Account {
        id: Uuid::new_v4(),
        full_name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        is_admin: false,
        age: None,
        gender: None,
        height: None,
        weight: None,
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

/// Seeds three questions out of display order.
fn store() -> Arc<MemoryBackend> {
    let store = Arc::new(MemoryBackend::new());
    store
        .seed(
            tables::QUESTIONS,
            &[question(2, "Body"), question(1, "Mind"), question(3, "Sleep")],
        )
        .unwrap();
    store
}

async fn loaded(store: &Arc<MemoryBackend>, session: Session) -> AssessmentScreen {
    let mut screen = AssessmentScreen::new(store.clone(), Arc::new(session));
    screen.load().await;
    store.clear_operations();
    screen
}

/// Stores inserts but answers with a row that cannot be decoded.
struct GarbledInserts(Arc<MemoryBackend>);

impl Backend for GarbledInserts {
    fn select(&self, query: Query) -> BoxFuture<'_, Result<Vec<Value>, StoreError>> {
        self.0.select(query)
    }

    fn insert(&self, table: &str, row: Value) -> BoxFuture<'_, Result<Value, StoreError>> {
        let inserted = self.0.insert(table, row);
        Box::pin(async move { inserted.await.map(|_| json!({ "id": "not-a-uuid" })) })
    }

    fn delete(&self, query: Query) -> BoxFuture<'_, Result<usize, StoreError>> {
        self.0.delete(query)
    }
}

fn inserts(store: &MemoryBackend) -> usize {
    store
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::Insert { .. }))
        .count()
}

#[test]
fn phase_transitions_are_bounded() {
    let start = AssessmentPhase::default();
    assert_eq!(start, AssessmentPhase::Answering { index: 0 });
    assert_eq!(start.apply(AssessmentEvent::Previous, 3), start);

    let last = AssessmentPhase::Answering { index: 2 };
    assert_eq!(last.apply(AssessmentEvent::Next, 3), last);
    assert_eq!(
        start.apply(AssessmentEvent::SelectDot(2), 3),
        AssessmentPhase::Answering { index: 2 }
    );
    assert_eq!(start.apply(AssessmentEvent::SelectDot(7), 3), start);
}

#[test]
fn submit_cycle_and_terminal_complete() {
    let answering = AssessmentPhase::Answering { index: 1 };
    let submitting = answering.apply(AssessmentEvent::Submit, 3);
    assert_eq!(submitting, AssessmentPhase::Submitting { index: 1 });
    assert_eq!(submitting.apply(AssessmentEvent::Next, 3), submitting);
    assert_eq!(submitting.apply(AssessmentEvent::SubmitFailed, 3), answering);

    let complete = submitting.apply(AssessmentEvent::SubmitSucceeded, 3);
    assert_eq!(complete, AssessmentPhase::Complete);
    assert_eq!(complete.apply(AssessmentEvent::Previous, 3), complete);
    assert_eq!(complete.apply(AssessmentEvent::Submit, 3), complete);
}

#[tokio::test]
async fn questions_load_in_display_order() {
    let store = store();
    let screen = loaded(&store, Session::signed_in(user())).await;

    let categories: Vec<_> = screen
        .questions()
        .rows()
        .iter()
        .map(|q| q.category.as_str())
        .collect();
    assert_eq!(categories, ["Mind", "Body", "Sleep"]);

    let view = screen.question_view().unwrap();
    assert_eq!((view.number, view.total), (1, 3));
    assert_eq!(view.category, "Mind");
    let order: Vec<_> = view.options.iter().map(|o| o.dosha).collect();
    assert_eq!(order, Dosha::ALL);
    assert!(view.options.iter().all(|o| !o.selected));
}

#[tokio::test]
async fn failed_load_leaves_no_questions() {
    let store = store();
    store.fail_table(tables::QUESTIONS, true);
    let mut screen = AssessmentScreen::new(store.clone(), Arc::new(Session::anonymous()));
    screen.load().await;

    assert!(!screen.is_loading());
    assert_eq!(screen.total(), 0);
    assert_eq!(screen.progress(), 0.0);
    assert!(screen.question_view().is_none());
}

#[tokio::test]
async fn answering_overwrites_and_tracks_progress() {
    let store = store();
    let mut screen = loaded(&store, Session::signed_in(user())).await;

    screen.choose(Dosha::Vata);
    screen.choose(Dosha::Kapha);
    assert_eq!(screen.answered_count(), 1);
    let view = screen.question_view().unwrap();
    assert!(view.options[2].selected);
    assert!(!view.options[0].selected);

    screen.next();
    screen.choose(Dosha::Pitta);
    assert!((screen.progress() - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(
        screen.dots(),
        [DotState::Answered, DotState::Current, DotState::Unanswered]
    );
}

#[tokio::test]
async fn navigation_buttons_follow_position() {
    let store = store();
    let mut screen = loaded(&store, Session::signed_in(user())).await;

    assert!(!screen.previous_enabled());
    assert_eq!(screen.forward_action(), ForwardAction::Next);

    screen.select_dot(2);
    assert!(screen.previous_enabled());
    assert_eq!(
        screen.forward_action(),
        ForwardAction::Submit {
            enabled: false,
            submitting: false
        }
    );

    for index in 0..3 {
        screen.select_dot(index);
        screen.choose(Dosha::Pitta);
    }
    assert_eq!(
        screen.forward_action(),
        ForwardAction::Submit {
            enabled: true,
            submitting: false
        }
    );
}

#[tokio::test]
async fn incomplete_submission_writes_nothing() {
    let store = store();
    let mut screen = loaded(&store, Session::signed_in(user())).await;
    screen.choose(Dosha::Vata);

    let err = screen.submit().await.unwrap_err();
    assert!(matches!(
        err,
        ScreenError::Incomplete {
            answered: 1,
            total: 3
        }
    ));
    assert_eq!(screen.take_notice(), Some(Notice::AnswerAllQuestions));
    assert_eq!(
        Notice::AnswerAllQuestions.message(),
        "Please answer all questions"
    );
    assert_eq!(screen.take_notice(), None);
    assert_eq!(inserts(&store), 0);
    assert_eq!(screen.phase(), AssessmentPhase::Answering { index: 0 });
}

#[tokio::test]
async fn submission_stores_scores_and_fires_callback() {
    let store = store();
    let account = user();
    let user_id = account.id;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut screen = AssessmentScreen::new(store.clone(), Arc::new(Session::signed_in(account)))
        .on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    screen.load().await;

    for (index, dosha) in [Dosha::Vata, Dosha::Pitta, Dosha::Vata].into_iter().enumerate() {
        screen.select_dot(index);
        screen.choose(dosha);
    }
    let stored = screen.submit().await.unwrap();

    assert_eq!(
        (stored.vata_score, stored.pitta_score, stored.kapha_score),
        (2, 1, 0)
    );
    assert_eq!(stored.dominant_dosha, "Vata");
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.assessment_data.len(), 3);
    assert_eq!(screen.phase(), AssessmentPhase::Complete);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.rows(tables::ASSESSMENTS).len(), 1);

    // Complete is terminal.
    screen.choose(Dosha::Kapha);
    assert!(matches!(
        screen.submit().await,
        Err(ScreenError::NotAnswering)
    ));
    assert_eq!(inserts(&store), 1);
}

#[tokio::test]
async fn failed_insert_returns_to_answering() {
    let store = store();
    let mut screen = loaded(&store, Session::signed_in(user())).await;
    for index in 0..3 {
        screen.select_dot(index);
        screen.choose(Dosha::Kapha);
    }
    store.fail_table(tables::ASSESSMENTS, true);

    assert!(matches!(screen.submit().await, Err(ScreenError::Store(_))));
    assert_eq!(screen.phase(), AssessmentPhase::Answering { index: 2 });
    assert_eq!(screen.answered_count(), 3);
    assert!(store.rows(tables::ASSESSMENTS).is_empty());

    store.fail_table(tables::ASSESSMENTS, false);
    let stored = screen.submit().await.unwrap();
    assert_eq!(stored.dominant_dosha, "Kapha");
}

#[tokio::test]
async fn submission_requires_a_user() {
    let store = store();
    let mut screen = loaded(&store, Session::anonymous()).await;
    for index in 0..3 {
        screen.select_dot(index);
        screen.choose(Dosha::Vata);
    }

    assert!(matches!(
        screen.submit().await,
        Err(ScreenError::NotSignedIn)
    ));
    assert_eq!(inserts(&store), 0);
}

#[tokio::test]
async fn empty_questionnaire_cannot_submit() {
    let store = Arc::new(MemoryBackend::new());
    let mut screen = loaded(&store, Session::signed_in(user())).await;

    assert!(matches!(
        screen.submit().await,
        Err(ScreenError::NoQuestions)
    ));
    assert_eq!(inserts(&store), 0);
}

#[tokio::test]
async fn answers_for_unlisted_questions_are_ignored() {
    let store = store();
    let mut screen = loaded(&store, Session::signed_in(user())).await;

    for _ in 0..3 {
        screen.answer(Uuid::new_v4(), Dosha::Vata);
    }
    screen.select_dot(2);

    assert!(screen.answers().is_empty());
    assert_eq!(screen.answered_count(), 0);
    assert_eq!(screen.progress(), 0.0);
    assert!(!screen.is_complete());
    assert_eq!(
        screen.forward_action(),
        ForwardAction::Submit {
            enabled: false,
            submitting: false
        }
    );
    assert!(matches!(
        screen.submit().await,
        Err(ScreenError::Incomplete { answered: 0, total: 3 })
    ));
    assert_eq!(inserts(&store), 0);
}

#[tokio::test]
async fn unreadable_stored_result_still_completes() {
    let store = store();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut screen = AssessmentScreen::new(
        Arc::new(GarbledInserts(store.clone())),
        Arc::new(Session::signed_in(user())),
    )
    .on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    screen.load().await;
    for index in 0..3 {
        screen.select_dot(index);
        screen.choose(Dosha::Pitta);
    }

    match screen.submit().await {
        Err(ScreenError::Store(e)) => assert!(e.write_committed()),
        other => panic!("expected an unreadable insert, got {other:?}"),
    }
    assert_eq!(screen.phase(), AssessmentPhase::Complete);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.rows(tables::ASSESSMENTS).len(), 1);

    // No second write for the same answers.
    assert!(matches!(
        screen.submit().await,
        Err(ScreenError::NotAnswering)
    ));
    assert_eq!(store.rows(tables::ASSESSMENTS).len(), 1);
}
