use prakriti_core::models::account::Account;
use prakriti_core::models::assessment::{AnswerSet, NewAssessmentResult};
use prakriti_core::models::follow_up::{FollowUpKind, NewFollowUp};
use prakriti_core::models::schedule::ScheduleEntry;
use prakriti_core::tables;
use prakriti_store::backend::Backend;
use prakriti_store::error::StoreError;
use prakriti_store::memory::MemoryBackend;
use prakriti_store::query::Query;
use prakriti_store::rows;
use serde_json::json;
use uuid::Uuid;

fn account(name: &str, is_admin: bool, created_at: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_admin,
        age: None,
        gender: None,
        height: None,
        weight: None,
        created_at: created_at.parse().unwrap(),
    }
}

fn entry(dosha: &str, time: &str, order: i32, activity: &str) -> ScheduleEntry {
    ScheduleEntry {
        id: Uuid::new_v4(),
        dosha_type: dosha.to_string(),
        time_of_day: time.to_string(),
        display_order: order,
        activity: activity.to_string(),
        description: None,
        duration_minutes: None,
        benefits: None,
    }
}

#[tokio::test]
async fn list_accounts_skips_admins_newest_first() {
    let store = MemoryBackend::new();
    store
        .seed(
            tables::PROFILES,
            &[
                account("Old", false, "2024-01-01T00:00:00Z"),
                account("Admin", true, "2024-02-01T00:00:00Z"),
                account("New", false, "2024-03-01T00:00:00Z"),
            ],
        )
        .unwrap();

    let accounts = rows::list_accounts(&store).await.unwrap();
    let names: Vec<_> = accounts.iter().map(|a| a.full_name.as_str()).collect();
    assert_eq!(names, ["New", "Old"]);
}

#[tokio::test]
async fn insert_assigns_id_timestamp_and_completed() {
    let store = MemoryBackend::new();
    let follow_up = NewFollowUp {
        user_id: Uuid::new_v4(),
        title: "Check diet".to_string(),
        description: String::new(),
        follow_up_type: FollowUpKind::CheckIn,
        scheduled_date: "2024-05-01T09:00:00Z".parse().unwrap(),
        created_by: Uuid::new_v4(),
    };

    let stored = rows::insert_follow_up(&store, &follow_up).await.unwrap();
    assert!(!stored.completed);
    assert!(stored.created_at.is_some());
    assert_eq!(stored.user_id, follow_up.user_id);
    assert_eq!(store.rows(tables::FOLLOW_UPS).len(), 1);
}

#[tokio::test]
async fn latest_result_is_the_newest_insert() {
    let store = MemoryBackend::new();
    let user = Uuid::new_v4();
    for label in ["Vata", "Pitta-Kapha"] {
        rows::insert_result(
            &store,
            &NewAssessmentResult {
                user_id: user,
                vata_score: 0,
                pitta_score: 0,
                kapha_score: 0,
                dominant_dosha: label.to_string(),
                assessment_data: AnswerSet::new(),
            },
        )
        .await
        .unwrap();
    }

    let latest = rows::latest_result(&store, user).await.unwrap().unwrap();
    assert_eq!(latest.dominant_dosha, "Pitta-Kapha");
    assert!(rows::latest_result(&store, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn schedule_entries_filter_by_key_in_display_order() {
    let store = MemoryBackend::new();
    store
        .seed(
            tables::SCHEDULE_TEMPLATES,
            &[
                entry("Vata", "evening", 3, "Walk"),
                entry("Pitta", "morning", 1, "Cool shower"),
                entry("Vata", "morning", 1, "Oil massage"),
                entry("Vata", "morning", 2, "Warm breakfast"),
            ],
        )
        .unwrap();

    let entries = rows::list_schedule_entries(&store, "Vata").await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.activity.as_str()).collect();
    assert_eq!(names, ["Oil massage", "Warm breakfast", "Walk"]);
}

#[tokio::test]
async fn delete_removes_only_the_matching_row() {
    let store = MemoryBackend::new();
    let keep = Uuid::new_v4();
    let drop = Uuid::new_v4();
    store
        .seed(
            tables::FOLLOW_UPS,
            &[json!({"id": keep.to_string()}), json!({"id": drop.to_string()})],
        )
        .unwrap();

    assert_eq!(rows::delete_follow_up(&store, drop).await.unwrap(), 1);
    let remaining = store.rows(tables::FOLLOW_UPS);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], json!(keep.to_string()));
}

#[tokio::test]
async fn failing_table_errors_and_is_still_recorded() {
    let store = MemoryBackend::new();
    store.fail_table(tables::QUESTIONS, true);

    let err = rows::list_questions(&store).await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert_eq!(store.operations().len(), 1);
    assert_eq!(store.operations()[0].table(), tables::QUESTIONS);

    store.fail_table(tables::QUESTIONS, false);
    assert!(rows::list_questions(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_tables_are_rejected() {
    let store = MemoryBackend::new();
    let err = store.select(Query::table("profile")).await.unwrap_err();
    assert!(matches!(err, StoreError::UnknownTable(t) if t == "profile"));
    assert!(store.operations().is_empty());
}
