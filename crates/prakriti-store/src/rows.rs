//! Typed table operations.
//!
//! One function per query the application makes. Each builds its [`Query`],
//! runs it on a [`Backend`] and decodes the rows.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use prakriti_core::models::account::Account;
use prakriti_core::models::assessment::{AssessmentResult, NewAssessmentResult};
use prakriti_core::models::follow_up::{FollowUp, NewFollowUp};
use prakriti_core::models::question::Question;
use prakriti_core::models::schedule::ScheduleEntry;
use prakriti_core::tables::{self, columns};

use crate::backend::Backend;
use crate::error::StoreError;
use crate::query::{Direction, Query};

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(StoreError::from))
        .collect()
}

/// Run a select and decode every row.
pub async fn select_as<T: DeserializeOwned>(
    backend: &dyn Backend,
    query: Query,
) -> Result<Vec<T>, StoreError> {
    decode(backend.select(query).await?)
}

/// Insert one record and decode the stored row. A row that was written
/// but does not decode is reported as [`StoreError::UnreadableInsert`].
pub async fn insert_as<N: Serialize, T: DeserializeOwned>(
    backend: &dyn Backend,
    table: &str,
    record: &N,
) -> Result<T, StoreError> {
    let row = serde_json::to_value(record)?;
    let stored = backend.insert(table, row).await?;
    serde_json::from_value(stored).map_err(|source| StoreError::UnreadableInsert {
        table: table.to_string(),
        source,
    })
}

/// Non-administrator accounts, newest first.
pub async fn list_accounts(backend: &dyn Backend) -> Result<Vec<Account>, StoreError> {
    let query = Query::table(tables::PROFILES)
        .eq(columns::IS_ADMIN, false)
        .order(columns::CREATED_AT, Direction::Descending);
    let accounts: Vec<Account> = select_as(backend, query).await?;
    tracing::debug!(count = accounts.len(), "listed accounts");
    Ok(accounts)
}

/// One profile by id.
pub async fn get_account(backend: &dyn Backend, id: Uuid) -> Result<Account, StoreError> {
    let query = Query::table(tables::PROFILES)
        .eq(columns::ID, id.to_string())
        .limit(1);
    select_as(backend, query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::NotFound {
            table: tables::PROFILES.to_string(),
        })
}

/// Follow-ups of one account, soonest first.
pub async fn list_follow_ups(
    backend: &dyn Backend,
    account_id: Uuid,
) -> Result<Vec<FollowUp>, StoreError> {
    let query = Query::table(tables::FOLLOW_UPS)
        .eq(columns::USER_ID, account_id.to_string())
        .order(columns::SCHEDULED_DATE, Direction::Ascending);
    let follow_ups: Vec<FollowUp> = select_as(backend, query).await?;
    tracing::debug!(account_id = %account_id, count = follow_ups.len(), "listed follow-ups");
    Ok(follow_ups)
}

pub async fn insert_follow_up(
    backend: &dyn Backend,
    follow_up: &NewFollowUp,
) -> Result<FollowUp, StoreError> {
    insert_as(backend, tables::FOLLOW_UPS, follow_up).await
}

/// Delete one follow-up by id. Returns how many rows the store removed.
pub async fn delete_follow_up(backend: &dyn Backend, id: Uuid) -> Result<usize, StoreError> {
    let query = Query::table(tables::FOLLOW_UPS).eq(columns::ID, id.to_string());
    backend.delete(query).await
}

/// The whole questionnaire in display order.
pub async fn list_questions(backend: &dyn Backend) -> Result<Vec<Question>, StoreError> {
    let query =
        Query::table(tables::QUESTIONS).order(columns::DISPLAY_ORDER, Direction::Ascending);
    select_as(backend, query).await
}

pub async fn insert_result(
    backend: &dyn Backend,
    result: &NewAssessmentResult,
) -> Result<AssessmentResult, StoreError> {
    insert_as(backend, tables::ASSESSMENTS, result).await
}

/// The account's most recent assessment, if it has one.
pub async fn latest_result(
    backend: &dyn Backend,
    account_id: Uuid,
) -> Result<Option<AssessmentResult>, StoreError> {
    let query = Query::table(tables::ASSESSMENTS)
        .eq(columns::USER_ID, account_id.to_string())
        .order(columns::ASSESSED_AT, Direction::Descending)
        .limit(1);
    Ok(select_as(backend, query).await?.into_iter().next())
}

/// Schedule templates for one dosha key, in display order.
pub async fn list_schedule_entries(
    backend: &dyn Backend,
    dosha_type: &str,
) -> Result<Vec<ScheduleEntry>, StoreError> {
    let query = Query::table(tables::SCHEDULE_TEMPLATES)
        .eq(columns::DOSHA_TYPE, dosha_type)
        .order(columns::DISPLAY_ORDER, Direction::Ascending);
    select_as(backend, query).await
}
