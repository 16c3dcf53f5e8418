use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::backend::{Backend, BoxFuture};
use crate::client::{build_client, StoreConfig};
use crate::error::StoreError;
use crate::query::Query;

/// [`Backend`] over the store's PostgREST endpoint.
pub struct RestBackend {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestBackend {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = build_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Turn a non-success response into [`StoreError::Status`], keeping the
/// body for diagnostics.
async fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn rows(resp: Response) -> Result<Vec<Value>, StoreError> {
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }
    let body = resp.bytes().await?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&body)?)
}

impl Backend for RestBackend {
    fn select(&self, query: Query) -> BoxFuture<'_, Result<Vec<Value>, StoreError>> {
        Box::pin(async move {
            let url = self.config.rest_url(&query.table);
            tracing::debug!(table = %query.table, "select");
            let resp = self
                .http
                .get(&url)
                .query(&query.to_params())
                .send()
                .await?;
            rows(check(resp).await?).await
        })
    }

    fn insert(&self, table: &str, row: Value) -> BoxFuture<'_, Result<Value, StoreError>> {
        let table = table.to_string();
        Box::pin(async move {
            let url = self.config.rest_url(&table);
            tracing::debug!(table = %table, "insert");
            let resp = self
                .http
                .post(&url)
                .header("Prefer", "return=representation")
                .json(&[row])
                .send()
                .await?;
            rows(check(resp).await?)
                .await?
                .into_iter()
                .next()
                .ok_or(StoreError::EmptyInsert { table })
        })
    }

    fn delete(&self, query: Query) -> BoxFuture<'_, Result<usize, StoreError>> {
        Box::pin(async move {
            let url = self.config.rest_url(&query.table);
            tracing::debug!(table = %query.table, "delete");
            // Only the filters apply to a delete.
            let params: Vec<_> = query
                .to_params()
                .into_iter()
                .filter(|(k, _)| k != "select" && k != "order" && k != "limit")
                .collect();
            let resp = self
                .http
                .delete(&url)
                .header("Prefer", "return=representation")
                .query(&params)
                .send()
                .await?;
            Ok(rows(check(resp).await?).await?.len())
        })
    }
}
