//! [`TableStore`] over the Supabase REST (PostgREST) API.
//!
//! Every table is served at `{base}/rest/v1/{table}`. Filters are sent as
//! `column=eq.value`, ordering as `order=column.asc|desc`, and writes ask
//! for `Prefer: return=representation` so the stored rows come back.

use ambiental_core::types::Record;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::error::{StoreError, NO_ROWS_CODE};
use crate::store::{Filter, SelectQuery, TableStore};

const PREFER_REPRESENTATION: &str = "return=representation";

/// Structured error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client for one Supabase project.
pub struct RestTableStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestTableStore {
    /// * `base_url` - project URL, e.g. `https://xyz.supabase.co`.
    /// * `api_key` - anon or service key, sent as `apikey`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    /// Decode a successful JSON array response, or turn a failure into a
    /// [`StoreError::Upstream`].
    async fn rows(response: Response) -> Result<Vec<Record>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// Query-string pairs for a select.
fn select_params(query: &SelectQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(query.filters.iter().map(filter_param));
    if let Some(order) = &query.order {
        let dir = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{dir}", order.column)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = query.offset {
        params.push(("offset".to_string(), offset.to_string()));
    }
    params
}

fn filter_param(filter: &Filter) -> (String, String) {
    (filter.column.clone(), format!("eq.{}", filter.value))
}

/// Build an [`StoreError::Upstream`] from a non-2xx body.
///
/// Uses the PostgREST `{code, message}` body when present, otherwise the
/// HTTP status and raw text.
fn parse_error_body(status: u16, body: &str) -> StoreError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => StoreError::Upstream {
            status: Some(status),
            code: err.code.unwrap_or_else(|| status.to_string()),
            message: err.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => StoreError::Upstream {
            status: Some(status),
            code: status.to_string(),
            message: body.to_string(),
        },
    }
}

fn no_rows(table: &str, key: &Filter) -> StoreError {
    StoreError::Upstream {
        status: Some(406),
        code: NO_ROWS_CODE.to_string(),
        message: format!("No {table} row with {} = {}", key.column, key.value),
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Record>, StoreError> {
        let response = self
            .request(Method::GET, table)
            .query(&select_params(query))
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, row: Record) -> Result<Record, StoreError> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&[row])
            .send()
            .await?;
        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into {table} returned no row")))
    }

    async fn update(
        &self,
        table: &str,
        key: &Filter,
        changes: Record,
    ) -> Result<Record, StoreError> {
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[filter_param(key)])
            .json(&changes)
            .send()
            .await?;
        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| no_rows(table, key))
    }

    async fn delete(&self, table: &str, key: &Filter) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[filter_param(key)])
            .send()
            .await?;
        if Self::rows(response).await?.is_empty() {
            return Err(no_rows(table, key));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.api_key)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(parse_error_body(status, &body))
        }
    }
}
