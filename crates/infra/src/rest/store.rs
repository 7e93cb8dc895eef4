//! `RecordStore` over the backend's PostgREST endpoint

use std::sync::Arc;

use async_trait::async_trait;
use opsboard_core::{RecordStore, TableQuery};
use opsboard_domain::{OpsBoardError, Page, PageRequest, Record, RecordId, Result};
use reqwest::header::CONTENT_RANGE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, instrument};

use super::query::{parse_content_range, read_params};
use super::AccessTokenProvider;
use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

/// Rows fetched per request when reading a whole filtered set
const FETCH_CHUNK: u32 = 1000;

/// PostgREST-backed table store
pub struct RestRecordStore {
    http: HttpClient,
    rest_url: String,
    anon_key: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl RestRecordStore {
    /// `base_url` is the project URL; requests go to `{base_url}/rest/v1`.
    pub fn new(
        http: HttpClient,
        base_url: &str,
        anon_key: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
            tokens,
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let bearer = self.tokens.access_token().unwrap_or_else(|| self.anon_key.clone());
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .bearer_auth(bearer)
    }

    async fn read_range(
        &self,
        query: &TableQuery,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Record>, Option<u64>)> {
        let request = self
            .request(Method::GET, &query.table)
            .query(&read_params(query))
            .query(&[("offset", offset.to_string()), ("limit", limit.to_string())])
            .header("Prefer", "count=exact");
        let response = self.http.send(request).await?;

        let status = response.status();
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        // Offset past the last row.
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok((Vec::new(), total));
        }
        let rows: Vec<Record> = json_body(response).await?;
        Ok((rows, total))
    }

    /// Single attempt, no retry.
    async fn write(&self, request: RequestBuilder, prefer: &str) -> Result<Vec<Record>> {
        let response = self.http.send_once(request.header("Prefer", prefer)).await?;
        json_body(response).await
    }
}

async fn json_body(response: Response) -> Result<Vec<Record>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    response.json::<Vec<Record>>().await.map_err(|err| InfraError::from(err).into())
}

#[async_trait]
impl RecordStore for RestRecordStore {
    #[instrument(skip(self, query), fields(table = %query.table, page = page.page))]
    async fn select_page(&self, query: &TableQuery, page: PageRequest) -> Result<Page> {
        let (items, total) = self.read_range(query, page.offset(), page.size).await?;
        let total = total.unwrap_or(page.offset() + items.len() as u64);
        debug!(rows = items.len(), total, "Fetched page");
        Ok(Page { items, total, page: page.page, page_size: page.size })
    }

    /// Follows `Content-Range` until every counted row is read; the server
    /// may cap chunks below `FETCH_CHUNK`. A short chunk only ends the scan
    /// when the total is unknown.
    #[instrument(skip(self, query), fields(table = %query.table))]
    async fn select_all(&self, query: &TableQuery) -> Result<Vec<Record>> {
        let mut rows = Vec::new();
        loop {
            let (chunk, total) = self.read_range(query, rows.len() as u64, FETCH_CHUNK).await?;
            let fetched = chunk.len();
            rows.extend(chunk);
            let done = match total {
                Some(total) => rows.len() as u64 >= total,
                None => fetched < FETCH_CHUNK as usize,
            };
            if done || fetched == 0 {
                break;
            }
        }
        debug!(rows = rows.len(), "Fetched all rows");
        Ok(rows)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn insert(&self, table: &str, rows: Vec<Record>) -> Result<Vec<Record>> {
        let request = self.request(Method::POST, table).json(&rows);
        let stored = self.write(request, "return=representation").await?;
        info!(table, written = stored.len(), "Inserted rows");
        Ok(stored)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Record>,
        conflict: &[&str],
    ) -> Result<Vec<Record>> {
        let request = self
            .request(Method::POST, table)
            .query(&[("on_conflict", conflict.join(","))])
            .json(&rows);
        let stored =
            self.write(request, "resolution=merge-duplicates,return=representation").await?;
        info!(table, written = stored.len(), "Upserted rows");
        Ok(stored)
    }

    #[instrument(skip(self, row))]
    async fn update(&self, table: &str, id: &RecordId, row: Record) -> Result<Record> {
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .json(&row);
        self.write(request, "return=representation")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| OpsBoardError::NotFound(format!("{table} row {id}")))
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: &str, id: &RecordId) -> Result<()> {
        let request = self.request(Method::DELETE, table).query(&[("id", format!("eq.{id}"))]);
        let response = self.http.send_once(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        info!(table, %id, "Deleted row");
        Ok(())
    }
}
