//! HTTP contract with the question-answering backend.
//!
//! Controllers talk to the backend through the [`Backend`] trait so they
//! can be driven against a scripted fake in tests. [`HttpBackend`] is the
//! production implementation built on `reqwest`.
//!
//! # Endpoints
//!
//! | Method | Path | Body / params | Used fields |
//! |--------|------|---------------|-------------|
//! | `GET`  | `/api/health` | - | `status`, `index_ready`, `groq_ready` |
//! | `GET`  | `/api/sample-queries` | - | `queries[].{id,text,behavioral}` |
//! | `GET`  | `/api/search` | `q`, `category?`, `tag?` | `results[].{title,content,score}` |
//! | `POST` | `/api/ask` | `{question}` | `answer` |
//! | `POST` | `/api/bulk-ask` | `{items:[{id,question}]}` | `results[].{id,answer}` |
//! | `GET`  | `/api/profile-data` | - | profile sections |
//!
//! Any transport error, non-2xx status, or undecodable body becomes a
//! [`ClientError::Operation`]. Status codes are not inspected further.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AskRequest, AskResult, BulkAskItem, BulkAskRequest, BulkAskResponse, BulkAskResult, Health,
    ProfileData, SampleQueriesResponse, SampleQuery, SearchFilters, SearchResponse, SearchResult,
};

#[async_trait]
pub trait Backend: Send + Sync {
    async fn health(&self) -> ClientResult<Health>;

    async fn sample_queries(&self) -> ClientResult<Vec<SampleQuery>>;

    /// Ranked hits, in the order the backend returned them.
    async fn search(&self, query: &str, filters: &SearchFilters) -> ClientResult<Vec<SearchResult>>;

    async fn ask(&self, question: &str) -> ClientResult<AskResult>;

    async fn bulk_ask(&self, items: Vec<BulkAskItem>) -> ClientResult<Vec<BulkAskResult>>;

    async fn profile_data(&self) -> ClientResult<ProfileData>;
}

/// [`Backend`] over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::operation("building HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        context: &'static str,
        resp: Result<reqwest::Response, reqwest::Error>,
    ) -> ClientResult<T> {
        let resp = resp.map_err(|e| {
            tracing::debug!(context, error = %e, "request failed");
            ClientError::operation(context, e)
        })?;
        tracing::debug!(context, status = %resp.status(), "response");
        let resp = resp
            .error_for_status()
            .map_err(|e| ClientError::operation(context, e))?;
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::operation(context, e))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> ClientResult<Health> {
        let resp = self.client.get(self.url("/api/health")).send().await;
        Self::decode("GET /api/health", resp).await
    }

    async fn sample_queries(&self) -> ClientResult<Vec<SampleQuery>> {
        let resp = self
            .client
            .get(self.url("/api/sample-queries"))
            .send()
            .await;
        let body: SampleQueriesResponse = Self::decode("GET /api/sample-queries", resp).await?;
        Ok(body.queries)
    }

    async fn search(&self, query: &str, filters: &SearchFilters) -> ClientResult<Vec<SearchResult>> {
        let mut params: Vec<(&str, &str)> = vec![("q", query)];
        if let Some(ref category) = filters.category {
            params.push(("category", category.as_str()));
        }
        if let Some(ref tag) = filters.tag {
            params.push(("tag", tag.as_str()));
        }

        let resp = self
            .client
            .get(self.url("/api/search"))
            .query(&params)
            .send()
            .await;
        let body: SearchResponse = Self::decode("GET /api/search", resp).await?;
        Ok(body.results)
    }

    async fn ask(&self, question: &str) -> ClientResult<AskResult> {
        let resp = self
            .client
            .post(self.url("/api/ask"))
            .json(&AskRequest { question })
            .send()
            .await;
        Self::decode("POST /api/ask", resp).await
    }

    async fn bulk_ask(&self, items: Vec<BulkAskItem>) -> ClientResult<Vec<BulkAskResult>> {
        let resp = self
            .client
            .post(self.url("/api/bulk-ask"))
            .json(&BulkAskRequest { items })
            .send()
            .await;
        let body: BulkAskResponse = Self::decode("POST /api/bulk-ask", resp).await?;
        Ok(body.results)
    }

    async fn profile_data(&self) -> ClientResult<ProfileData> {
        let resp = self.client.get(self.url("/api/profile-data")).send().await;
        Self::decode("GET /api/profile-data", resp).await
    }
}
