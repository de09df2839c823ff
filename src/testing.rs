//! Scripted [`Backend`] for controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::api::Backend;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AskResult, BulkAskItem, BulkAskResponse, BulkAskResult, Health, ProfileData,
    SampleQueriesResponse, SampleQuery, SearchFilters, SearchResponse, SearchResult,
};

/// Canned response: a JSON body to decode, or a failure.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(String),
    Fail,
}

impl Reply {
    pub fn ok(json: impl Into<String>) -> Self {
        Reply::Json(json.into())
    }

    fn decode<T: DeserializeOwned>(self, context: &'static str) -> ClientResult<T> {
        match self {
            Reply::Json(body) => {
                serde_json::from_str(&body).map_err(|e| ClientError::operation(context, e))
            }
            Reply::Fail => Err(ClientError::operation(context, "backend unavailable")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Health,
    SampleQueries,
    Search(String, SearchFilters),
    Ask(String),
    BulkAsk(Vec<BulkAskItem>),
    Profile,
}

pub struct FakeBackend {
    health: Mutex<VecDeque<Reply>>,
    queries: Mutex<VecDeque<Reply>>,
    search: Mutex<VecDeque<Reply>>,
    ask: Mutex<VecDeque<Reply>>,
    bulk: Mutex<VecDeque<Reply>>,
    profile: Mutex<VecDeque<Reply>>,
    log: Mutex<Vec<Call>>,
    gated: AtomicBool,
    gate: Semaphore,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            health: Mutex::default(),
            queries: Mutex::default(),
            search: Mutex::default(),
            ask: Mutex::default(),
            bulk: Mutex::default(),
            profile: Mutex::default(),
            log: Mutex::default(),
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    pub fn with_health(self, r: Reply) -> Self {
        self.health.lock().unwrap().push_back(r);
        self
    }

    pub fn with_queries(self, r: Reply) -> Self {
        self.queries.lock().unwrap().push_back(r);
        self
    }

    pub fn with_search(self, r: Reply) -> Self {
        self.search.lock().unwrap().push_back(r);
        self
    }

    pub fn with_ask(self, r: Reply) -> Self {
        self.ask.lock().unwrap().push_back(r);
        self
    }

    pub fn with_bulk(self, r: Reply) -> Self {
        self.bulk.lock().unwrap().push_back(r);
        self
    }

    pub fn with_profile(self, r: Reply) -> Self {
        self.profile.lock().unwrap().push_back(r);
        self
    }

    /// Every call blocks until [`release`](Self::release) hands out a permit.
    pub fn gated(self) -> Self {
        self.gated.store(true, Ordering::SeqCst);
        self
    }

    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn log(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn asked(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|c| match c {
                Call::Ask(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(&self, call: Call) {
        self.log.lock().unwrap().push(call);
        if self.gated.load(Ordering::SeqCst) {
            self.gate.acquire().await.unwrap().forget();
        }
    }

    fn next(queue: &Mutex<VecDeque<Reply>>) -> Reply {
        queue.lock().unwrap().pop_front().unwrap_or(Reply::Fail)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health(&self) -> ClientResult<Health> {
        let reply = Self::next(&self.health);
        self.enter(Call::Health).await;
        reply.decode("GET /api/health")
    }

    async fn sample_queries(&self) -> ClientResult<Vec<SampleQuery>> {
        let reply = Self::next(&self.queries);
        self.enter(Call::SampleQueries).await;
        let body: SampleQueriesResponse = reply.decode("GET /api/sample-queries")?;
        Ok(body.queries)
    }

    async fn search(&self, query: &str, filters: &SearchFilters) -> ClientResult<Vec<SearchResult>> {
        let reply = Self::next(&self.search);
        self.enter(Call::Search(query.to_string(), filters.clone()))
            .await;
        let body: SearchResponse = reply.decode("GET /api/search")?;
        Ok(body.results)
    }

    async fn ask(&self, question: &str) -> ClientResult<AskResult> {
        let reply = Self::next(&self.ask);
        self.enter(Call::Ask(question.to_string())).await;
        reply.decode("POST /api/ask")
    }

    async fn bulk_ask(&self, items: Vec<BulkAskItem>) -> ClientResult<Vec<BulkAskResult>> {
        let reply = Self::next(&self.bulk);
        self.enter(Call::BulkAsk(items)).await;
        let body: BulkAskResponse = reply.decode("POST /api/bulk-ask")?;
        Ok(body.results)
    }

    async fn profile_data(&self) -> ClientResult<ProfileData> {
        let reply = Self::next(&self.profile);
        self.enter(Call::Profile).await;
        reply.decode("GET /api/profile-data")
    }
}
