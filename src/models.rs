//! Wire types exchanged with the question-answering backend.
//!
//! Request bodies derive `Serialize`; response bodies derive `Deserialize`
//! and tolerate missing optional fields, since the backend omits them
//! freely (e.g. `index_ready` when the vector index failed to start).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog question shown on the testing page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleQuery {
    pub id: String,
    pub text: String,
    /// Question asks for narrative (situation/task/action/result) content.
    #[serde(default)]
    pub behavioral: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleQueriesResponse {
    #[serde(default)]
    pub queries: Vec<SampleQuery>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// Response of `POST /api/ask`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResult {
    #[serde(default)]
    pub answer: Option<String>,
}

/// A single ranked hit from `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Optional narrowing applied to a search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkAskItem {
    pub id: String,
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkAskRequest {
    pub items: Vec<BulkAskItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulkAskResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkAskResponse {
    #[serde(default)]
    pub results: Vec<BulkAskResult>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub index_ready: Option<bool>,
    #[serde(default)]
    pub groq_ready: Option<bool>,
}

/// One flattened experience story of the profile page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceStory {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub situation: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// Response of `GET /api/profile-data`. Contact details arrive already masked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub personal: serde_json::Map<String, Value>,
    #[serde(default)]
    pub contact: serde_json::Map<String, Value>,
    #[serde(default)]
    pub experience_stories: Vec<ExperienceStory>,
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub education: Value,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub career_goals: Value,
    #[serde(default)]
    pub methodology_stories: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
