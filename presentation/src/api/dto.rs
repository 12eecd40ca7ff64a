//! Wire types.
//!
//! Field names follow the client protocol: `title` is the subject and
//! `type` the category of a generation.

use genpool_application::{GenerationFilter, RatingRequest};
use genpool_domain::Generation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /generation/`.
///
/// Every field is optional at this level so that a missing one is reported
/// by name. Numbers are accepted wherever a string is expected, which lets
/// `classification` arrive as `2` or `"2"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingPayload {
    pub uuid: Option<Value>,
    pub generation: Option<Value>,
    pub title: Option<Value>,
    #[serde(rename = "type")]
    pub category: Option<Value>,
    pub classification: Option<Value>,
    pub client_id: Option<Value>,
}

fn scalar(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<RatingPayload> for RatingRequest {
    fn from(payload: RatingPayload) -> Self {
        RatingRequest {
            uuid: scalar(payload.uuid),
            generation: scalar(payload.generation),
            title: scalar(payload.title),
            category: scalar(payload.category),
            classification: scalar(payload.classification),
            client_id: scalar(payload.client_id),
        }
    }
}

/// `?title=&type=` on the list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

impl From<ListQuery> for GenerationFilter {
    fn from(query: ListQuery) -> Self {
        GenerationFilter {
            subject: query.title.filter(|t| !t.is_empty()),
            category: query.category.filter(|c| !c.is_empty()),
        }
    }
}

/// A generation as returned by the read endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationView {
    pub uuid: String,
    pub generation: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    pub ratings: BTreeMap<String, u32>,
    pub status: String,
}

impl From<&Generation> for GenerationView {
    fn from(generation: &Generation) -> Self {
        Self {
            uuid: generation.id().to_string(),
            generation: generation.text().to_string(),
            title: generation.subject().to_string(),
            category: generation.category().to_string(),
            submitter_id: generation.submitter_id().map(ToString::to_string),
            ratings: generation
                .ratings()
                .iter()
                .map(|(rater, c)| (rater.to_string(), c.value()))
                .collect(),
            status: generation.status().as_str().to_string(),
        }
    }
}
