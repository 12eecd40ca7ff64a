//! HTTP text generator adapter.
//!
//! Sends `POST {endpoint}` with `{"prompt", "n", "max_length"}` and accepts
//! either response shape seen in the wild:
//!
//! ```json
//! {"results": [{"text": "..."}]}
//! {"generations": ["...", {"text": "..."}]}
//! ```

use async_trait::async_trait;
use genpool_application::ports::text_generator::{GeneratorError, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    n: usize,
    max_length: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Results { results: Vec<TextItem> },
    Generations { generations: Vec<TextItem> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextItem {
    Plain(String),
    Object { text: String },
}

impl GenerateResponse {
    fn into_texts(self) -> Vec<String> {
        let items = match self {
            GenerateResponse::Results { results } => results,
            GenerateResponse::Generations { generations } => generations,
        };
        items
            .into_iter()
            .map(|item| match item {
                TextItem::Plain(text) | TextItem::Object { text } => text,
            })
            .collect()
    }
}

/// Text generator reached over HTTP
pub struct HttpTextGenerator {
    endpoint: String,
    api_key: Option<String>,
    max_length: u32,
    client: Client,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>, max_length: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            max_length,
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, count: usize) -> Result<Vec<String>, GeneratorError> {
        let body = GenerateRequest {
            prompt,
            n: count,
            max_length: self.max_length,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GeneratorError::RequestFailed(format!("request timed out: {}", e))
            } else {
                GeneratorError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeneratorError::RequestFailed(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                self.endpoint,
                detail.trim()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GeneratorError::ConnectionError(e.to_string()))?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        let texts = parsed.into_texts();
        debug!("Generator returned {} of {} requested", texts.len(), count);
        Ok(texts)
    }
}
