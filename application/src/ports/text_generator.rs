//! Text generator port
//!
//! Defines the interface for asking an external model for new generations.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while generating text.
///
/// One failure covers the whole request; there are no per-item errors.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the external text generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate up to `count` texts for `prompt`.
    ///
    /// Implementations may return fewer (including zero) texts.
    async fn generate(&self, prompt: &str, count: usize) -> Result<Vec<String>, GeneratorError>;
}
