//! Prompt templates for the text generator

use serde::{Deserialize, Serialize};

/// A prompt the demand scheduler can send to the generator.
///
/// `{subject}` and `{category}` placeholders are filled in by [`render`](Self::render);
/// any other text is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Produce the prompt text for a concrete pair
    pub fn render(&self, subject: &str, category: &str) -> String {
        self.0
            .replace("{subject}", subject)
            .replace("{category}", category)
    }
}

impl From<&str> for PromptTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PromptTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
