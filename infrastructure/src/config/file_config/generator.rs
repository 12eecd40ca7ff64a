//! Text generator backend configuration from TOML (`[generator]` section)
//!
//! ```toml
//! [generator]
//! endpoint = "http://127.0.0.1:5000/api/v1/generate"
//! api_key_env = "GENPOOL_GENERATOR_API_KEY"
//! max_length = 200
//! ```
//!
//! The key itself never lives in the config file; only the name of the
//! environment variable holding it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// URL receiving the generation POST
    pub endpoint: String,
    /// Environment variable holding a bearer token, if any
    pub api_key_env: Option<String>,
    /// Upper bound on generated length, forwarded to the backend
    pub max_length: u32,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/api/v1/generate".to_string(),
            api_key_env: Some("GENPOOL_GENERATOR_API_KEY".to_string()),
            max_length: 200,
        }
    }
}

impl FileGeneratorConfig {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_without_env_name() {
        let config = FileGeneratorConfig {
            api_key_env: None,
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_api_key_unset_variable() {
        let config = FileGeneratorConfig {
            api_key_env: Some("GENPOOL_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
