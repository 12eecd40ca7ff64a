//! Demand scheduler configuration from TOML (`[scheduler]` section)
//!
//! ```toml
//! [scheduler]
//! enabled = true
//! interval_seconds = 5
//! target_pool_size = 5
//! requests_per_pair = 1
//! generator_timeout_seconds = 60
//! ```

use genpool_application::SchedulerParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    /// Run the background generation loop
    pub enabled: bool,
    pub interval_seconds: u64,
    /// Evaluating generations wanted per (subject, category)
    pub target_pool_size: usize,
    pub requests_per_pair: usize,
    pub generator_timeout_seconds: u64,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        let params = SchedulerParams::default();
        Self {
            enabled: true,
            interval_seconds: params.interval.as_secs(),
            target_pool_size: params.target_pool_size,
            requests_per_pair: params.requests_per_pair,
            generator_timeout_seconds: params.generator_timeout.as_secs(),
        }
    }
}

impl FileSchedulerConfig {
    /// Convert to application-layer parameters
    pub fn to_params(&self) -> SchedulerParams {
        SchedulerParams::default()
            .with_interval(Duration::from_secs(self.interval_seconds))
            .with_target_pool_size(self.target_pool_size)
            .with_requests_per_pair(self.requests_per_pair.max(1))
            .with_generator_timeout(Duration::from_secs(self.generator_timeout_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_params() {
        assert_eq!(FileSchedulerConfig::default().to_params(), SchedulerParams::default());
    }

    #[test]
    fn test_to_params() {
        let toml_str = r#"
[scheduler]
interval_seconds = 30
target_pool_size = 8
requests_per_pair = 0
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.scheduler.to_params();

        assert_eq!(params.interval, Duration::from_secs(30));
        assert_eq!(params.target_pool_size, 8);
        assert_eq!(params.requests_per_pair, 1);
        assert_eq!(params.generator_timeout, Duration::from_secs(60));
    }
}
