//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! where needed.

mod catalog;
mod generator;
mod logging;
mod promotion;
mod scheduler;
mod server;
mod storage;

pub use catalog::FileCatalogConfig;
pub use generator::FileGeneratorConfig;
pub use logging::FileLoggingConfig;
pub use promotion::FilePromotionConfig;
pub use scheduler::FileSchedulerConfig;
pub use server::FileServerConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the service refuses to start.
    Error,
    /// Non-fatal: a value is adjusted or ignored.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `scheduler.interval_seconds`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub storage: FileStorageConfig,
    pub promotion: FilePromotionConfig,
    pub scheduler: FileSchedulerConfig,
    pub catalog: FileCatalogConfig,
    pub generator: FileGeneratorConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Scheduler and generator settings are only checked while the
    /// scheduler is enabled.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.promotion.threshold == 0 {
            issues.push(ConfigIssue::error(
                "promotion.threshold",
                "must be at least 1",
            ));
        }

        if self.server.rate_limit_per_minute == 0 {
            issues.push(ConfigIssue::warning(
                "server.rate_limit_per_minute",
                "0 disables rate limiting",
            ));
        }

        if !self.storage.ephemeral && self.storage.path.as_os_str().is_empty() {
            issues.push(ConfigIssue::error(
                "storage.path",
                "cannot be empty unless storage.ephemeral is set",
            ));
        }

        if self.scheduler.enabled {
            let scheduler = &self.scheduler;
            if scheduler.interval_seconds == 0 {
                issues.push(ConfigIssue::error(
                    "scheduler.interval_seconds",
                    "must be at least 1",
                ));
            }
            if scheduler.target_pool_size == 0 {
                issues.push(ConfigIssue::error(
                    "scheduler.target_pool_size",
                    "must be at least 1",
                ));
            }
            if scheduler.generator_timeout_seconds == 0 {
                issues.push(ConfigIssue::error(
                    "scheduler.generator_timeout_seconds",
                    "must be at least 1",
                ));
            }
            if scheduler.requests_per_pair == 0 {
                issues.push(ConfigIssue::warning(
                    "scheduler.requests_per_pair",
                    "0 is treated as 1",
                ));
            }
            if self.generator.endpoint.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    "generator.endpoint",
                    "required while the scheduler is enabled",
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
ip = "0.0.0.0"
port = 8080
rate_limit_per_minute = 30

[storage]
path = "/var/lib/genpool/generations.json"

[promotion]
threshold = 7

[scheduler]
enabled = false

[catalog]
path = "prompts.toml"

[generator]
endpoint = "http://gen.local/api"
max_length = 120

[logging]
verdict_log = "verdicts.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.rate_limit_per_minute, 30);
        assert_eq!(
            config.storage.path,
            PathBuf::from("/var/lib/genpool/generations.json")
        );
        assert_eq!(config.promotion.threshold, 7);
        assert!(!config.scheduler.enabled);
        assert_eq!(config.catalog.path, PathBuf::from("prompts.toml"));
        assert_eq!(config.generator.endpoint, "http://gen.local/api");
        assert_eq!(config.generator.max_length, 120);
        assert_eq!(
            config.logging.verdict_log,
            Some(PathBuf::from("verdicts.jsonl"))
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.path, PathBuf::from("generations.json"));
        assert!(!config.storage.ephemeral);
        assert_eq!(config.promotion.threshold, 5);
        assert!(config.scheduler.enabled);
        assert!(config.logging.verdict_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_errors() {
        let toml_str = r#"
[promotion]
threshold = 0

[scheduler]
interval_seconds = 0
target_pool_size = 0

[generator]
endpoint = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let fields: Vec<&str> = config
            .validate()
            .iter()
            .filter(|i| i.is_error())
            .map(|i| i.field)
            .collect();

        assert_eq!(
            fields,
            vec![
                "promotion.threshold",
                "scheduler.interval_seconds",
                "scheduler.target_pool_size",
                "generator.endpoint",
            ]
        );
    }

    #[test]
    fn test_disabled_scheduler_skips_its_checks() {
        let toml_str = r#"
[scheduler]
enabled = false
interval_seconds = 0

[generator]
endpoint = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_rate_limit_is_a_warning() {
        let config: FileConfig =
            toml::from_str("[server]\nrate_limit_per_minute = 0\n").unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(
            issues[0].to_string(),
            "server.rate_limit_per_minute: 0 disables rate limiting"
        );
    }
}
