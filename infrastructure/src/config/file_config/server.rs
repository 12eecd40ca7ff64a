//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Raw server configuration from TOML
///
/// # Example
///
/// ```toml
/// [server]
/// ip = "0.0.0.0"
/// port = 8000
/// rate_limit_per_minute = 90   # 0 disables rate limiting
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address to bind
    pub ip: String,
    /// Port to bind
    pub port: u16,
    /// Requests allowed per client IP per minute
    pub rate_limit_per_minute: u32,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 8000,
            rate_limit_per_minute: 90,
        }
    }
}

impl FileServerConfig {
    /// `ip:port`, ready for a socket bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
