use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

/// Default location of the upstream employee-record service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Connection settings for the upstream employee-record service.
///
/// The base URL is injected into the employee gateway at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base URL of the employee resource, without trailing slash
    pub base_url: String,
    /// Per-request transport timeout
    pub request_timeout: Duration,
    /// Total attempts per call when the upstream answers 429
    pub max_attempts: u32,
    /// Wait before the first retry; doubled for each further retry
    pub retry_delay: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// URL of a single employee record
    pub fn employee_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl FromEnv for UpstreamConfig {
    /// Reads from environment variables with defaults:
    /// - EMPLOYEE_API_BASE_URL: http://localhost:8112/api/v1/employee
    /// - EMPLOYEE_API_TIMEOUT_SECS: 30
    /// - EMPLOYEE_API_MAX_ATTEMPTS: 3
    /// - EMPLOYEE_API_RETRY_DELAY_MS: 500
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("EMPLOYEE_API_BASE_URL", DEFAULT_BASE_URL);
        let timeout_secs: u64 = env_parse_or("EMPLOYEE_API_TIMEOUT_SECS", 30)?;
        let max_attempts: u32 = env_parse_or("EMPLOYEE_API_MAX_ATTEMPTS", 3)?;
        let retry_delay_ms: u64 = env_parse_or("EMPLOYEE_API_RETRY_DELAY_MS", 500)?;

        if max_attempts == 0 {
            return Err(ConfigError::ParseError {
                key: "EMPLOYEE_API_MAX_ATTEMPTS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            max_attempts,
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}
