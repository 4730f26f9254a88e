//! Configuration for scraping requests
//!
//! The original tool disabled TLS certificate verification unconditionally;
//! here verification defaults on and callers opt out explicitly.

use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default cap on concurrently ranked URLs
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Settings applied to every HTTP request issued for a ranking
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Per-request timeout, applied to both the HEAD and the GET
    pub timeout: Duration,

    /// Whether to verify TLS certificates
    pub verify_tls: bool,

    /// User agent string sent with every request
    pub user_agent: String,

    /// Maximum number of URLs ranked concurrently
    pub max_concurrent: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_tls: true,
            user_agent: format!("kwrank/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl ScrapeConfig {
    /// Validates the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be greater than zero".to_string(),
            ));
        }

        if self.max_concurrent < 1 {
            return Err(ConfigError::Validation(format!(
                "max_concurrent must be >= 1, got {}",
                self.max_concurrent
            )));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
