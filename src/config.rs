use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::{ClientSettings, OPENDOTA_BASE_URL};
use crate::pipeline::PipelineSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenDota API base URL
    pub opendota_api_url: String,

    /// Optional OpenDota API key
    pub opendota_api_key: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Token bucket refill rate for OpenDota requests
    pub rate_limit_per_minute: NonZeroU32,

    /// Token bucket size
    pub rate_limit_burst: NonZeroU32,

    /// Match detail requests in flight per player
    pub detail_concurrency: usize,

    /// Deadline in seconds for one two-player comparison
    pub comparison_timeout_secs: u64,

    /// Upper bound on the requested match count
    pub max_match_limit: u32,

    /// Match count pre-filled in the form
    pub default_match_limit: u32,

    /// Address the web server listens on
    pub bind_addr: String,

    /// Maximum number of stored comparisons
    pub store_capacity: usize,

    /// Seconds a stored comparison stays readable
    pub store_ttl_secs: u64,

    /// Maximum number of cached match details
    pub detail_cache_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            opendota_api_url: env::var("OPENDOTA_API_URL")
                .unwrap_or_else(|_| OPENDOTA_BASE_URL.to_string()),

            opendota_api_key: env::var("OPENDOTA_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,

            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("RATE_LIMIT_PER_MINUTE must be a positive number")?,

            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("RATE_LIMIT_BURST must be a positive number")?,

            detail_concurrency: env::var("DETAIL_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("DETAIL_CONCURRENCY must be a valid number")?,

            comparison_timeout_secs: env::var("COMPARISON_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("COMPARISON_TIMEOUT_SECS must be a valid number")?,

            max_match_limit: env::var("MAX_MATCH_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("MAX_MATCH_LIMIT must be a valid number")?,

            default_match_limit: env::var("DEFAULT_MATCH_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DEFAULT_MATCH_LIMIT must be a valid number")?,

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),

            store_capacity: env::var("STORE_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .context("STORE_CAPACITY must be a valid number")?,

            store_ttl_secs: env::var("STORE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("STORE_TTL_SECS must be a valid number")?,

            detail_cache_capacity: env::var("DETAIL_CACHE_CAPACITY")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .context("DETAIL_CACHE_CAPACITY must be a valid number")?,
        };

        config
            .pipeline_settings()
            .check_rate_budget(&config.client_settings())
            .context("COMPARISON_TIMEOUT_SECS is too short for MAX_MATCH_LIMIT at the configured rate limit")?;

        Ok(config)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(self.request_timeout_secs),
            requests_per_minute: self.rate_limit_per_minute,
            burst: self.rate_limit_burst,
            api_key: self.opendota_api_key.clone(),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            detail_concurrency: self.detail_concurrency,
            max_match_limit: self.max_match_limit,
            comparison_timeout: Duration::from_secs(self.comparison_timeout_secs),
        }
    }
}
