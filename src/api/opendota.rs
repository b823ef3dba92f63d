use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use nonzero_ext::nonzero;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{AccountId, Hero, PlayerEconomy};

pub const OPENDOTA_BASE_URL: &str = "https://api.opendota.com/api";

/// Connection settings shared by every request of one client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Per-request timeout
    pub timeout: Duration,

    pub requests_per_minute: NonZeroU32,
    pub burst: NonZeroU32,

    /// Sent as the `api_key` query parameter when set
    pub api_key: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            requests_per_minute: nonzero!(60_u32),
            burst: nonzero!(10_u32),
            api_key: None,
        }
    }
}

/// Client for the OpenDota REST API
pub struct OpenDotaClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

/// Response from /players/{account_id}
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResponse {
    /// Null or missing for private profiles
    #[serde(default)]
    pub profile: Option<ProfileData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    pub personaname: Option<String>,
    pub avatarfull: Option<String>,
}

/// Match summary from /players/{account_id}/matches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatch {
    pub match_id: Option<i64>,
    pub player_slot: Option<i64>,
    pub radiant_win: Option<bool>,
    pub hero_id: Option<i64>,
    pub start_time: Option<i64>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub assists: Option<i64>,
}

/// Detailed match data from /matches/{match_id}
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetails {
    pub match_id: Option<i64>,
    #[serde(default)]
    pub players: Vec<PlayerEconomy>,
}

impl OpenDotaClient {
    /// Create a new OpenDota client
    pub fn new(base_url: &str, settings: ClientSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let quota = Quota::per_minute(settings.requests_per_minute).allow_burst(settings.burst);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            limiter: RateLimiter::direct(quota),
        })
    }

    /// GET a path under the base URL and decode the JSON body.
    /// Failures are logged here and returned as values.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        self.limiter.until_ready().await;
        debug!("GET {}", url);

        let result = self.send(&url).await;

        if let Err(e) = &result {
            warn!("OpenDota request failed: {} - {}", url, e);
        }

        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut request = self.client.get(url).header("Accept", "application/json");

        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }

    /// Get a player's public profile
    pub async fn get_player(&self, account_id: AccountId) -> Result<PlayerResponse, FetchError> {
        self.fetch(&format!("/players/{}", account_id)).await
    }

    /// Get a player's most recent matches, newest first
    pub async fn get_player_matches(
        &self,
        account_id: AccountId,
        limit: u32,
    ) -> Result<Vec<RawMatch>, FetchError> {
        self.fetch(&format!("/players/{}/matches?limit={}", account_id, limit))
            .await
    }

    /// Get the full hero list
    pub async fn get_heroes(&self) -> Result<Vec<Hero>, FetchError> {
        self.fetch("/heroes").await
    }

    /// Get match details by ID
    pub async fn get_match(&self, match_id: i64) -> Result<MatchDetails, FetchError> {
        self.fetch(&format!("/matches/{}", match_id)).await
    }
}
