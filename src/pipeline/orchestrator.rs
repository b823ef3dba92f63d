use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ClientSettings, OpenDotaClient};
use crate::error::CompareError;
use crate::models::{AccountId, Comparison};
use crate::pipeline::PlayerAggregator;
use crate::store::{ComparisonStore, MatchDetailCache};

/// Tuning for a comparison run
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Match detail requests in flight per player
    pub detail_concurrency: usize,

    /// Larger requested limits are clamped to this
    pub max_match_limit: u32,

    /// Deadline for a whole two-player comparison
    pub comparison_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            detail_concurrency: 4,
            max_match_limit: 100,
            comparison_timeout: Duration::from_secs(300),
        }
    }
}

/// Requests one player costs: profile, match list, hero catalog, then one
/// detail per match
pub const FIXED_REQUESTS_PER_PLAYER: u64 = 3;

impl PipelineSettings {
    /// Upstream requests of a cold-cache comparison at `limit` matches
    pub fn requests_per_comparison(limit: u32) -> u64 {
        2 * (FIXED_REQUESTS_PER_PLAYER + u64::from(limit))
    }

    /// Seconds the rate limiter needs to release the requests of a
    /// comparison at `max_match_limit`, not counting response time
    pub fn paced_secs(&self, client: &ClientSettings) -> u64 {
        let requests = Self::requests_per_comparison(self.max_match_limit);
        let waiting = requests.saturating_sub(u64::from(client.burst.get()));
        let per_minute = u64::from(client.requests_per_minute.get());

        (waiting * 60).div_ceil(per_minute)
    }

    /// Fails when a comparison at the largest allowed limit cannot be paced
    /// within the deadline
    pub fn check_rate_budget(&self, client: &ClientSettings) -> Result<(), CompareError> {
        let needed = self.paced_secs(client);
        let deadline = self.comparison_timeout.as_secs();

        if needed > deadline {
            return Err(CompareError::BudgetExceeded {
                limit: self.max_match_limit,
                needed,
                deadline,
            });
        }
        Ok(())
    }
}

/// Runs two-player comparisons and keeps their results by id
pub struct RequestOrchestrator {
    aggregator: PlayerAggregator,
    store: Arc<ComparisonStore>,
    settings: PipelineSettings,
}

impl RequestOrchestrator {
    pub fn new(
        client: Arc<OpenDotaClient>,
        detail_cache: Arc<MatchDetailCache>,
        store: Arc<ComparisonStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            aggregator: PlayerAggregator::new(client, detail_cache, settings.detail_concurrency),
            store,
            settings,
        }
    }

    pub fn clamp_limit(&self, limit: u32) -> u32 {
        limit.min(self.settings.max_match_limit)
    }

    /// Compare two players, one after the other, and store the result.
    /// On timeout the in-flight requests are dropped and nothing is stored.
    pub async fn compare(&self, ids: [AccountId; 2], limit: u32) -> Result<Comparison, CompareError> {
        let limit = self.clamp_limit(limit);
        let [first, second] = ids;

        info!("Comparing players {} and {} over {} matches", first, second, limit);

        let run = async {
            let first = self.aggregator.aggregate(first, limit).await;
            let second = self.aggregator.aggregate(second, limit).await;
            [first, second]
        };

        let players = match time::timeout(self.settings.comparison_timeout, run).await {
            Ok(players) => players,
            Err(_) => {
                let secs = self.settings.comparison_timeout.as_secs();
                warn!("Comparison of {} and {} timed out after {}s", first, second, secs);
                return Err(CompareError::Timeout(secs));
            }
        };

        let comparison = self.store.insert(limit, players).await;
        info!("Stored comparison {}", comparison.id);

        Ok(comparison)
    }

    pub async fn get(&self, id: &Uuid) -> Option<Comparison> {
        self.store.get(id).await
    }
}
