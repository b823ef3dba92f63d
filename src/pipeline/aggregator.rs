use std::sync::Arc;

use tracing::{debug, info};

use crate::api::OpenDotaClient;
use crate::models::{AccountId, PlayerRecord, PlayerStatus};
use crate::pipeline::{MatchEnricher, ProfileLookup, ProfileResolver};
use crate::store::MatchDetailCache;

/// Builds one player's record: profile first, then recent matches
pub struct PlayerAggregator {
    client: Arc<OpenDotaClient>,
    profiles: ProfileResolver,
    enricher: MatchEnricher,
}

impl PlayerAggregator {
    pub fn new(
        client: Arc<OpenDotaClient>,
        detail_cache: Arc<MatchDetailCache>,
        detail_concurrency: usize,
    ) -> Self {
        Self {
            profiles: ProfileResolver::new(Arc::clone(&client)),
            enricher: MatchEnricher::new(Arc::clone(&client), detail_cache, detail_concurrency),
            client,
        }
    }

    pub async fn aggregate(&self, account_id: AccountId, limit: u32) -> PlayerRecord {
        info!("Fetching player {} (last {} matches)", account_id, limit);

        let (name, avatar) = match self.profiles.resolve(account_id).await {
            ProfileLookup::Found { name, avatar } => (name, avatar),
            ProfileLookup::Private => {
                info!("Player {} has a private profile, skipping matches", account_id);
                return PlayerRecord::unavailable(account_id, PlayerStatus::PrivateProfile);
            }
            ProfileLookup::Unavailable(e) => {
                return PlayerRecord::unavailable(account_id, PlayerStatus::ProfileUnavailable(e));
            }
        };

        let mut record = PlayerRecord {
            account_id,
            player_name: name,
            avatar_url: avatar,
            matches: Vec::new(),
            status: PlayerStatus::Ready,
            rejected_matches: 0,
            hero_catalog_error: None,
        };

        if limit == 0 {
            debug!("Match limit is 0 for player {}, nothing to fetch", account_id);
            return record;
        }

        let mut raw_matches = match self.client.get_player_matches(account_id, limit).await {
            Ok(matches) => matches,
            Err(e) => {
                record.status = PlayerStatus::MatchesUnavailable(e);
                return record;
            }
        };
        raw_matches.truncate(limit as usize);

        let enriched = self.enricher.enrich(raw_matches, account_id).await;
        record.matches = enriched.matches;
        record.rejected_matches = enriched.rejected;
        record.hero_catalog_error = enriched.hero_catalog_error;

        log_summary(&record);

        record
    }
}

/// Log per-player averages; silent for an empty match list
pub fn log_summary(record: &PlayerRecord) {
    let Some(summary) = record.summary() else {
        return;
    };

    info!(
        "Summary | {} ({}) | {} matches | Avg K: {:.2} | Avg D: {:.2} | Avg A: {:.2} | KDA: {:.2} | Winrate: {:.1}%",
        record.player_name,
        record.account_id,
        summary.matches,
        summary.average_kills,
        summary.average_deaths,
        summary.average_assists,
        summary.average_kda,
        summary.win_rate,
    );
}
