use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::api::opendota::{OpenDotaClient, RawMatch};
use crate::error::{FetchError, MatchDataError};
use crate::models::match_record::{format_score, format_start_time};
use crate::models::{AccountId, HeroLookup, MatchRecord, PlayerEconomy, WinStatus};
use crate::pipeline::HeroCatalog;
use crate::store::MatchDetailCache;

/// Output of one enrichment batch
#[derive(Debug, Clone, Default)]
pub struct EnrichedMatches {
    /// Same order as the input
    pub matches: Vec<MatchRecord>,

    /// Inputs dropped for lacking win/loss fields
    pub rejected: usize,

    pub hero_catalog_error: Option<FetchError>,
}

/// Turns raw match summaries into match records with hero and economy data
pub struct MatchEnricher {
    client: Arc<OpenDotaClient>,
    heroes: HeroCatalog,
    detail_cache: Arc<MatchDetailCache>,
    concurrency: usize,
}

impl MatchEnricher {
    pub fn new(
        client: Arc<OpenDotaClient>,
        detail_cache: Arc<MatchDetailCache>,
        concurrency: usize,
    ) -> Self {
        Self {
            heroes: HeroCatalog::new(Arc::clone(&client)),
            client,
            detail_cache,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn enrich(&self, raw_matches: Vec<RawMatch>, account_id: AccountId) -> EnrichedMatches {
        let (heroes, hero_catalog_error) = self.heroes.load().await;

        let mut matches = Vec::with_capacity(raw_matches.len());
        let mut rejected = 0;

        for raw in &raw_matches {
            match build_record(raw, &heroes) {
                Ok(record) => matches.push(record),
                Err(e) => {
                    warn!("Skipping match for player {}: {}", account_id, e);
                    rejected += 1;
                }
            }
        }

        let match_ids: Vec<Option<i64>> = matches.iter().map(|m| m.match_id).collect();

        // buffered() yields in input order regardless of completion order
        let economies: Vec<Option<PlayerEconomy>> = stream::iter(match_ids)
            .map(|match_id| self.economy_for(match_id, account_id))
            .buffered(self.concurrency)
            .collect()
            .await;

        for (record, economy) in matches.iter_mut().zip(economies) {
            if let Some(economy) = economy {
                record.apply_economy(&economy);
            }
        }

        debug!(
            "Enriched {} matches for player {} ({} rejected)",
            matches.len(),
            account_id,
            rejected
        );

        EnrichedMatches {
            matches,
            rejected,
            hero_catalog_error,
        }
    }

    /// Economy row of the subject player, from cache or match detail
    async fn economy_for(&self, match_id: Option<i64>, account_id: AccountId) -> Option<PlayerEconomy> {
        let match_id = match_id.filter(|id| *id != 0)?;

        if let Some(players) = self.detail_cache.get(match_id).await {
            debug!("Match {} detail served from cache", match_id);
            return find_player(&players, account_id);
        }

        let details = match self.client.get_match(match_id).await {
            Ok(details) => details,
            Err(e) => {
                debug!("Match {} has no economy stats for {}: {}", match_id, account_id, e);
                return None;
            }
        };
        let found = find_player(&details.players, account_id);
        self.detail_cache.insert(match_id, details.players).await;

        found
    }
}

/// Build the record for one raw match, without economy stats
pub fn build_record(raw: &RawMatch, heroes: &HeroLookup) -> Result<MatchRecord, MatchDataError> {
    let radiant_win = raw.radiant_win.ok_or(MatchDataError::MissingField {
        match_id: raw.match_id,
        field: "radiant_win",
    })?;

    let player_slot = raw.player_slot.ok_or(MatchDataError::MissingField {
        match_id: raw.match_id,
        field: "player_slot",
    })?;

    let hero_id = raw.hero_id.unwrap_or(0);
    let kills = raw.kills.unwrap_or(0);
    let deaths = raw.deaths.unwrap_or(0);
    let assists = raw.assists.unwrap_or(0);

    Ok(MatchRecord {
        match_id: raw.match_id,
        start_time: format_start_time(raw.start_time.unwrap_or(0)),
        hero_id,
        hero_name: heroes.name(hero_id).to_string(),
        hero_icon: heroes.icon(hero_id).map(str::to_string),
        win_status: WinStatus::from_slot(radiant_win, player_slot),
        kills,
        deaths,
        assists,
        score: format_score(kills, deaths, assists),
        gold_per_min: None,
        xp_per_min: None,
        net_worth: None,
    })
}

pub fn find_player(players: &[PlayerEconomy], account_id: AccountId) -> Option<PlayerEconomy> {
    players
        .iter()
        .find(|p| p.account_id == Some(account_id.get()))
        .copied()
}
