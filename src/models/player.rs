use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, InputError};
use crate::models::MatchRecord;

/// Name shown for any player whose profile could not be read
pub const PRIVATE_PROFILE_NAME: &str = "Private profile";

/// Numeric OpenDota account id (Steam32)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(id: i64) -> Result<Self, InputError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(InputError::InvalidAccountId(id.to_string()))
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| InputError::InvalidAccountId(trimmed.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened while building a player record
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Profile resolved and the match list was read
    Ready,
    /// Profile is hidden by the player
    PrivateProfile,
    /// Profile request failed
    ProfileUnavailable(FetchError),
    /// Profile resolved but the match list request failed
    MatchesUnavailable(FetchError),
}

impl PlayerStatus {
    pub fn describe(&self) -> String {
        match self {
            PlayerStatus::Ready => "ok".to_string(),
            PlayerStatus::PrivateProfile => "profile is private".to_string(),
            PlayerStatus::ProfileUnavailable(e) => format!("profile unavailable: {}", e),
            PlayerStatus::MatchesUnavailable(e) => format!("match history unavailable: {}", e),
        }
    }
}

/// One player's side of a comparison
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRecord {
    pub account_id: AccountId,
    pub player_name: String,
    pub avatar_url: Option<String>,

    /// Most recent first, in the order the API returned them
    pub matches: Vec<MatchRecord>,

    pub status: PlayerStatus,

    /// Matches dropped because they lacked the fields needed for win/loss
    pub rejected_matches: usize,

    pub hero_catalog_error: Option<FetchError>,
}

impl PlayerRecord {
    /// Record for a player whose profile could not be read
    pub fn unavailable(account_id: AccountId, status: PlayerStatus) -> Self {
        Self {
            account_id,
            player_name: PRIVATE_PROFILE_NAME.to_string(),
            avatar_url: None,
            matches: Vec::new(),
            status,
            rejected_matches: 0,
            hero_catalog_error: None,
        }
    }

    pub fn summary(&self) -> Option<PlayerSummary> {
        PlayerSummary::from_matches(&self.matches)
    }
}

/// Averages over a player's enriched matches
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerSummary {
    pub matches: usize,
    pub wins: usize,
    pub average_kills: f64,
    pub average_deaths: f64,
    pub average_assists: f64,
    pub average_kda: f64,

    /// Percentage of matches won (0-100)
    pub win_rate: f64,

    /// Averaged over the matches that carry the stat
    pub average_gold_per_min: Option<f64>,
    pub average_xp_per_min: Option<f64>,
    pub average_net_worth: Option<f64>,
}

impl PlayerSummary {
    /// Returns None for an empty match list
    pub fn from_matches(matches: &[MatchRecord]) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }

        let n = matches.len() as f64;

        let mut total_kills = 0;
        let mut total_deaths = 0;
        let mut total_assists = 0;
        let mut total_kda = 0.0;
        let mut wins = 0;

        for m in matches {
            total_kills += m.kills;
            total_deaths += m.deaths;
            total_assists += m.assists;
            total_kda += m.kda_score();

            if m.is_win() {
                wins += 1;
            }
        }

        Some(Self {
            matches: matches.len(),
            wins,
            average_kills: total_kills as f64 / n,
            average_deaths: total_deaths as f64 / n,
            average_assists: total_assists as f64 / n,
            average_kda: total_kda / n,
            win_rate: wins as f64 / n * 100.0,
            average_gold_per_min: average_of(matches.iter().map(|m| m.gold_per_min)),
            average_xp_per_min: average_of(matches.iter().map(|m| m.xp_per_min)),
            average_net_worth: average_of(matches.iter().map(|m| m.net_worth)),
        })
    }
}

fn average_of(values: impl Iterator<Item = Option<i64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0i64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}
