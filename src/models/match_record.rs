use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Player slots below this value belong to the Radiant team
pub const RADIANT_SLOT_LIMIT: i64 = 128;

const START_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Outcome of a match from the subject player's side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinStatus {
    Won,
    Lost,
}

impl WinStatus {
    /// Won iff the winning side is the side the player slot belongs to
    pub fn from_slot(radiant_win: bool, player_slot: i64) -> Self {
        if radiant_win == (player_slot < RADIANT_SLOT_LIMIT) {
            WinStatus::Won
        } else {
            WinStatus::Lost
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WinStatus::Won => "Won",
            WinStatus::Lost => "Lost",
        }
    }
}

/// Economy stats of one player in a finished match
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEconomy {
    pub account_id: Option<i64>,
    pub gold_per_min: Option<i64>,
    pub xp_per_min: Option<i64>,
    pub net_worth: Option<i64>,
}

/// One enriched match in a player's history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub match_id: Option<i64>,

    /// Local time, formatted as DD-MM-YYYY HH:MM:SS
    pub start_time: String,

    pub hero_id: i64,
    pub hero_name: String,
    pub hero_icon: Option<String>,

    pub win_status: WinStatus,

    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,

    /// "K-D-A"
    pub score: String,

    pub gold_per_min: Option<i64>,
    pub xp_per_min: Option<i64>,
    pub net_worth: Option<i64>,
}

impl MatchRecord {
    /// (K + A) / D, or K + A for a deathless game
    pub fn kda_score(&self) -> f64 {
        kda_contribution(self.kills, self.deaths, self.assists)
    }

    pub fn is_win(&self) -> bool {
        self.win_status == WinStatus::Won
    }

    pub fn apply_economy(&mut self, economy: &PlayerEconomy) {
        self.gold_per_min = economy.gold_per_min;
        self.xp_per_min = economy.xp_per_min;
        self.net_worth = economy.net_worth;
    }
}

pub fn kda_contribution(kills: i64, deaths: i64, assists: i64) -> f64 {
    let takedowns = (kills + assists) as f64;
    if deaths > 0 {
        takedowns / deaths as f64
    } else {
        takedowns
    }
}

pub fn format_score(kills: i64, deaths: i64, assists: i64) -> String {
    format!("{}-{}-{}", kills, deaths, assists)
}

/// Format epoch seconds in the process's local timezone.
/// Out-of-range timestamps are shown as the epoch.
pub fn format_start_time(epoch_secs: i64) -> String {
    let utc: DateTime<Utc> = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default();
    utc.with_timezone(&Local).format(START_TIME_FORMAT).to_string()
}
