pub mod comparison;
pub mod hero;
pub mod match_record;
pub mod player;

pub use comparison::Comparison;
pub use hero::{Hero, HeroLookup, UNKNOWN_HERO_NAME};
pub use match_record::{MatchRecord, PlayerEconomy, WinStatus};
pub use player::{AccountId, PlayerRecord, PlayerStatus, PlayerSummary, PRIVATE_PROFILE_NAME};
