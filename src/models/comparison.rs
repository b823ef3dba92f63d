use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::PlayerRecord;

/// Result of one two-player submission
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub id: Uuid,

    /// Match count requested for each player (after clamping)
    pub limit: u32,

    pub players: [PlayerRecord; 2],

    pub created_at: DateTime<Utc>,
}
