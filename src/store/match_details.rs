use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::PlayerEconomy;

/// Per-player economy rows of finished matches, keyed by match_id
pub struct MatchDetailCache {
    entries: RwLock<HashMap<i64, Vec<PlayerEconomy>>>,
    capacity: usize,
}

impl MatchDetailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub async fn get(&self, match_id: i64) -> Option<Vec<PlayerEconomy>> {
        self.entries.read().await.get(&match_id).cloned()
    }

    /// Insert rows for a match. A full cache is cleared first.
    pub async fn insert(&self, match_id: i64, players: Vec<PlayerEconomy>) {
        let mut entries = self.entries.write().await;

        if entries.len() >= self.capacity && !entries.contains_key(&match_id) {
            debug!("Match detail cache full ({} entries), clearing", entries.len());
            entries.clear();
        }

        entries.insert(match_id, players);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
