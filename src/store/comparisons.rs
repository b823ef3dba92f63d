use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Comparison, PlayerRecord};

/// In-memory store of finished comparisons, one entry per submission
pub struct ComparisonStore {
    entries: RwLock<HashMap<Uuid, Comparison>>,
    capacity: usize,
    ttl: Duration,
}

impl ComparisonStore {
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl: Duration::seconds(ttl_secs.min(u64::from(u32::MAX)) as i64),
        }
    }

    /// Store a new comparison under a fresh id
    pub async fn insert(&self, limit: u32, players: [PlayerRecord; 2]) -> Comparison {
        let comparison = Comparison {
            id: Uuid::new_v4(),
            limit,
            players,
            created_at: Utc::now(),
        };

        self.put(comparison.clone()).await;
        comparison
    }

    /// Store a prepared comparison, evicting expired and excess entries
    pub async fn put(&self, comparison: Comparison) {
        let mut entries = self.entries.write().await;

        evict(&mut entries, Utc::now(), self.ttl, self.capacity - 1);
        entries.insert(comparison.id, comparison);
    }

    pub async fn get(&self, id: &Uuid) -> Option<Comparison> {
        let entries = self.entries.read().await;
        entries
            .get(id)
            .filter(|c| Utc::now() - c.created_at <= self.ttl)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Drop entries older than `ttl`, then the oldest until at most `keep` remain
fn evict(entries: &mut HashMap<Uuid, Comparison>, now: DateTime<Utc>, ttl: Duration, keep: usize) {
    let before = entries.len();
    entries.retain(|_, c| now - c.created_at <= ttl);

    if entries.len() > keep {
        let mut by_age: Vec<(DateTime<Utc>, Uuid)> =
            entries.values().map(|c| (c.created_at, c.id)).collect();
        by_age.sort();

        let excess = entries.len() - keep;
        for (_, id) in by_age.into_iter().take(excess) {
            entries.remove(&id);
        }
    }

    let removed = before - entries.len();
    if removed > 0 {
        debug!("Evicted {} stored comparisons", removed);
    }
}
