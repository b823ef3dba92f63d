use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::OpenDotaClient;
use crate::error::FetchError;
use crate::models::HeroLookup;

/// Loads the hero list; no caching between calls
pub struct HeroCatalog {
    client: Arc<OpenDotaClient>,
}

impl HeroCatalog {
    pub fn new(client: Arc<OpenDotaClient>) -> Self {
        Self { client }
    }

    /// An unreachable catalog yields an empty lookup and the error
    pub async fn load(&self) -> (HeroLookup, Option<FetchError>) {
        match self.client.get_heroes().await {
            Ok(heroes) => {
                let lookup = HeroLookup::from_heroes(heroes);
                debug!("Loaded {} heroes", lookup.len());
                (lookup, None)
            }
            Err(e) => {
                warn!("Hero catalog unavailable, hero names will be missing");
                (HeroLookup::default(), Some(e))
            }
        }
    }
}
