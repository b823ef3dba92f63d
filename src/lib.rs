pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod web;

use std::sync::Arc;

use anyhow::Result;

use crate::api::OpenDotaClient;
use crate::config::Config;
use crate::pipeline::RequestOrchestrator;
use crate::store::{ComparisonStore, MatchDetailCache};

/// Wire the client, caches and orchestrator from configuration
pub fn build_orchestrator(config: &Config) -> Result<RequestOrchestrator> {
    let client = Arc::new(OpenDotaClient::new(
        &config.opendota_api_url,
        config.client_settings(),
    )?);
    let detail_cache = Arc::new(MatchDetailCache::new(config.detail_cache_capacity));
    let store = Arc::new(ComparisonStore::new(
        config.store_capacity,
        config.store_ttl_secs,
    ));

    Ok(RequestOrchestrator::new(
        client,
        detail_cache,
        store,
        config.pipeline_settings(),
    ))
}
