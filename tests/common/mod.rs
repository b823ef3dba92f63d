#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use dota_compare::api::{ClientSettings, OpenDotaClient};
use dota_compare::pipeline::{PipelineSettings, PlayerAggregator, RequestOrchestrator};
use dota_compare::store::{ComparisonStore, MatchDetailCache};

pub fn settings(timeout: Duration) -> ClientSettings {
    ClientSettings {
        timeout,
        requests_per_minute: NonZeroU32::new(60_000).unwrap(),
        burst: NonZeroU32::new(1_000).unwrap(),
        api_key: None,
    }
}

pub fn client(server: &MockServer) -> Arc<OpenDotaClient> {
    Arc::new(OpenDotaClient::new(&server.base_url(), settings(Duration::from_secs(5))).unwrap())
}

pub fn aggregator(server: &MockServer, concurrency: usize) -> PlayerAggregator {
    PlayerAggregator::new(client(server), Arc::new(MatchDetailCache::new(64)), concurrency)
}

pub fn orchestrator(server: &MockServer, settings: PipelineSettings) -> RequestOrchestrator {
    RequestOrchestrator::new(
        client(server),
        Arc::new(MatchDetailCache::new(64)),
        Arc::new(ComparisonStore::new(16, 3600)),
        settings,
    )
}

pub fn public_profile(name: &str) -> Value {
    json!({
        "profile": {
            "personaname": name,
            "avatarfull": format!("https://avatars.example/{}.jpg", name),
        },
        "rank_tier": 55
    })
}

pub fn heroes() -> Value {
    json!([
        {"id": 1, "name": "npc_dota_hero_antimage", "localized_name": "Anti-Mage", "icon": "/icons/antimage.png"},
        {"id": 2, "name": "npc_dota_hero_axe", "localized_name": "Axe"}
    ])
}

pub async fn mock_profile<'a>(server: &'a MockServer, account_id: i64, body: Value) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/players/{}", account_id));
            then.status(200).json_body(body);
        })
        .await
}

pub async fn mock_matches<'a>(
    server: &'a MockServer,
    account_id: i64,
    limit: u32,
    body: Value,
) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/players/{}/matches", account_id))
                .query_param("limit", limit.to_string());
            then.status(200).json_body(body);
        })
        .await
}

pub async fn mock_heroes(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/heroes");
            then.status(200).json_body(heroes());
        })
        .await
}

pub async fn mock_detail<'a>(server: &'a MockServer, match_id: i64, players: Value) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/matches/{}", match_id));
            then.status(200)
                .json_body(json!({"match_id": match_id, "players": players}));
        })
        .await
}
