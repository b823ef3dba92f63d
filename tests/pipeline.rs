mod common;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use httpmock::prelude::*;
use serde_json::json;

use dota_compare::api::{ClientSettings, OpenDotaClient};
use dota_compare::error::{CompareError, FetchError};
use dota_compare::models::{AccountId, PlayerStatus, WinStatus, PRIVATE_PROFILE_NAME, UNKNOWN_HERO_NAME};
use dota_compare::pipeline::{PipelineSettings, PlayerAggregator, RequestOrchestrator};
use dota_compare::store::{ComparisonStore, MatchDetailCache};

use common::*;

fn id(n: i64) -> AccountId {
    AccountId::new(n).unwrap()
}

#[tokio::test]
async fn two_match_history_is_enriched_and_summarised() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        2,
        json!([
            {"match_id": 1001, "radiant_win": true, "player_slot": 0, "hero_id": 1,
             "start_time": 1700000000, "kills": 10, "deaths": 2, "assists": 5},
            {"match_id": 1002, "radiant_win": false, "player_slot": 130, "hero_id": 999,
             "start_time": 1699990000, "kills": 4, "deaths": 0, "assists": 8}
        ]),
    )
    .await;
    mock_heroes(&server).await;
    mock_detail(
        &server,
        1001,
        json!([
            {"account_id": 7, "gold_per_min": 400, "xp_per_min": 450, "net_worth": 14000},
            {"account_id": 42, "gold_per_min": 610, "xp_per_min": 720, "net_worth": 23500}
        ]),
    )
    .await;
    mock_detail(
        &server,
        1002,
        json!([{"account_id": null, "gold_per_min": 300, "xp_per_min": 350, "net_worth": 9000}]),
    )
    .await;

    let record = aggregator(&server, 2).aggregate(id(42), 2).await;

    assert_eq!(record.status, PlayerStatus::Ready);
    assert_eq!(record.player_name, "Subject");
    assert_eq!(
        record.avatar_url.as_deref(),
        Some("https://avatars.example/Subject.jpg")
    );
    assert_eq!(record.matches.len(), 2);

    let a = &record.matches[0];
    assert_eq!(a.match_id, Some(1001));
    assert_eq!(a.win_status, WinStatus::Won);
    assert_eq!(a.hero_name, "Anti-Mage");
    assert_eq!(a.hero_icon.as_deref(), Some("/icons/antimage.png"));
    assert_eq!(a.score, "10-2-5");
    assert_eq!(a.gold_per_min, Some(610));
    assert_eq!(a.xp_per_min, Some(720));
    assert_eq!(a.net_worth, Some(23500));

    let b = &record.matches[1];
    assert_eq!(b.match_id, Some(1002));
    assert_eq!(b.win_status, WinStatus::Won);
    assert_eq!(b.hero_name, UNKNOWN_HERO_NAME);
    assert_eq!(b.hero_icon, None);
    assert_eq!(b.score, "4-0-8");
    assert_eq!(b.gold_per_min, None);
    assert_eq!(b.xp_per_min, None);
    assert_eq!(b.net_worth, None);

    let summary = record.summary().unwrap();
    assert_eq!(summary.matches, 2);
    assert_eq!(summary.average_kills, 7.0);
    assert_eq!(summary.average_deaths, 1.0);
    assert_eq!(summary.average_assists, 6.5);
    // (15 / 2 + 12) / 2
    assert_eq!(summary.average_kda, 9.75);
    assert_eq!(summary.win_rate, 100.0);
    assert_eq!(summary.average_gold_per_min, Some(610.0));
}

#[tokio::test]
async fn private_profile_skips_match_history() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, json!({"profile": null})).await;
    let matches = mock_matches(
        &server,
        42,
        5,
        json!([{"match_id": 1, "radiant_win": true, "player_slot": 0}]),
    )
    .await;
    let heroes = mock_heroes(&server).await;

    let record = aggregator(&server, 2).aggregate(id(42), 5).await;

    assert_eq!(record.status, PlayerStatus::PrivateProfile);
    assert_eq!(record.player_name, PRIVATE_PROFILE_NAME);
    assert_eq!(record.avatar_url, None);
    assert!(record.matches.is_empty());
    matches.assert_hits_async(0).await;
    heroes.assert_hits_async(0).await;
}

#[tokio::test]
async fn failed_profile_fetch_is_reported_separately() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/players/42");
            then.status(500).body("internal error");
        })
        .await;

    let record = aggregator(&server, 2).aggregate(id(42), 5).await;

    assert_eq!(record.player_name, PRIVATE_PROFILE_NAME);
    assert!(record.matches.is_empty());
    assert_eq!(
        record.status,
        PlayerStatus::ProfileUnavailable(FetchError::Status(500))
    );
}

#[tokio::test]
async fn slow_profile_fetch_times_out() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/players/42");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(public_profile("Late"));
        })
        .await;

    let client = Arc::new(
        OpenDotaClient::new(&server.base_url(), settings(Duration::from_millis(200))).unwrap(),
    );
    let aggregator = PlayerAggregator::new(client, Arc::new(MatchDetailCache::new(8)), 2);

    let record = aggregator.aggregate(id(42), 5).await;

    assert_eq!(
        record.status,
        PlayerStatus::ProfileUnavailable(FetchError::Timeout)
    );
}

#[tokio::test]
async fn zero_limit_fetches_no_matches() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    let matches = mock_matches(&server, 42, 0, json!([])).await;

    let record = aggregator(&server, 2).aggregate(id(42), 0).await;

    assert_eq!(record.status, PlayerStatus::Ready);
    assert_eq!(record.player_name, "Subject");
    assert!(record.matches.is_empty());
    assert!(record.summary().is_none());
    matches.assert_hits_async(0).await;
}

#[tokio::test]
async fn match_without_id_has_no_detail_fetch() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        1,
        json!([{"radiant_win": true, "player_slot": 1, "hero_id": 2, "kills": 1, "deaths": 1, "assists": 1}]),
    )
    .await;
    mock_heroes(&server).await;
    let details = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/matches/");
            then.status(200).json_body(json!({"players": []}));
        })
        .await;

    let record = aggregator(&server, 2).aggregate(id(42), 1).await;

    assert_eq!(record.matches.len(), 1);
    assert_eq!(record.matches[0].hero_name, "Axe");
    assert_eq!(record.matches[0].gold_per_min, None);
    assert_eq!(record.matches[0].xp_per_min, None);
    assert_eq!(record.matches[0].net_worth, None);
    details.assert_hits_async(0).await;
}

#[tokio::test]
async fn hero_catalog_failure_uses_placeholders() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        1,
        json!([{"match_id": 5, "radiant_win": false, "player_slot": 0, "hero_id": 1}]),
    )
    .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/heroes");
            then.status(503);
        })
        .await;
    mock_detail(&server, 5, json!([])).await;

    let record = aggregator(&server, 2).aggregate(id(42), 1).await;

    assert_eq!(record.status, PlayerStatus::Ready);
    assert_eq!(record.hero_catalog_error, Some(FetchError::Status(503)));
    assert_eq!(record.matches[0].hero_name, UNKNOWN_HERO_NAME);
    assert_eq!(record.matches[0].hero_icon, None);
    assert_eq!(record.matches[0].win_status, WinStatus::Lost);
}

#[tokio::test]
async fn matches_missing_win_fields_are_rejected() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        3,
        json!([
            {"match_id": 11, "radiant_win": null, "player_slot": 0},
            {"match_id": 12, "player_slot": 0, "radiant_win": true},
            {"match_id": 13, "radiant_win": true}
        ]),
    )
    .await;
    mock_heroes(&server).await;
    mock_detail(&server, 12, json!([])).await;
    let rejected_detail = mock_detail(&server, 11, json!([])).await;

    let record = aggregator(&server, 2).aggregate(id(42), 3).await;

    assert_eq!(record.matches.len(), 1);
    assert_eq!(record.matches[0].match_id, Some(12));
    assert_eq!(record.rejected_matches, 2);
    rejected_detail.assert_hits_async(0).await;
}

#[tokio::test]
async fn match_list_failure_is_reported() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/players/42/matches");
            then.status(429);
        })
        .await;

    let record = aggregator(&server, 2).aggregate(id(42), 4).await;

    assert_eq!(record.player_name, "Subject");
    assert!(record.matches.is_empty());
    assert_eq!(
        record.status,
        PlayerStatus::MatchesUnavailable(FetchError::Status(429))
    );
}

#[tokio::test]
async fn concurrent_details_keep_match_order() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        3,
        json!([
            {"match_id": 3, "radiant_win": true, "player_slot": 0},
            {"match_id": 2, "radiant_win": true, "player_slot": 0},
            {"match_id": 1, "radiant_win": true, "player_slot": 0}
        ]),
    )
    .await;
    mock_heroes(&server).await;

    // Newest match answers last
    for (match_id, delay_ms, gpm) in [(3, 400, 300), (2, 200, 200), (1, 0, 100)] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/matches/{}", match_id));
                then.status(200)
                    .delay(Duration::from_millis(delay_ms))
                    .json_body(json!({
                        "match_id": match_id,
                        "players": [{"account_id": 42, "gold_per_min": gpm}]
                    }));
            })
            .await;
    }

    let record = aggregator(&server, 3).aggregate(id(42), 3).await;

    let ids: Vec<_> = record.matches.iter().map(|m| m.match_id).collect();
    let gpm: Vec<_> = record.matches.iter().map(|m| m.gold_per_min).collect();

    assert_eq!(ids, vec![Some(3), Some(2), Some(1)]);
    assert_eq!(gpm, vec![Some(300), Some(200), Some(100)]);
}

#[tokio::test]
async fn repeated_player_reuses_cached_details() {
    let server = MockServer::start_async().await;

    let profile = mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        1,
        json!([{"match_id": 77, "radiant_win": true, "player_slot": 0}]),
    )
    .await;
    let heroes = mock_heroes(&server).await;
    let detail = mock_detail(&server, 77, json!([{"account_id": 42, "net_worth": 30000}])).await;

    let aggregator = aggregator(&server, 2);
    let first = aggregator.aggregate(id(42), 1).await;
    let second = aggregator.aggregate(id(42), 1).await;

    assert_eq!(first.matches[0].net_worth, Some(30000));
    assert_eq!(second.matches[0].net_worth, Some(30000));
    profile.assert_hits_async(2).await;
    heroes.assert_hits_async(2).await;
    detail.assert_hits_async(1).await;
}

#[tokio::test]
async fn failed_detail_keeps_match_without_economy() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("Subject")).await;
    mock_matches(
        &server,
        42,
        1,
        json!([{"match_id": 88, "radiant_win": true, "player_slot": 0, "kills": 3}]),
    )
    .await;
    mock_heroes(&server).await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/matches/88");
            then.status(500);
        })
        .await;

    let aggregator = aggregator(&server, 2);
    let first = aggregator.aggregate(id(42), 1).await;
    let second = aggregator.aggregate(id(42), 1).await;

    assert_eq!(first.status, PlayerStatus::Ready);
    assert_eq!(first.matches.len(), 1);
    assert_eq!(first.matches[0].kills, 3);
    assert_eq!(first.matches[0].gold_per_min, None);
    assert_eq!(first.matches[0].net_worth, None);
    assert_eq!(second.matches[0].net_worth, None);
    // failures are not cached
    detail.assert_hits_async(2).await;
}

#[tokio::test]
async fn comparison_is_stored_by_id() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("First")).await;
    mock_profile(&server, 43, json!({})).await;
    mock_matches(
        &server,
        42,
        1,
        json!([{"match_id": 9, "radiant_win": true, "player_slot": 129}]),
    )
    .await;
    mock_heroes(&server).await;
    mock_detail(&server, 9, json!([])).await;

    let orchestrator = orchestrator(&server, PipelineSettings::default());

    let comparison = orchestrator.compare([id(42), id(43)], 1).await.unwrap();

    assert_eq!(comparison.limit, 1);
    assert_eq!(comparison.players[0].player_name, "First");
    assert_eq!(comparison.players[0].matches[0].win_status, WinStatus::Lost);
    assert_eq!(comparison.players[1].player_name, PRIVATE_PROFILE_NAME);
    assert_eq!(comparison.players[1].status, PlayerStatus::PrivateProfile);

    let stored = orchestrator.get(&comparison.id).await.unwrap();
    assert_eq!(stored.players[0].account_id, id(42));
    assert_eq!(stored.players[1].account_id, id(43));
}

#[tokio::test]
async fn requested_limit_is_clamped() {
    let server = MockServer::start_async().await;

    mock_profile(&server, 42, public_profile("First")).await;
    mock_profile(&server, 43, public_profile("Second")).await;
    let first = mock_matches(&server, 42, 3, json!([])).await;
    let second = mock_matches(&server, 43, 3, json!([])).await;
    mock_heroes(&server).await;

    let orchestrator = orchestrator(
        &server,
        PipelineSettings {
            max_match_limit: 3,
            ..Default::default()
        },
    );

    let comparison = orchestrator.compare([id(42), id(43)], 500).await.unwrap();

    assert_eq!(comparison.limit, 3);
    first.assert_hits_async(1).await;
    second.assert_hits_async(1).await;
}

#[tokio::test]
async fn comparison_deadline_cancels_and_stores_nothing() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/players/42");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(public_profile("Slow"));
        })
        .await;

    let store = Arc::new(ComparisonStore::new(16, 3600));
    let orchestrator = RequestOrchestrator::new(
        client(&server),
        Arc::new(MatchDetailCache::new(64)),
        store.clone(),
        PipelineSettings {
            comparison_timeout: Duration::from_secs(1),
            ..Default::default()
        },
    );

    let result = orchestrator.compare([id(42), id(43)], 5).await;

    assert_eq!(result.unwrap_err(), CompareError::Timeout(1));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn rate_limiter_paces_requests() {
    let server = MockServer::start_async().await;
    let heroes = mock_heroes(&server).await;

    // One token up front, then one every 500ms
    let settings = ClientSettings {
        timeout: Duration::from_secs(5),
        requests_per_minute: NonZeroU32::new(120).unwrap(),
        burst: NonZeroU32::new(1).unwrap(),
        api_key: None,
    };
    let client = OpenDotaClient::new(&server.base_url(), settings).unwrap();

    let started = Instant::now();
    for _ in 0..3 {
        client.get_heroes().await.unwrap();
    }
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(950), "finished in {:?}", elapsed);
    heroes.assert_hits_async(3).await;
}
