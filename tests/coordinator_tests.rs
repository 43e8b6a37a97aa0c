//! Tests for the coordinator module functionality.
//!
//! This file covers the builder, the dispatch/drain protocol and the
//! classification of results into the success and failure sinks.

use futures::stream;
use mlbpipe::coordinator::{CoordinatorBuilder, DEFAULT_MAX_IN_FLIGHT, DEFAULT_TIMEOUT};
use mlbpipe::report::REJECTED_REASON;
use mlbpipe::RunSummary;
use reqwest::header::{HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let coordinator = CoordinatorBuilder::new().build().unwrap();

    assert_eq!(coordinator.max_in_flight(), Some(DEFAULT_MAX_IN_FLIGHT));
    assert_eq!(coordinator.timeout(), Some(DEFAULT_TIMEOUT));
    assert!(coordinator.headers().is_none());
    assert!(!coordinator.cancel_token().is_cancelled());
}

#[test]
fn test_builder_configuration() {
    let temp_dir = create_temp_dir();
    let coordinator = CoordinatorBuilder::hidden()
        .directory(temp_dir.path().to_path_buf())
        .max_in_flight(4)
        .timeout(Duration::from_secs(3))
        .header(USER_AGENT, HeaderValue::from_static("test-agent"))
        .build()
        .unwrap();

    assert_eq!(coordinator.directory(), temp_dir.path());
    assert_eq!(coordinator.max_in_flight(), Some(4));
    assert_eq!(coordinator.timeout(), Some(Duration::from_secs(3)));
    assert_eq!(
        coordinator.headers().unwrap().get(USER_AGENT),
        Some(&HeaderValue::from_static("test-agent"))
    );
}

#[test]
fn test_builder_proxy() {
    let coordinator = CoordinatorBuilder::new()
        .proxy(reqwest::Proxy::http("http://127.0.0.1:3128").unwrap())
        .build()
        .unwrap();

    assert!(coordinator.proxy().is_some());
    assert!(CoordinatorBuilder::new().build().unwrap().proxy().is_none());
}

#[test]
fn test_builder_unbounded_without_timeout() {
    let coordinator = CoordinatorBuilder::new()
        .max_in_flight(4)
        .unbounded()
        .no_timeout()
        .build()
        .unwrap();

    assert_eq!(coordinator.max_in_flight(), None);
    assert_eq!(coordinator.timeout(), None);
}

#[test]
fn test_coordinator_debug() {
    let coordinator = CoordinatorBuilder::new().build().unwrap();
    let debug_str = format!("{:?}", coordinator);

    assert!(debug_str.contains("Coordinator"));
    assert!(debug_str.contains("max_in_flight"));
}

#[tokio::test]
async fn test_run_saves_every_resource() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let transport = Arc::new(MemoryTransport::new().game(TEST_INDEX_URL, TEST_GID));
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport.clone(), reporter.clone())
            .build()
            .unwrap();

    let summary = coordinator
        .run(stream::iter(vec![create_game(TEST_GID)]))
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            games: 1,
            dispatched: 3,
            saved: 3,
            failed: 0
        }
    );
    let game_dir = temp_dir.path().join(TEST_GID);
    assert_file_content(&game_dir.join("game.xml"), TEST_GAME_XML);
    assert_file_content(&game_dir.join("players.xml"), TEST_PLAYERS_XML);
    assert_file_content(&game_dir.join("inning_all.xml"), TEST_INNING_XML);

    let mut sizes: Vec<u64> = reporter.successes().iter().map(|s| s.size).collect();
    sizes.sort_unstable();
    let mut expected = vec![
        TEST_GAME_XML.len() as u64,
        TEST_PLAYERS_XML.len() as u64,
        TEST_INNING_XML.len() as u64,
    ];
    expected.sort_unstable();
    assert_eq!(sizes, expected);
    assert!(reporter.successes().iter().all(|s| s.status == 200));
    assert!(reporter.failures().is_empty());
    assert_eq!(transport.requests(), 3);
}

#[tokio::test]
async fn test_run_reports_missing_resource_and_keeps_going() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let players = resource_url(TEST_INDEX_URL, TEST_GID, "players.xml");
    let transport = Arc::new(
        MemoryTransport::new()
            .game(TEST_INDEX_URL, TEST_GID)
            .route(&players, 404, b"not found"),
    );
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport, reporter.clone())
            .build()
            .unwrap();

    let summary = coordinator
        .run(stream::iter(vec![create_game(TEST_GID)]))
        .await
        .unwrap();

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.failed, 1);
    let game_dir = temp_dir.path().join(TEST_GID);
    assert!(game_dir.join("game.xml").exists());
    assert!(game_dir.join("inning_all.xml").exists());
    assert!(!game_dir.join("players.xml").exists());

    assert_eq!(reporter.successes().len(), 2);
    assert_eq!(
        reporter.failures(),
        vec![Failed {
            status: Some(404),
            reason: REJECTED_REASON.to_string(),
            url: players,
        }]
    );
}

#[tokio::test]
async fn test_run_transport_failure_is_not_fatal() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    // Nothing is routed for the second game: every fetch fails to connect.
    let transport = Arc::new(MemoryTransport::new().game(TEST_INDEX_URL, TEST_GID));
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport, reporter.clone())
            .build()
            .unwrap();

    let games = vec![
        create_game(TEST_GID),
        create_game("gid_2021_04_10_ccc_ddd_1"),
    ];
    let summary = coordinator.run(stream::iter(games)).await.unwrap();

    assert_eq!(summary.dispatched, 6);
    assert_eq!(summary.saved, 3);
    assert_eq!(summary.failed, 3);
    let failures = reporter.failures();
    assert_eq!(failures.len(), 3);
    assert!(failures.iter().all(|f| f.status.is_none()));
    assert!(failures.iter().all(|f| f.reason.contains("connection refused")));
}

#[tokio::test]
async fn test_run_dispatches_three_fetches_per_game() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let gids: Vec<String> = (1..=7)
        .map(|n| format!("gid_2021_04_10_aaa_bbb_{n}"))
        .collect();
    let transport = Arc::new(
        gids.iter()
            .fold(MemoryTransport::new(), |t, gid| t.game(TEST_INDEX_URL, gid))
            .with_delay(Duration::from_millis(5)),
    );
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport.clone(), reporter.clone())
            .build()
            .unwrap();

    let games: Vec<_> = gids.iter().map(|gid| create_game(gid)).collect();
    let summary = coordinator.run(stream::iter(games)).await.unwrap();

    assert_eq!(summary.games, 7);
    assert_eq!(summary.dispatched, 21);
    assert_eq!(summary.saved + summary.failed, 21);
    assert_eq!(reporter.successes().len(), 21);
    assert_eq!(transport.requests(), 21);
}

#[tokio::test]
async fn test_run_with_no_games() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let coordinator = create_test_coordinator_builder(
        temp_dir.path(),
        Arc::new(MemoryTransport::new()),
        reporter.clone(),
    )
    .build()
    .unwrap();

    let summary = coordinator.run(stream::empty()).await.unwrap();

    assert_eq!(summary, RunSummary::default());
    assert!(reporter.successes().is_empty());
    assert!(reporter.failures().is_empty());
}

#[tokio::test]
async fn test_run_respects_max_in_flight() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let transport = Arc::new(
        MemoryTransport::new()
            .game(TEST_INDEX_URL, TEST_GID)
            .game(TEST_INDEX_URL, "gid_2021_04_10_aaa_bbb_2")
            .with_delay(Duration::from_millis(10)),
    );
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport.clone(), reporter.clone())
            .max_in_flight(2)
            .build()
            .unwrap();

    let games = vec![
        create_game(TEST_GID),
        create_game("gid_2021_04_10_aaa_bbb_2"),
    ];
    let summary = coordinator.run(stream::iter(games)).await.unwrap();

    assert_eq!(summary.saved, 6);
    assert!(transport.max_in_flight() <= 2);
}

#[tokio::test]
async fn test_run_times_out_slow_fetches() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let transport = Arc::new(
        MemoryTransport::new()
            .game(TEST_INDEX_URL, TEST_GID)
            .with_delay(Duration::from_secs(5)),
    );
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport, reporter.clone())
            .timeout(Duration::from_millis(20))
            .build()
            .unwrap();

    let summary = coordinator
        .run(stream::iter(vec![create_game(TEST_GID)]))
        .await
        .unwrap();

    assert_eq!(summary.failed, 3);
    assert!(reporter
        .failures()
        .iter()
        .all(|f| f.reason.starts_with("timed out")));
}

#[tokio::test]
async fn test_run_cancelled_still_drains_every_result() {
    let temp_dir = create_temp_dir();
    let reporter = RecordingReporter::default();
    let cancel = CancellationToken::new();
    let transport = Arc::new(
        MemoryTransport::new()
            .game(TEST_INDEX_URL, TEST_GID)
            .with_delay(Duration::from_secs(5)),
    );
    let coordinator =
        create_test_coordinator_builder(temp_dir.path(), transport, reporter.clone())
            .no_timeout()
            .max_in_flight(1)
            .cancel_token(cancel.clone())
            .build()
            .unwrap();

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
    });
    let summary = coordinator
        .run(stream::iter(vec![create_game(TEST_GID)]))
        .await
        .unwrap();
    canceller.await.unwrap();

    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.failed, 3);
    assert!(reporter.failures().iter().all(|f| f.reason == "cancelled"));
}
