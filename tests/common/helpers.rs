#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use mlbpipe::http::{Fetched, Transport};
use mlbpipe::{CoordinatorBuilder, Error, GameId, Reporter, Result};
use reqwest::{StatusCode, Url};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// Common test constants
pub const TEST_INDEX_URL: &str = "http://host/components/game/mlb/year_2021/month_04/day_10/";
pub const TEST_GID: &str = "gid_2021_04_10_aaa_bbb_1";
pub const TEST_GAME_XML: &[u8] = b"<game type=\"R\"/>";
pub const TEST_PLAYERS_XML: &[u8] = b"<game><team id=\"aaa\"/><team id=\"bbb\"/></game>";
pub const TEST_INNING_XML: &[u8] = b"<game><inning num=\"1\"/></game>";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Builds an index page body linking to every game in `gids`.
pub fn create_index_page(gids: &[&str]) -> String {
    let links: String = gids
        .iter()
        .map(|gid| format!("<li><a href=\"day_10/{gid}/\"> {gid}/</a></li>\n"))
        .collect();
    format!("<html><body><ul>\n<li><a href=\"day_10/master_scoreboard.xml\">scoreboard</a></li>\n{links}</ul></body></html>")
}

/// URL of a resource of `gid` under `index`.
pub fn resource_url(index: &str, gid: &str, suffix: &str) -> String {
    format!("{index}{gid}/{suffix}")
}

/// Parses `gid` under the test index.
pub fn create_game(gid: &str) -> GameId {
    let index = Url::parse(TEST_INDEX_URL).expect("valid index url");
    GameId::parse(gid, &index).expect("valid game id")
}

/// Asserts that a file exists with exactly `expected` as content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("File should exist at {:?}: {}", path, e));
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// A coordinator writing to `dir` through `transport`, reporting to `reporter`.
pub fn create_test_coordinator_builder(
    dir: &Path,
    transport: Arc<dyn Transport>,
    reporter: RecordingReporter,
) -> CoordinatorBuilder {
    CoordinatorBuilder::hidden()
        .directory(dir.to_path_buf())
        .transport(transport)
        .reporter(reporter)
        .timeout(Duration::from_secs(5))
}

// === Transport double ===

/// Serves canned responses from memory.
///
/// Unknown URLs fail as if the connection was refused.
#[derive(Default)]
pub struct MemoryTransport {
    routes: HashMap<String, (StatusCode, Vec<u8>)>,
    delay: Option<Duration>,
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET `url` with `status` and `body`.
    pub fn route(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.routes.insert(url.to_string(), (status, body.to_vec()));
        self
    }

    /// Serve the three resources of `gid` under `index` with 200.
    pub fn game(self, index: &str, gid: &str) -> Self {
        self.route(&resource_url(index, gid, "game.xml"), 200, TEST_GAME_XML)
            .route(&resource_url(index, gid, "players.xml"), 200, TEST_PLAYERS_XML)
            .route(
                &resource_url(index, gid, "inning/inning_all.xml"),
                200,
                TEST_INNING_XML,
            )
    }

    /// Hold every response for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of GET requests received.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Highest number of requests observed in progress at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &Url) -> Result<Fetched> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.routes.get(url.as_str()) {
            Some((status, body)) => {
                let chunk: Result<Bytes> = Ok(Bytes::from(body.clone()));
                Ok(Fetched {
                    status: *status,
                    body: stream::iter(vec![chunk]).boxed(),
                })
            }
            None => Err(Error::Internal(format!("connection refused: {}", url))),
        }
    }
}

// === Reporter double ===

/// A success reported to a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub status: u16,
    pub size: u64,
    pub path: PathBuf,
}

/// A failure reported to a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failed {
    pub status: Option<u16>,
    pub reason: String,
    pub url: String,
}

/// Records everything it is told. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    successes: Arc<Mutex<Vec<Saved>>>,
    failures: Arc<Mutex<Vec<Failed>>>,
}

impl RecordingReporter {
    pub fn successes(&self) -> Vec<Saved> {
        self.successes.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<Failed> {
        self.failures.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn success(&self, status: StatusCode, size: u64, path: &Path) {
        self.successes.lock().unwrap().push(Saved {
            status: status.as_u16(),
            size,
            path: path.to_path_buf(),
        });
    }

    fn failure(&self, status: Option<StatusCode>, reason: &str, url: &Url) {
        self.failures.lock().unwrap().push(Failed {
            status: status.map(|s| s.as_u16()),
            reason: reason.to_string(),
            url: url.to_string(),
        });
    }
}
