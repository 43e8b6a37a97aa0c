//! Discovery of the games listed on a Gameday index page.
//!
//! The index page of a day lists one link per game. [`discover`] fetches the
//! page, finds every game identifier in it, and hands them out as a stream in
//! the order they appear on the page.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlbpipe::discovery::{discover, index_url_for_date, GAMEDAY_BASE_URL};
//! use mlbpipe::http::{create_http_client, HttpClientConfig};
//! use chrono::NaiveDate;
//! use futures::StreamExt;
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let base = Url::parse(GAMEDAY_BASE_URL)?;
//! let date = NaiveDate::from_ymd_opt(2016, 4, 10).unwrap();
//! let index = index_url_for_date(&base, date)?;
//!
//! let mut games = discover(&client, &index).await?;
//! while let Some(game) = games.next().await {
//!     println!("{}", game);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::game::id::as_directory;
use crate::game::GameId;
use crate::http::Transport;

use chrono::{Datelike, NaiveDate};
use regex::bytes::Regex;
use reqwest::Url;
use std::sync::OnceLock;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

/// Root of the Gameday XML tree.
pub const GAMEDAY_BASE_URL: &str = "http://gd2.mlb.com/components/game/mlb/";

/// Pattern of a game link on a daily index page.
pub const GAME_ID_PATTERN: &str =
    r"day_[0-3][0-9]/gid_[0-9]{4}_[0-9]{2}_[0-9]{2}_[a-z]+_[a-z]+_[0-9]+";

/// Length of the leading `day_DD/` segment of a match.
const DAY_SEGMENT_LEN: usize = 7;

/// Games buffered between discovery and its consumer.
const STREAM_CAPACITY: usize = 64;

/// Stream of discovered games. Ends once the whole index page was scanned.
pub type GameStream = ReceiverStream<GameId>;

fn game_id_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(GAME_ID_PATTERN).expect("game id pattern is valid"))
}

/// Fetches `index_url` and streams the games it lists.
///
/// Failing to fetch or read the index, or a non-2xx answer, is returned as an
/// error: there is nothing to do for the run without it.
pub async fn discover(transport: &dyn Transport, index_url: &Url) -> Result<GameStream> {
    let res = transport.get(index_url).await?;
    if !res.is_success() {
        return Err(Error::IndexStatus {
            status: res.status,
            url: index_url.to_string(),
        });
    }

    let body = res.bytes().await?;
    let games = scan(&body, index_url);
    info!(games = games.len(), "Discovered games on {}", index_url);

    let (tx, rx) = mpsc::channel(STREAM_CAPACITY);
    tokio::spawn(async move {
        for game in games {
            if tx.send(game).await.is_err() {
                debug!("Game stream dropped before discovery finished");
                break;
            }
        }
    });

    Ok(ReceiverStream::new(rx))
}

/// Finds every game link in `body`, in page order, relative to `index_url`.
///
/// Matches never overlap. Duplicate links yield duplicate games.
pub fn scan(body: &[u8], index_url: &Url) -> Vec<GameId> {
    game_id_regex()
        .find_iter(body)
        .filter_map(|m| {
            let token = String::from_utf8_lossy(&m.as_bytes()[DAY_SEGMENT_LEN..]);
            match GameId::parse(&token, index_url) {
                Ok(game) => Some(game),
                Err(e) => {
                    warn!("Skipping game link {:?}: {}", token, e);
                    None
                }
            }
        })
        .collect()
}

/// Daily index page URL under the Gameday root `base`.
///
/// Follows the `year_YYYY/month_MM/day_DD/` layout.
pub fn index_url_for_date(base: &Url, date: NaiveDate) -> Result<Url> {
    let day = format!(
        "year_{:04}/month_{:02}/day_{:02}/",
        date.year(),
        date.month(),
        date.day()
    );
    as_directory(base)
        .join(&day)
        .map_err(|e| Error::InvalidUrl(format!("cannot join \"{day}\" onto \"{base}\": {e}")))
}
