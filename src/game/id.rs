//! Structured Gameday game identifiers.
//!
//! A game identifier is the `gid_YYYY_MM_DD_<away>_<home>_<N>` token found on
//! a daily index page. It is parsed once, when discovered, and every path or
//! URL derived for the game afterwards is built from the parsed value.
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::game::GameId;
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = Url::parse("http://gd2.mlb.com/components/game/mlb/year_2021/month_04/day_10")?;
//! let game = GameId::parse("gid_2021_04_10_nyamlb_tormlb_1", &index)?;
//! assert_eq!(game.home(), "tormlb");
//! assert_eq!(
//!     game.url().as_str(),
//!     "http://gd2.mlb.com/components/game/mlb/year_2021/month_04/day_10/gid_2021_04_10_nyamlb_tormlb_1/"
//! );
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use chrono::NaiveDate;
use reqwest::Url;
use std::fmt;

/// Leading constant of every identifier token.
pub const GID_PREFIX: &str = "gid";

/// Scheme remnant left on identifier paths built with a path join.
///
/// Joining `http://host/...` as a filesystem path collapses the double slash,
/// leaving `http:/host/...`.
const SCHEME_REMNANT: &str = "http:/";

/// A game discovered on an index page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId {
    token: String,
    year: u16,
    month: u8,
    day: u8,
    away: String,
    home: String,
    /// Game number exactly as matched, digits only.
    game_number: String,
    /// Game directory URL, always ending with a slash.
    url: Url,
}

impl GameId {
    /// Parse a bare `gid_…` token found under the index page at `base`.
    ///
    /// `base` is treated as a directory whether or not it ends with a slash.
    pub fn parse(token: &str, base: &Url) -> Result<Self> {
        let invalid = || Error::InvalidIdentifier(token.to_string());

        let parts: Vec<&str> = token.split('_').collect();
        let [prefix, year, month, day, away, home, game_number] = parts.as_slice() else {
            return Err(invalid());
        };
        if *prefix != GID_PREFIX
            || !is_digits(year, 4)
            || !is_digits(month, 2)
            || !is_digits(day, 2)
            || !is_team(away)
            || !is_team(home)
            || !is_number(game_number)
        {
            return Err(invalid());
        }

        let url = as_directory(base)
            .join(&format!("{token}/"))
            .map_err(|e| Error::InvalidUrl(format!("cannot join \"{token}\" onto \"{base}\": {e}")))?;

        Ok(Self {
            token: token.to_string(),
            year: year.parse().map_err(|_| invalid())?,
            month: month.parse().map_err(|_| invalid())?,
            day: day.parse().map_err(|_| invalid())?,
            away: away.to_string(),
            home: home.to_string(),
            game_number: game_number.to_string(),
            url,
        })
    }

    /// Parse a full identifier path such as
    /// `http:/gd2.mlb.com/components/game/mlb/year_2021/month_04/day_10/gid_2021_04_10_nyamlb_tormlb_1`.
    ///
    /// The collapsed `http:/` remnant is replaced by `http://`. Regular URLs
    /// and scheme-less `host/path` values are accepted as well.
    pub fn from_path(path: &str) -> Result<Self> {
        let location = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if let Some(rest) = path.strip_prefix(SCHEME_REMNANT) {
            format!("http://{rest}")
        } else {
            format!("http://{path}")
        };

        let trimmed = location.trim_end_matches('/');
        let (base, token) = trimmed
            .rsplit_once('/')
            .ok_or_else(|| Error::InvalidIdentifier(path.to_string()))?;
        let base = Url::parse(&format!("{base}/"))
            .map_err(|e| Error::InvalidUrl(format!("The url \"{base}\" cannot be parsed: {e}")))?;

        Self::parse(token, &base)
    }

    /// The `gid_…` token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Game directory URL on the remote host (ends with a slash).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Year encoded in the token.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month encoded in the token.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month encoded in the token.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Calendar date of the game, if the token's fields form a valid date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())
    }

    /// Away team code.
    pub fn away(&self) -> &str {
        &self.away
    }

    /// Home team code.
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Game number of the day for this pairing (doubleheaders use `2`).
    ///
    /// Kept as the digit string of the token, so any number of digits parses.
    pub fn game_number(&self) -> &str {
        &self.game_number
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Returns `url` with a trailing slash so that joins append instead of replace.
pub(crate) fn as_directory(url: &Url) -> Url {
    let mut dir = url.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    dir
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_team(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
}
