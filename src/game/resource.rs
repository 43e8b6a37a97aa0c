//! Sub-resources fetched for every game and the tasks that fetch them.

use super::id::GameId;
use crate::error::{Error, Result};

use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The fixed set of XML resources mirrored for each game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `game.xml`: venue, teams and game status.
    Game,
    /// `players.xml`: rosters and coaching staff.
    Players,
    /// `inning/inning_all.xml`: every play of the game.
    Inning,
}

impl ResourceKind {
    /// Every kind, in dispatch order.
    pub const ALL: [ResourceKind; 3] = [Self::Game, Self::Players, Self::Inning];

    /// Path of the resource relative to the game directory.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Game => "game.xml",
            Self::Players => "players.xml",
            Self::Inning => "inning/inning_all.xml",
        }
    }

    /// Whether the resource lives in a nested directory under the game.
    ///
    /// Nested resources are still stored flat in the game's local directory.
    pub fn is_multi_segment(self) -> bool {
        matches!(self, Self::Inning)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Game => "game",
            Self::Players => "players",
            Self::Inning => "inning",
        };
        f.write_str(name)
    }
}

/// One resource of one game to fetch and persist.
#[derive(Debug, Clone)]
pub struct FetchTask {
    /// Remote URL of the resource.
    pub url: Url,
    /// Which resource this is.
    pub kind: ResourceKind,
    /// Game the resource belongs to.
    pub game: Arc<GameId>,
    /// File name used to save the resource on disk.
    pub filename: String,
}

impl FetchTask {
    /// Build the task fetching `kind` for `game`.
    pub fn new(game: Arc<GameId>, kind: ResourceKind) -> Result<Self> {
        let url = game.url().join(kind.suffix()).map_err(|e| {
            Error::InvalidUrl(format!(
                "cannot join \"{}\" onto \"{}\": {}",
                kind.suffix(),
                game.url(),
                e
            ))
        })?;
        let filename = filename_of(&url)?;

        Ok(Self {
            url,
            kind,
            game,
            filename,
        })
    }

    /// Build one task per [`ResourceKind`] for `game`.
    pub fn for_game(game: Arc<GameId>) -> Result<Vec<Self>> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| Self::new(Arc::clone(&game), kind))
            .collect()
    }

    /// Local directory of the task's game under `root`.
    pub fn destination_dir(&self, root: &Path) -> PathBuf {
        root.join(self.game.token())
    }

    /// Local file the resource is written to under `root`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        self.destination_dir(root).join(&self.filename)
    }
}

/// Last path segment of `url`, percent-decoded.
fn filename_of(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            form_urlencoded::parse(segment.as_bytes())
                .map(|(key, val)| [key, val].concat())
                .collect()
        })
        .ok_or_else(|| Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", url)))
}
