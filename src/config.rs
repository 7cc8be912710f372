use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::player::{Player, Players};

pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Settings read from a RON file. Every field may be left out.
///
/// ```ron
/// (
///     players: Some(((name: "Mark", mark: X), (name: "Nick", mark: O))),
///     seed: Some(7),
///     max_retries: 10,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub players: Option<(Player, Player)>,
    pub seed: Option<u64>,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: None,
            seed: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn players(&self) -> Option<Players> {
        self.players
            .clone()
            .map(|(first, second)| Players::new(first, second))
    }
}
