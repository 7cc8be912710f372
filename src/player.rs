use std::fmt::Display;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::Mark;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub mark: Mark,
}

impl Player {
    pub fn new(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.mark)
    }
}

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    First,
    Second,
}

impl std::ops::Not for Seat {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// The two players of one game, always holding different marks and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Players {
    first: Player,
    second: Player,
}

impl Players {
    pub fn new(mut first: Player, mut second: Player) -> Self {
        if first.name.trim().is_empty() {
            first.name = "Player 1".to_string();
        }
        if second.name.trim().is_empty() {
            second.name = "Player 2".to_string();
        }

        if second.mark == first.mark {
            warn!(
                "{} and {} both picked {}, {} plays {}",
                first.name, second.name, first.mark, second.name, !first.mark
            );
            second.mark = !first.mark;
        }

        if second.name == first.name {
            let renamed = format!("{} (2)", second.name);
            warn!("duplicate player name {:?}, renaming to {:?}", second.name, renamed);
            second.name = renamed;
        }

        Self { first, second }
    }

    pub fn get(&self, seat: Seat) -> &Player {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    pub fn with_mark(&self, mark: Mark) -> &Player {
        if self.first.mark == mark {
            &self.first
        } else {
            &self.second
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        [&self.first, &self.second].into_iter()
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new(Player::new("Player 1", Mark::X), Player::new("Player 2", Mark::O))
    }
}
