use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{board::Board, rules::GameState};

/// Outcome of a finished game, as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub state: GameState,
    pub winner: Option<String>,
    pub moves: u32,
    pub board: Board,
}

impl Report {
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.state, &self.winner) {
            (GameState::Won(mark), Some(name)) => writeln!(f, "Result: {name} ({mark}) wins")?,
            (GameState::Won(mark), None) => writeln!(f, "Result: {mark} wins")?,
            _ => writeln!(f, "Result: Draw")?,
        }
        write!(f, "Number of moves: {}", self.moves)
    }
}
