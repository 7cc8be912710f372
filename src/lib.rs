pub mod board;
pub mod config;
pub mod game;
pub mod player;
pub mod report;
pub mod rules;
pub mod source;
pub mod term;

pub use board::{Board, Cell, InvalidMove, Mark, TileId};
pub use game::{play, Game, MoveSource, PlayError, Renderer, TurnResult};
pub use player::{Player, Players, Seat};
pub use report::Report;
pub use rules::GameState;
