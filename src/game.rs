use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::{
    board::{Board, InvalidMove, TileId},
    player::{Player, Players, Seat},
    report::Report,
    rules::{self, GameState},
};

/// Supplies moves for whoever is on turn.
pub trait MoveSource {
    /// Next move for `player` as 1-based `(row, col)`. `Ok(None)` means the
    /// source has nothing more to give and the game cannot go on.
    fn next_move(
        &mut self,
        player: &Player,
        board: &Board,
    ) -> anyhow::Result<Option<(usize, usize)>>;

    /// Called when the last move from `player` was refused. The same player
    /// is asked again right after.
    fn rejected(&mut self, _player: &Player, _reason: &InvalidMove) {}
}

pub trait Renderer {
    fn render(&mut self, board: &Board);

    fn game_over(&mut self, board: &Board, _state: GameState) {
        self.render(board);
    }
}

impl<F: FnMut(&Board)> Renderer for F {
    fn render(&mut self, board: &Board) {
        self(board)
    }
}

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("{player} stopped supplying moves")]
    Abandoned { player: String },
    #[error("{player} made {attempts} invalid moves in a row")]
    TooManyInvalidMoves { player: String, attempts: u32 },
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct NotStarted;

#[derive(Debug)]
pub struct InProgress {
    turn: Seat,
}

#[derive(Debug)]
pub struct Terminal {
    state: GameState,
}

pub trait Phase {}
impl Phase for NotStarted {}
impl Phase for InProgress {}
impl Phase for Terminal {}

#[derive(Debug)]
pub struct Game<S: Phase = NotStarted> {
    board: Board,
    players: Players,
    moves: u32,
    state: S,
}

impl<S: Phase> Game<S> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }
}

impl Game<NotStarted> {
    pub fn new(players: Players) -> Self {
        Game {
            board: Board::new(),
            players,
            moves: 0,
            state: NotStarted,
        }
    }

    /// Flips a fair coin for who moves first.
    pub fn start<R: Rng + ?Sized>(self, rng: &mut R) -> Game<InProgress> {
        let seat = if rng.gen_bool(0.5) {
            Seat::First
        } else {
            Seat::Second
        };
        self.start_with(seat)
    }

    pub fn start_with(self, first_turn: Seat) -> Game<InProgress> {
        info!("{} is first!", self.players.get(first_turn));
        Game {
            board: self.board,
            players: self.players,
            moves: self.moves,
            state: InProgress { turn: first_turn },
        }
    }
}

pub enum TurnResult {
    Retry(Game<InProgress>, InvalidMove),
    NextTurn(Game<InProgress>),
    Concluded(Game<Terminal>),
}

impl Game<InProgress> {
    /// Places the current player's mark at the 0-based `(row, col)`.
    pub fn mark(mut self, row: usize, col: usize) -> TurnResult {
        let mover = self.current_player().mark;
        let tile = match self.board.apply(row, col, mover) {
            Ok(tile) => tile,
            Err(err) => return TurnResult::Retry(self, err),
        };
        self.moves += 1;
        debug!("move {}: {} at {}", self.moves, mover, tile);

        match rules::evaluate_after(&self.board, mover) {
            state if !state.is_terminal() => TurnResult::NextTurn(self.next_turn()),
            state => TurnResult::Concluded(Game {
                board: self.board,
                players: self.players,
                moves: self.moves,
                state: Terminal { state },
            }),
        }
    }

    pub fn whos_turn(&self) -> Seat {
        self.state.turn
    }

    pub fn current_player(&self) -> &Player {
        self.players.get(self.state.turn)
    }

    fn next_turn(mut self) -> Self {
        self.state.turn = !self.state.turn;
        self
    }
}

impl Game<Terminal> {
    pub fn state(&self) -> GameState {
        self.state.state
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.state.state {
            GameState::Won(mark) => Some(self.players.with_mark(mark)),
            _ => None,
        }
    }

    pub fn report(&self) -> Report {
        Report {
            state: self.state(),
            winner: self.winner().map(|player| player.name.clone()),
            moves: self.moves,
            board: self.board.clone(),
        }
    }
}

/// Runs turns until the game is won or drawn.
///
/// A refused move is handed back to the same player; after `max_retries`
/// refusals in a row the game is given up with
/// [`PlayError::TooManyInvalidMoves`].
pub fn play(
    mut game: Game<InProgress>,
    source: &mut impl MoveSource,
    renderer: &mut impl Renderer,
    max_retries: u32,
) -> Result<Game<Terminal>, PlayError> {
    let mut rejections = 0;

    loop {
        let player = game.current_player().clone();
        let Some((row, col)) = source.next_move(&player, game.board())? else {
            return Err(PlayError::Abandoned { player: player.name });
        };

        let result = match TileId::from_one_based(row, col) {
            Ok(tile) => game.mark(tile.row(), tile.col()),
            Err(err) => TurnResult::Retry(game, err),
        };

        game = match result {
            TurnResult::Retry(g, err) => {
                rejections += 1;
                debug!("rejected {player} at ({row}, {col}): {err}");
                source.rejected(&player, &err);
                if rejections > max_retries {
                    return Err(PlayError::TooManyInvalidMoves {
                        player: player.name,
                        attempts: rejections,
                    });
                }
                g
            }
            TurnResult::NextTurn(g) => {
                rejections = 0;
                renderer.render(g.board());
                g
            }
            TurnResult::Concluded(done) => {
                renderer.render(done.board());
                match done.winner() {
                    Some(winner) => info!("{winner} wins after {} moves", done.move_count()),
                    None => info!("draw after {} moves", done.move_count()),
                }
                renderer.game_over(done.board(), done.state());
                return Ok(done);
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Mark};
    use rand::{rngs::StdRng, SeedableRng};

    fn players() -> Players {
        Players::new(Player::new("Mark", Mark::X), Player::new("Nick", Mark::O))
    }

    fn expect_next(result: TurnResult) -> Game<InProgress> {
        match result {
            TurnResult::NextTurn(game) => game,
            TurnResult::Retry(_, err) => panic!("unexpected retry: {err}"),
            TurnResult::Concluded(_) => panic!("unexpected conclusion"),
        }
    }

    #[test]
    fn turns_alternate_and_count() {
        let game = Game::new(players()).start_with(Seat::First);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.current_player().mark, Mark::X);

        let game = expect_next(game.mark(1, 1));
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.whos_turn(), Seat::Second);
        assert_eq!(game.board().cell_at(1, 1), Cell::Marked(Mark::X));

        let game = expect_next(game.mark(0, 0));
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.whos_turn(), Seat::First);
    }

    #[test]
    fn invalid_move_keeps_turn_and_count() {
        let game = Game::new(players()).start_with(Seat::Second);
        let game = expect_next(game.mark(0, 0));
        assert_eq!(game.whos_turn(), Seat::First);

        let game = match game.mark(0, 0) {
            TurnResult::Retry(game, err) => {
                assert_eq!(err, InvalidMove::Occupied { row: 0, col: 0 });
                game
            }
            _ => panic!("occupied cell accepted"),
        };
        assert_eq!(game.whos_turn(), Seat::First);
        assert_eq!(game.move_count(), 1);

        let game = match game.mark(5, 0) {
            TurnResult::Retry(game, err) => {
                assert_eq!(err, InvalidMove::OutOfBounds { row: 5, col: 0 });
                game
            }
            _ => panic!("off-board move accepted"),
        };
        assert_eq!(game.whos_turn(), Seat::First);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn concluded_game_names_the_winner() {
        let mut game = Game::new(players()).start_with(Seat::First);
        // X: top row, O: middle row
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            game = expect_next(game.mark(row, col));
        }
        let done = match game.mark(0, 2) {
            TurnResult::Concluded(done) => done,
            _ => panic!("top row should win"),
        };
        assert_eq!(done.state(), GameState::Won(Mark::X));
        assert_eq!(done.winner().map(|p| p.name.as_str()), Some("Mark"));
        assert_eq!(done.move_count(), 5);
    }

    #[test]
    fn players_survive_every_phase() {
        let game = Game::new(players());
        assert_eq!(game.players(), &players());
        let game = game.start_with(Seat::First);
        assert_eq!(game.players(), &players());
    }

    #[test]
    fn seeded_start_is_reproducible() {
        let first = Game::new(players())
            .start(&mut StdRng::seed_from_u64(42))
            .whos_turn();
        for _ in 0..10 {
            let again = Game::new(players())
                .start(&mut StdRng::seed_from_u64(42))
                .whos_turn();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn both_seats_can_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(Game::new(players()).start(&mut rng).whos_turn());
        }
        assert_eq!(seen.len(), 2);
    }
}
