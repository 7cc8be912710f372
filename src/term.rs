use std::io::{BufRead, Write};

use anyhow::Context;
use log::warn;

use crate::{
    board::{Board, InvalidMove, Mark},
    game::{MoveSource, Renderer},
    player::{Player, Players},
    rules::GameState,
    source::parse_move,
};

/// Line-based console frontend: prompts on `output`, reads answers from `input`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    buf: Vec<u8>,
    line: String,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: Vec::with_capacity(64),
            line: String::with_capacity(64),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `Ok(None)` on end of input.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<&str>> {
        write!(self.output, "{text}")?;
        self.output.flush().context("flushing prompt")?;

        // bytes that aren't UTF-8 become U+FFFD and fail parsing like any typo
        self.buf.clear();
        if 0 == self.input.read_until(b'\n', &mut self.buf).context("reading input")? {
            return Ok(None);
        }
        self.line = String::from_utf8_lossy(&self.buf).into_owned();
        Ok(Some(self.line.trim()))
    }

    /// Asks for the name and symbol of player `number` until the symbol is X
    /// or O.
    pub fn prompt_player(&mut self, number: usize) -> anyhow::Result<Option<Player>> {
        writeln!(self.output, "=========Player {number}=========")?;
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(None);
        };
        let name = name.to_string();

        let mark = loop {
            let Some(symbol) = self.prompt("Enter symbol: ")? else {
                return Ok(None);
            };
            match symbol.parse::<Mark>() {
                Ok(mark) => break mark,
                Err(_) => writeln!(self.output, "Symbol must be X or O")?,
            }
        };

        Ok(Some(Player::new(name, mark)))
    }

    /// Sets up both players, giving up as soon as input runs out.
    pub fn prompt_players(&mut self) -> anyhow::Result<Option<Players>> {
        let Some(first) = self.prompt_player(1)? else {
            return Ok(None);
        };
        let Some(second) = self.prompt_player(2)? else {
            return Ok(None);
        };
        Ok(Some(Players::new(first, second)))
    }

    pub fn say(&mut self, text: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> MoveSource for Terminal<R, W> {
    fn next_move(
        &mut self,
        player: &Player,
        _board: &Board,
    ) -> anyhow::Result<Option<(usize, usize)>> {
        let text = format!("\n[{} ({})] Enter move: ", player.name, player.mark);
        loop {
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            let compact: String = line.split_whitespace().collect();
            match parse_move(&compact) {
                Ok(coords) => return Ok(Some(coords)),
                Err(_) => writeln!(self.output, "\nInvalid Input - must be digits!")?,
            }
        }
    }

    fn rejected(&mut self, _player: &Player, reason: &InvalidMove) {
        let msg = match reason {
            InvalidMove::OutOfBounds { .. } => "Row or Column values are > 3",
            InvalidMove::Occupied { .. } => "Move not available, pick another slot",
            InvalidMove::UnknownMark(_) => "Symbol must be X or O",
        };
        if let Err(e) = writeln!(self.output, "\n{msg}") {
            warn!("failed to write to terminal: {e}");
        }
    }
}

/// Draws the board after every move.
pub struct Screen<W> {
    output: W,
}

impl<W: Write> Screen<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> Renderer for Screen<W> {
    fn render(&mut self, board: &Board) {
        if let Err(e) = write!(self.output, "\n{board}").and_then(|_| self.output.flush()) {
            warn!("failed to draw board: {e}");
        }
    }

    // the last move is already on screen, the host prints the result
    fn game_over(&mut self, _board: &Board, _state: GameState) {}
}
