use std::{
    fmt::Display,
    ops::{Index, Not},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SIDE: usize = 3;
pub const NUM_TILES: usize = SIDE * SIDE;

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    X,
    O,
}

impl Not for Mark {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::O => write!(f, "O"),
            Mark::X => write!(f, "X"),
        }
    }
}

impl TryFrom<char> for Mark {
    type Error = InvalidMove;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'x' | 'X' => Ok(Mark::X),
            'o' | 'O' => Ok(Mark::O),
            other => Err(InvalidMove::UnknownMark(other)),
        }
    }
}

impl FromStr for Mark {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Mark::try_from(c),
            (Some(c), Some(_)) => Err(InvalidMove::UnknownMark(c)),
            (None, _) => Err(InvalidMove::UnknownMark(' ')),
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, " "),
            Cell::Marked(mark) => write!(f, "{mark}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidMove {
    #[error("row {row} / column {col} is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("row {row} / column {col} is already taken")]
    Occupied { row: usize, col: usize },
    #[error("'{0}' is not a mark, expected X or O")]
    UnknownMark(char),
}

// row:
// 0: 0 1 2
// 1: 3 4 5
// 2: 6 7 8
//    0 1 2 : col
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct TileId(u8);
impl TileId {
    pub const ALL: [TileId; NUM_TILES] = [
        TileId(0),
        TileId(1),
        TileId(2),
        TileId(3),
        TileId(4),
        TileId(5),
        TileId(6),
        TileId(7),
        TileId(8),
    ];

    /// Row and column are checked separately, so `(0, 5)` is rejected rather
    /// than wrapping around to `(1, 2)`.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row >= SIDE || col >= SIDE {
            None
        } else {
            Some(Self((row * SIDE + col) as u8))
        }
    }

    /// Converts the 1-based coordinates people type into a tile.
    pub fn from_one_based(row: usize, col: usize) -> Result<Self, InvalidMove> {
        row.checked_sub(1)
            .zip(col.checked_sub(1))
            .and_then(|(r, c)| Self::new(r, c))
            .ok_or(InvalidMove::OutOfBounds { row, col })
    }

    pub const fn row(self) -> usize {
        self.0 as usize / SIDE
    }

    pub const fn col(self) -> usize {
        self.0 as usize % SIDE
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row() + 1, self.col() + 1)
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; NUM_TILES],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `mark` at the 0-based `(row, col)`.
    ///
    /// Fails without touching the board when either coordinate is off the
    /// grid or the cell is already marked.
    pub fn apply(&mut self, row: usize, col: usize, mark: Mark) -> Result<TileId, InvalidMove> {
        let tile = TileId::new(row, col).ok_or(InvalidMove::OutOfBounds { row, col })?;
        self.place(tile, mark)?;
        Ok(tile)
    }

    pub fn place(&mut self, tile: TileId, mark: Mark) -> Result<(), InvalidMove> {
        let cell = &mut self.cells[tile.index()];
        if !cell.is_empty() {
            return Err(InvalidMove::Occupied {
                row: tile.row(),
                col: tile.col(),
            });
        }
        *cell = Cell::Marked(mark);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..3`.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        match TileId::new(row, col) {
            Some(tile) => self[tile],
            None => panic!("cell ({row}, {col}) is outside the 3x3 board"),
        }
    }

    pub fn cells(&self) -> &[Cell; NUM_TILES] {
        &self.cells
    }

    pub fn mark_count(&self) -> u8 {
        self.cells.iter().filter_map(|cell| cell.mark()).count() as u8
    }

    pub fn is_full(&self) -> bool {
        self.empty_tiles().next().is_none()
    }

    pub fn empty_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        TileId::ALL
            .into_iter()
            .filter(|tile| self[*tile].is_empty())
    }
}

impl Index<TileId> for Board {
    type Output = Cell;

    fn index(&self, tile: TileId) -> &Self::Output {
        &self.cells[tile.index()]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+---+---+---+")?;
        for row in self.cells.chunks_exact(SIDE) {
            for cell in row {
                write!(f, "| {cell} ")?;
            }
            writeln!(f, "|")?;
            writeln!(f, "+---+---+---+")?;
        }
        Ok(())
    }
}
