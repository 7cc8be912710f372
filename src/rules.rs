use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Mark, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won(Mark),
    Drawn,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

const fn tile(row: usize, col: usize) -> TileId {
    match TileId::new(row, col) {
        Some(tile) => tile,
        None => panic!("line tile off the board"),
    }
}

/// The eight winning lines: rows, then columns, then both diagonals.
pub const LINES: [[TileId; 3]; 8] = [
    [tile(0, 0), tile(0, 1), tile(0, 2)],
    [tile(1, 0), tile(1, 1), tile(1, 2)],
    [tile(2, 0), tile(2, 1), tile(2, 2)],
    [tile(0, 0), tile(1, 0), tile(2, 0)],
    [tile(0, 1), tile(1, 1), tile(2, 1)],
    [tile(0, 2), tile(1, 2), tile(2, 2)],
    [tile(0, 0), tile(1, 1), tile(2, 2)],
    [tile(0, 2), tile(1, 1), tile(2, 0)],
];

/// The mark holding all three cells of `line`, if any.
pub fn line_winner(board: &Board, [a, b, c]: [TileId; 3]) -> Option<Mark> {
    match board[a] {
        Cell::Marked(mark) if board[b] == board[a] && board[c] == board[a] => Some(mark),
        _ => None,
    }
}

pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line_winner(board, *line) == Some(mark))
}

pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| line_winner(board, *line))
}

pub fn evaluate(board: &Board) -> GameState {
    if let Some(mark) = winner(board) {
        GameState::Won(mark)
    } else if board.is_full() {
        GameState::Drawn
    } else {
        GameState::InProgress
    }
}

/// Same answer as [`evaluate`] for any board reached by alternating play,
/// where `mover` placed the last mark. Only the mover's lines are checked:
/// a single placement cannot complete a line for the other mark.
pub fn evaluate_after(board: &Board, mover: Mark) -> GameState {
    // fewer than five marks means nobody has three yet
    if board.mark_count() < 5 {
        return GameState::InProgress;
    }
    if has_line(board, mover) {
        GameState::Won(mover)
    } else if board.is_full() {
        GameState::Drawn
    } else {
        GameState::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if let Ok(mark) = Mark::try_from(c) {
                    board.apply(row, col, mark).unwrap();
                }
            }
        }
        board
    }

    #[test]
    fn empty_board_is_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameState::InProgress);
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn every_line_wins_for_both_marks() {
        for line in LINES {
            for mark in [Mark::X, Mark::O] {
                let mut board = Board::new();
                for tile in line {
                    board.place(tile, mark).unwrap();
                }
                assert_eq!(evaluate(&board), GameState::Won(mark), "line {line:?}");
                assert!(has_line(&board, mark));
                assert!(!has_line(&board, !mark));
            }
        }
    }

    #[test]
    fn line_with_a_gap_never_wins() {
        for line in LINES {
            for gap in 0..3 {
                let mut board = Board::new();
                for (i, tile) in line.into_iter().enumerate() {
                    if i != gap {
                        board.place(tile, Mark::X).unwrap();
                    }
                }
                assert_eq!(line_winner(&board, line), None);
                assert_eq!(evaluate(&board), GameState::InProgress);
            }
        }
    }

    #[test]
    fn top_row_scenario() {
        let mut board = Board::new();
        board.apply(0, 0, Mark::X).unwrap();
        assert_eq!(evaluate(&board), GameState::InProgress);
        board.apply(0, 1, Mark::X).unwrap();
        assert_eq!(evaluate(&board), GameState::InProgress);
        board.apply(0, 2, Mark::X).unwrap();
        assert_eq!(evaluate(&board), GameState::Won(Mark::X));
    }

    #[test]
    fn full_board_without_line_is_drawn() {
        let board = board_from(["XOX", "OXO", "OXO"]);
        assert!(board.is_full());
        assert_eq!(evaluate(&board), GameState::Drawn);
        assert_eq!(evaluate_after(&board, Mark::O), GameState::Drawn);
    }

    #[test]
    fn full_board_with_line_is_won_not_drawn() {
        let board = board_from(["XXX", "OOX", "XOO"]);
        assert_eq!(evaluate(&board), GameState::Won(Mark::X));
    }

    #[test]
    fn partial_board_without_line_is_in_progress() {
        let board = board_from(["XO ", " X ", "O  "]);
        assert_eq!(evaluate(&board), GameState::InProgress);
        assert!(!GameState::InProgress.is_terminal());
        assert!(GameState::Drawn.is_terminal());
    }

    fn walk(board: &Board, to_move: Mark, visited: &mut usize) {
        for tile in board.empty_tiles().collect::<Vec<_>>() {
            let mut next = board.clone();
            next.place(tile, to_move).unwrap();
            *visited += 1;

            let full = evaluate(&next);
            assert_eq!(evaluate_after(&next, to_move), full, "\n{next}");
            if !full.is_terminal() {
                walk(&next, !to_move, visited);
            }
        }
    }

    #[test]
    fn mover_only_check_agrees_on_every_legal_game() {
        let mut visited = 0;
        walk(&Board::new(), Mark::X, &mut visited);
        walk(&Board::new(), Mark::O, &mut visited);
        assert!(visited > 2 * 255_168);
    }
}
