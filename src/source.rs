use std::{collections::VecDeque, str::FromStr};

use log::debug;
use thiserror::Error;

use crate::{
    board::{Board, InvalidMove},
    game::MoveSource,
    player::Player,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("can't read move {0:?}, expected two digits such as 13 or 1,3")]
pub struct ParseMoveError(pub String);

/// Hands out a predetermined sequence of 1-based moves, regardless of whose
/// turn it is, then runs dry.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    moves: VecDeque<(usize, usize)>,
    rejected: Vec<InvalidMove>,
}

impl ScriptedSource {
    pub fn new(moves: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    /// Every refusal reported back so far, oldest first.
    pub fn rejections(&self) -> &[InvalidMove] {
        &self.rejected
    }
}

/// Reads one move written as two digits, e.g. `13`, `1,3` or `1:3`.
pub fn parse_move(token: &str) -> Result<(usize, usize), ParseMoveError> {
    let digits: Vec<usize> = token
        .chars()
        .filter(|c| !matches!(c, ',' | ':' | '-'))
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect::<Option<_>>()
        .ok_or_else(|| ParseMoveError(token.to_string()))?;

    match digits[..] {
        [row, col] => Ok((row, col)),
        _ => Err(ParseMoveError(token.to_string())),
    }
}

impl FromStr for ScriptedSource {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_move)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl MoveSource for ScriptedSource {
    fn next_move(
        &mut self,
        player: &Player,
        _board: &Board,
    ) -> anyhow::Result<Option<(usize, usize)>> {
        let next = self.moves.pop_front();
        debug!("scripted move for {player}: {next:?}");
        Ok(next)
    }

    fn rejected(&mut self, _player: &Player, reason: &InvalidMove) {
        self.rejected.push(*reason);
    }
}
