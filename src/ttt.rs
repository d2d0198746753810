use std::fmt;

use derive_more::{Display, Error};
use itertools::iproduct;
use lazy_static::lazy_static;
use strum_macros::Display as StrumDisplay;

use crate::min_max::Player;

pub const SIZE: usize = 3;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum BoardStatus {
    MaxWon,
    MinWon,
    Draw,
    Ongoing,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, StrumDisplay)]
pub enum CellState {
    #[strum(serialize = "-")]
    EMPTY,
    X,
    O,
}

impl From<Player> for CellState {
    fn from(player: Player) -> Self {
        match player {
            Player::Max => CellState::X,
            Player::Min => CellState::O,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PositionError {
    #[display("position ({row}, {col}) is outside the 3x3 board")]
    OutOfRange { row: usize, col: usize },
}

/// A cell coordinate. Always inside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("({row}, {col})")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Panics when `row` or `col` is off the board.
    pub fn new(row: usize, col: usize) -> Self {
        match Self::try_new(row, col) {
            Ok(pos) => pos,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(row: usize, col: usize) -> Result<Self, PositionError> {
        if row < SIZE && col < SIZE {
            Ok(Self { row, col })
        } else {
            Err(PositionError::OutOfRange { row, col })
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }
}

lazy_static! {
    /// Every winning line: both diagonals, then row i and column i for each i.
    static ref WIN_LINES: Vec<[Position; 3]> = {
        let mut lines = vec![
            [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
            [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
        ];
        for i in 0..SIZE {
            lines.push([Position::new(i, 0), Position::new(i, 1), Position::new(i, 2)]);
            lines.push([Position::new(0, i), Position::new(1, i), Position::new(2, i)]);
        }
        lines
    };
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GameBoard {
    cells: [[CellState; SIZE]; SIZE],
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameBoard {
    pub fn empty() -> Self {
        Self::from_cells([[CellState::EMPTY; SIZE]; SIZE])
    }

    pub fn from_cells(cells: [[CellState; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[pos.row][pos.col]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.cell(pos) == CellState::EMPTY
    }

    /// Unoccupied cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        iproduct!(0..SIZE, 0..SIZE)
            .map(|(row, col)| Position { row, col })
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Does not check the cell is free.
    pub fn place(&mut self, pos: Position, player: Player) {
        self.cells[pos.row][pos.col] = CellState::from(player);
    }

    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = CellState::EMPTY;
    }

    pub fn with_move(&self, pos: Position, player: Player) -> Self {
        let mut next = *self;
        next.place(pos, player);
        next
    }

    pub fn has_won(&self, player: Player) -> bool {
        let mark = CellState::from(player);
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&pos| self.cell(pos) == mark))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != CellState::EMPTY)
    }

    pub fn is_terminal(&self) -> bool {
        self.status() != BoardStatus::Ongoing
    }

    pub fn status(&self) -> BoardStatus {
        if self.has_won(Player::Max) {
            BoardStatus::MaxWon
        } else if self.has_won(Player::Min) {
            BoardStatus::MinWon
        } else if self.is_full() {
            BoardStatus::Draw
        } else {
            BoardStatus::Ongoing
        }
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
