//! The 3x3 board and terminal-state detection.
//!
//! Cells are addressed `0..=8`, row-major:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use crate::mark::Mark;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Terminal result of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

/// Fixed-size board of 9 cells, each empty or holding a mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from raw cells. Mostly useful for tests.
    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Content of a cell, `None` for empty or out-of-range indices.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Some(mark);
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// Raw view of all cells.
    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let first = self.cells[a]?;
            (self.cells[b] == Some(first) && self.cells[c] == Some(first)).then_some(first)
        })
    }

    /// Terminal check: a winning line beats a full board.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(mark) = self.winner() {
            Some(Outcome::Winner(mark))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}
