//! Fading tic-tac-toe rule engine.
//!
//! Only the most recent `fading_window` marks stay on the board. When a
//! move pushes the history past the window, the oldest mark is removed
//! from both the history and the board *after* the new mark is placed,
//! and only then is the board checked for a winner.
//!
//! Legality (turn, occupancy) is always judged against the board as it
//! was before the move, so a move is never rejected because of fading.

use std::collections::VecDeque;

use tracing::trace;

use crate::board::{Board, Outcome, CELL_COUNT};
use crate::error::RuleError;
use crate::mark::Mark;

/// Default number of live marks kept on the board.
pub const DEFAULT_FADING_WINDOW: usize = 5;

/// Tunable rule parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Maximum number of live marks. A window of 9 or more never
    /// evicts anything, i.e. classic tic-tac-toe.
    pub fading_window: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            fading_window: DEFAULT_FADING_WINDOW,
        }
    }
}

impl Rules {
    /// Window clamped to `1..=9`; anything wider plays like classic.
    pub fn with_window(fading_window: usize) -> Self {
        Rules {
            fading_window: fading_window.clamp(1, CELL_COUNT),
        }
    }

    /// Classic rules: no mark ever fades.
    pub fn classic() -> Self {
        Rules {
            fading_window: CELL_COUNT,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Cell cleared by the fading rule during this move.
    pub evicted: Option<usize>,

    /// Oldest surviving mark when the window is exactly full; the next
    /// mark to disappear. Advisory only.
    pub fading_piece: Option<usize>,

    /// Set once the game is over.
    pub outcome: Option<Outcome>,
}

/// Board, history and turn of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    rules: Rules,
    board: Board,
    /// Cell indices in the order they were placed, oldest first.
    history: VecDeque<usize>,
    current_turn: Mark,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Rules::default())
    }
}

impl GameState {
    /// Fresh game: empty board, X to move.
    pub fn new(rules: Rules) -> Self {
        GameState {
            rules,
            board: Board::new(),
            history: VecDeque::with_capacity(rules.fading_window.min(CELL_COUNT) + 1),
            current_turn: Mark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.history.iter().copied()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Oldest live mark if the window is exactly full.
    pub fn fading_piece(&self) -> Option<usize> {
        if self.history.len() == self.rules.fading_window {
            self.history.front().copied()
        } else {
            None
        }
    }

    /// Check a candidate move without applying it.
    pub fn validate(&self, mark: Mark, index: usize) -> Result<(), RuleError> {
        if mark != self.current_turn {
            return Err(RuleError::NotYourTurn {
                expected: self.current_turn,
                got: mark,
            });
        }
        if index >= CELL_COUNT {
            return Err(RuleError::OutOfRange(index));
        }
        if !self.board.is_empty_at(index) {
            return Err(RuleError::CellOccupied(index));
        }
        Ok(())
    }

    /// Validate and apply a move for `mark` at `index`.
    ///
    /// On error nothing changes. On success the mark is placed, the
    /// oldest mark is evicted if the window overflowed, the turn flips,
    /// and the post-eviction board is checked for a terminal state.
    pub fn apply_move(&mut self, mark: Mark, index: usize) -> Result<MoveOutcome, RuleError> {
        self.validate(mark, index)?;

        self.board.set(index, mark);
        self.history.push_back(index);

        let evicted = if self.history.len() > self.rules.fading_window {
            let oldest = self.history.pop_front();
            if let Some(cell) = oldest {
                self.board.clear(cell);
                trace!(cell, "mark faded");
            }
            oldest
        } else {
            None
        };

        self.current_turn = self.current_turn.opponent();

        Ok(MoveOutcome {
            evicted,
            fading_piece: self.fading_piece(),
            outcome: self.board.outcome(),
        })
    }
}
