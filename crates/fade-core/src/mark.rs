//! Player marks (X / O).

/// A player's symbol on the board.
///
/// The first participant of a session always plays `X`, and `X`
/// always moves first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark that moves after this one.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character form, as shown on a board.
    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Mark assigned to the participant at `seat` (0 = first joiner).
    pub fn for_seat(seat: usize) -> Self {
        if seat == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
