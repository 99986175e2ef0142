//! Error types for the game core.
//!
//! None of these are fatal: every error is local to the connection
//! that caused it. The lobby decides whether (and how) the client
//! hears about it.

use thiserror::Error;

use crate::mark::Mark;
use crate::ConnectionId;

/// A move was rejected by the rule engine. The game state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("not {got}'s turn (expected {expected})")]
    NotYourTurn { expected: Mark, got: Mark },

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("cell index {0} is off the board")]
    OutOfRange(usize),
}

/// Per-request failures in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("room {0} does not exist")]
    RoomNotFound(String),

    #[error("room {0} already has two players")]
    RoomFull(String),

    #[error("connection {0:?} is not playing in room {1}")]
    NotAParticipant(ConnectionId, String),

    #[error("room {0} is not accepting moves")]
    SessionNotActive(String),

    #[error("connection {0:?} is already queued")]
    AlreadyQueued(ConnectionId),

    #[error("connection {0:?} is already in room {1}")]
    AlreadyInSession(ConnectionId, String),

    #[error("connection {0:?} is not registered")]
    UnknownConnection(ConnectionId),

    #[error(transparent)]
    Rule(#[from] RuleError),
}
