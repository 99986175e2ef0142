//! Message types used by the lobby.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what a client asks the lobby to do.
//! - [`OutputMessage`]: what the lobby tells a client.
//! - [`Delivery`]: an output message addressed to one connection.
//!
//! Note: the JSON encoding lives in the `fade-protocol` crate;
//! this module is purely logical.

use crate::board::{Outcome, CELL_COUNT};
use crate::mark::Mark;
use crate::registry::{AggregateStats, ConnectionId};

/// Name used when a client does not provide one.
pub const DEFAULT_DISPLAY_NAME: &str = "Player";

/// Longest display name kept (in chars); the rest is cut.
pub const MAX_DISPLAY_NAME_LEN: usize = 24;

/// A request from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Join the random matchmaking queue.
    Queue(QueueRequest),

    /// Create a private room and wait for someone to join by code.
    CreateRoom(CreateRoom),

    /// Join a private room by code.
    Join(JoinRoom),

    /// List rooms still waiting for a second player.
    GetRooms,

    /// Place a mark.
    Move(MoveRequest),

    /// Ask for the current population counters.
    GetStats,
}

/// Everything the lobby can send to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// Acknowledges a `queue` request.
    Queued,

    /// A private room was created for the requester.
    RoomCreated { room_code: String },

    /// Both seats of a session are filled; sent to each participant.
    Matched(Matched),

    RoomFull,

    RoomNotFound { room_code: String },

    AvailableRooms { rooms: Vec<String> },

    /// Full board snapshot after an accepted move.
    GameState(GameSnapshot),

    GameOver { outcome: Outcome },

    /// Generic move rejection. Deliberately carries no reason.
    InvalidMove,

    Stats(AggregateStats),

    /// The other participant disconnected; the session is gone.
    OpponentLeft,
}

/// Queue request (input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueRequest {
    pub name: Option<String>,
}

/// Create-room request (input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRoom {
    pub name: Option<String>,
}

/// Join-by-code request (input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRoom {
    pub room_code: String,
    pub name: Option<String>,
}

/// Move request (input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub room_code: String,

    /// Cell index, `0..=8` row-major. Larger values are rejected as an
    /// invalid move rather than dropped.
    pub position: usize,
}

/// Match notification (output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub room_code: String,
    pub player_mark: Mark,
    /// Display name of the other participant.
    pub opponent: String,
}

/// Full game state (output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub room_code: String,
    pub board: [Option<Mark>; CELL_COUNT],
    pub current_turn: Mark,
    pub fading_piece: Option<usize>,
}

/// An output message addressed to a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub msg: OutputMessage,
}

impl Delivery {
    pub fn new(to: ConnectionId, msg: OutputMessage) -> Self {
        Delivery { to, msg }
    }
}

/// Normalise a client-supplied display name.
///
/// Whitespace is trimmed, long names are cut, and a missing or blank
/// name becomes [`DEFAULT_DISPLAY_NAME`].
pub fn display_name(name: Option<&str>) -> String {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_DISPLAY_NAME.to_string();
    }
    trimmed.chars().take(MAX_DISPLAY_NAME_LEN).collect()
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl OutputMessage {
    pub fn room_created(room_code: impl Into<String>) -> Self {
        OutputMessage::RoomCreated {
            room_code: room_code.into(),
        }
    }

    pub fn room_not_found(room_code: impl Into<String>) -> Self {
        OutputMessage::RoomNotFound {
            room_code: room_code.into(),
        }
    }

    pub fn matched(room_code: impl Into<String>, player_mark: Mark, opponent: impl Into<String>) -> Self {
        OutputMessage::Matched(Matched {
            room_code: room_code.into(),
            player_mark,
            opponent: opponent.into(),
        })
    }

    pub fn game_over(outcome: Outcome) -> Self {
        OutputMessage::GameOver { outcome }
    }

    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputMessage::Queued => "queued",
            OutputMessage::RoomCreated { .. } => "roomCreated",
            OutputMessage::Matched(_) => "matched",
            OutputMessage::RoomFull => "roomFull",
            OutputMessage::RoomNotFound { .. } => "roomNotFound",
            OutputMessage::AvailableRooms { .. } => "availableRooms",
            OutputMessage::GameState(_) => "gameState",
            OutputMessage::GameOver { .. } => "gameOver",
            OutputMessage::InvalidMove => "invalidMove",
            OutputMessage::Stats(_) => "stats",
            OutputMessage::OpponentLeft => "opponentLeft",
        }
    }
}
