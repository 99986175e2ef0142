//! Frame shapes as they appear on the wire.
//!
//! These mirror the JSON the browser client speaks, field names and
//! all, so they use camelCase (and one snake_case tag, `opponent_left`,
//! kept for client compatibility). Conversion to and from the logical
//! `fade_core` messages lives in `json_codec`.

use serde::{Deserialize, Serialize};

/// Default path the WebSocket endpoint is mounted on.
pub const DEFAULT_WS_PATH: &str = "/ws";

/// A mark as the client sees it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMark {
    X,
    O,
}

/// Value of `gameOver.winner`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireWinner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

/// Client → server frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireInput {
    #[serde(rename = "queue")]
    Queue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    #[serde(rename = "createRoom")]
    CreateRoom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    #[serde(rename = "join")]
    Join {
        #[serde(rename = "roomCode")]
        room_code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    #[serde(rename = "getRooms")]
    GetRooms,

    #[serde(rename = "move")]
    Move {
        #[serde(rename = "roomCode")]
        room_code: String,
        position: usize,
    },

    #[serde(rename = "getStats")]
    GetStats,
}

/// Server → client frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireOutput {
    #[serde(rename = "queue")]
    Queued,

    #[serde(rename = "roomCreated")]
    RoomCreated {
        #[serde(rename = "roomCode")]
        room_code: String,
    },

    #[serde(rename = "matched")]
    Matched {
        #[serde(rename = "roomCode")]
        room_code: String,
        #[serde(rename = "playerMark")]
        player_mark: WireMark,
        opponent: String,
    },

    #[serde(rename = "roomFull")]
    RoomFull,

    #[serde(rename = "roomNotFound")]
    RoomNotFound {
        #[serde(rename = "roomCode")]
        room_code: String,
    },

    #[serde(rename = "availableRooms")]
    AvailableRooms { rooms: Vec<String> },

    #[serde(rename = "gameState")]
    GameState {
        #[serde(rename = "roomCode")]
        room_code: String,
        board: [Option<WireMark>; 9],
        #[serde(rename = "currentTurn")]
        current_turn: WireMark,
        #[serde(rename = "fadingPiece")]
        fading_piece: Option<usize>,
    },

    #[serde(rename = "gameOver")]
    GameOver { winner: WireWinner },

    #[serde(rename = "invalidMove")]
    InvalidMove,

    #[serde(rename = "stats")]
    Stats {
        #[serde(rename = "playersOnline")]
        players_online: usize,
        #[serde(rename = "playersInQueue")]
        players_in_queue: usize,
    },

    #[serde(rename = "opponent_left")]
    OpponentLeft,
}
