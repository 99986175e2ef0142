//! JSON codec.
//!
//! Input frames (text → `InputMessage`):
//!
//! - `{"type":"queue","name"?:string}`
//! - `{"type":"createRoom","name"?:string}`
//! - `{"type":"join","roomCode":string,"name"?:string}`
//! - `{"type":"getRooms"}`
//! - `{"type":"move","roomCode":string,"position":0..8}`
//! - `{"type":"getStats"}`
//!
//! Output frames (`OutputMessage` → text):
//!
//! - `queue`, `roomCreated`, `matched`, `roomFull`, `roomNotFound`,
//!   `availableRooms`, `gameState`, `gameOver`, `invalidMove`, `stats`,
//!   `opponent_left`
//!
//! Unknown fields are ignored; unknown `type`s and missing required
//! fields are a [`ProtocolError`], which the server treats as a
//! malformed message and drops.

use fade_core::{
    AggregateStats,
    CreateRoom,
    GameSnapshot,
    InputMessage,
    JoinRoom,
    Mark,
    Matched,
    MoveRequest,
    Outcome,
    OutputMessage,
    QueueRequest,
};
use thiserror::Error;

use crate::wire_types::{WireInput, WireMark, WireOutput, WireWinner};

/// Errors from the JSON codec.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a client frame.
pub fn decode_input(text: &str) -> Result<InputMessage, ProtocolError> {
    let wire: WireInput = serde_json::from_str(text)?;
    Ok(wire.into())
}

/// Render a client frame (used by test clients and tools).
pub fn encode_input(msg: &InputMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&WireInput::from(msg.clone()))?)
}

/// Render a server frame.
pub fn encode_output(msg: &OutputMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&WireOutput::from(msg.clone()))?)
}

/// Parse a server frame (used by test clients and tools).
pub fn decode_output(text: &str) -> Result<OutputMessage, ProtocolError> {
    let wire: WireOutput = serde_json::from_str(text)?;
    Ok(wire.into())
}

// -----------------------------------------------------------------------------
// Conversions
// -----------------------------------------------------------------------------

impl From<Mark> for WireMark {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => WireMark::X,
            Mark::O => WireMark::O,
        }
    }
}

impl From<WireMark> for Mark {
    fn from(mark: WireMark) -> Self {
        match mark {
            WireMark::X => Mark::X,
            WireMark::O => Mark::O,
        }
    }
}

impl From<Outcome> for WireWinner {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(Mark::X) => WireWinner::X,
            Outcome::Winner(Mark::O) => WireWinner::O,
            Outcome::Draw => WireWinner::Draw,
        }
    }
}

impl From<WireWinner> for Outcome {
    fn from(winner: WireWinner) -> Self {
        match winner {
            WireWinner::X => Outcome::Winner(Mark::X),
            WireWinner::O => Outcome::Winner(Mark::O),
            WireWinner::Draw => Outcome::Draw,
        }
    }
}

impl From<WireInput> for InputMessage {
    fn from(wire: WireInput) -> Self {
        match wire {
            WireInput::Queue { name } => InputMessage::Queue(QueueRequest { name }),
            WireInput::CreateRoom { name } => InputMessage::CreateRoom(CreateRoom { name }),
            WireInput::Join { room_code, name } => InputMessage::Join(JoinRoom { room_code, name }),
            WireInput::GetRooms => InputMessage::GetRooms,
            WireInput::Move { room_code, position } => {
                InputMessage::Move(MoveRequest { room_code, position })
            }
            WireInput::GetStats => InputMessage::GetStats,
        }
    }
}

impl From<InputMessage> for WireInput {
    fn from(msg: InputMessage) -> Self {
        match msg {
            InputMessage::Queue(QueueRequest { name }) => WireInput::Queue { name },
            InputMessage::CreateRoom(CreateRoom { name }) => WireInput::CreateRoom { name },
            InputMessage::Join(JoinRoom { room_code, name }) => WireInput::Join { room_code, name },
            InputMessage::GetRooms => WireInput::GetRooms,
            InputMessage::Move(MoveRequest { room_code, position }) => {
                WireInput::Move { room_code, position }
            }
            InputMessage::GetStats => WireInput::GetStats,
        }
    }
}

impl From<OutputMessage> for WireOutput {
    fn from(msg: OutputMessage) -> Self {
        match msg {
            OutputMessage::Queued => WireOutput::Queued,
            OutputMessage::RoomCreated { room_code } => WireOutput::RoomCreated { room_code },
            OutputMessage::Matched(Matched {
                room_code,
                player_mark,
                opponent,
            }) => WireOutput::Matched {
                room_code,
                player_mark: player_mark.into(),
                opponent,
            },
            OutputMessage::RoomFull => WireOutput::RoomFull,
            OutputMessage::RoomNotFound { room_code } => WireOutput::RoomNotFound { room_code },
            OutputMessage::AvailableRooms { rooms } => WireOutput::AvailableRooms { rooms },
            OutputMessage::GameState(snap) => WireOutput::GameState {
                room_code: snap.room_code,
                board: snap.board.map(|cell| cell.map(WireMark::from)),
                current_turn: snap.current_turn.into(),
                fading_piece: snap.fading_piece,
            },
            OutputMessage::GameOver { outcome } => WireOutput::GameOver {
                winner: outcome.into(),
            },
            OutputMessage::InvalidMove => WireOutput::InvalidMove,
            OutputMessage::Stats(stats) => WireOutput::Stats {
                players_online: stats.online,
                players_in_queue: stats.queued,
            },
            OutputMessage::OpponentLeft => WireOutput::OpponentLeft,
        }
    }
}

impl From<WireOutput> for OutputMessage {
    fn from(wire: WireOutput) -> Self {
        match wire {
            WireOutput::Queued => OutputMessage::Queued,
            WireOutput::RoomCreated { room_code } => OutputMessage::RoomCreated { room_code },
            WireOutput::Matched {
                room_code,
                player_mark,
                opponent,
            } => OutputMessage::matched(room_code, player_mark.into(), opponent),
            WireOutput::RoomFull => OutputMessage::RoomFull,
            WireOutput::RoomNotFound { room_code } => OutputMessage::RoomNotFound { room_code },
            WireOutput::AvailableRooms { rooms } => OutputMessage::AvailableRooms { rooms },
            WireOutput::GameState {
                room_code,
                board,
                current_turn,
                fading_piece,
            } => OutputMessage::GameState(GameSnapshot {
                room_code,
                board: board.map(|cell| cell.map(Mark::from)),
                current_turn: current_turn.into(),
                fading_piece,
            }),
            WireOutput::GameOver { winner } => OutputMessage::game_over(winner.into()),
            WireOutput::InvalidMove => OutputMessage::InvalidMove,
            WireOutput::Stats {
                players_online,
                players_in_queue,
            } => OutputMessage::Stats(AggregateStats {
                online: players_online,
                queued: players_in_queue,
            }),
            WireOutput::OpponentLeft => OutputMessage::OpponentLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn encoded(msg: &OutputMessage) -> Value {
        let text = encode_output(msg).expect("encode");
        serde_json::from_str(&text).expect("valid json")
    }

    #[test]
    fn decodes_move_with_room_code() {
        let msg = decode_input(r#"{"type":"move","roomCode":"AB12CD","position":4}"#).unwrap();
        assert_eq!(
            msg,
            InputMessage::Move(MoveRequest {
                room_code: "AB12CD".into(),
                position: 4,
            })
        );
    }

    #[test]
    fn decodes_bare_requests_and_ignores_extra_fields() {
        assert_eq!(decode_input(r#"{"type":"getRooms"}"#).unwrap(), InputMessage::GetRooms);
        assert_eq!(
            decode_input(r#"{"type":"getStats","ts":12345}"#).unwrap(),
            InputMessage::GetStats
        );
        assert_eq!(
            decode_input(r#"{"type":"queue"}"#).unwrap(),
            InputMessage::Queue(QueueRequest { name: None })
        );
        assert_eq!(
            decode_input(r#"{"type":"join","roomCode":"ZZ9","name":"Ada"}"#).unwrap(),
            InputMessage::Join(JoinRoom {
                room_code: "ZZ9".into(),
                name: Some("Ada".into()),
            })
        );
    }

    #[test]
    fn rejects_malformed_frames() {
        for bad in [
            "not json",
            r#"{"roomCode":"AAA"}"#,
            r#"{"type":"teleport"}"#,
            r#"{"type":"move","roomCode":"AAA"}"#,
            r#"{"type":"move","roomCode":"AAA","position":-1}"#,
            r#"{"type":"join","name":"Ada"}"#,
        ] {
            assert!(
                matches!(decode_input(bad), Err(ProtocolError::Malformed(_))),
                "expected malformed: {bad}"
            );
        }
    }

    #[test]
    fn encodes_game_state_with_nulls() {
        let mut board = [None; 9];
        board[0] = Some(Mark::X);
        board[4] = Some(Mark::O);
        let msg = OutputMessage::GameState(GameSnapshot {
            room_code: "Q1W2E3".into(),
            board,
            current_turn: Mark::X,
            fading_piece: None,
        });

        assert_eq!(
            encoded(&msg),
            json!({
                "type": "gameState",
                "roomCode": "Q1W2E3",
                "board": ["X", null, null, null, "O", null, null, null, null],
                "currentTurn": "X",
                "fadingPiece": null,
            })
        );
    }

    #[test]
    fn encodes_terminal_and_notice_frames() {
        assert_eq!(
            encoded(&OutputMessage::game_over(Outcome::Draw)),
            json!({"type": "gameOver", "winner": "draw"})
        );
        assert_eq!(
            encoded(&OutputMessage::game_over(Outcome::Winner(Mark::O))),
            json!({"type": "gameOver", "winner": "O"})
        );
        assert_eq!(encoded(&OutputMessage::OpponentLeft), json!({"type": "opponent_left"}));
        assert_eq!(encoded(&OutputMessage::InvalidMove), json!({"type": "invalidMove"}));
        assert_eq!(encoded(&OutputMessage::Queued), json!({"type": "queue"}));
        assert_eq!(
            encoded(&OutputMessage::Stats(AggregateStats { online: 3, queued: 1 })),
            json!({"type": "stats", "playersOnline": 3, "playersInQueue": 1})
        );
        assert_eq!(
            encoded(&OutputMessage::matched("ABCDEF", Mark::O, "Ada")),
            json!({"type": "matched", "roomCode": "ABCDEF", "playerMark": "O", "opponent": "Ada"})
        );
    }

    #[test]
    fn client_side_round_trip_of_available_rooms() {
        let msg = OutputMessage::AvailableRooms {
            rooms: vec!["AAAAAA".into(), "BBBBBB".into()],
        };
        let text = encode_output(&msg).unwrap();
        assert_eq!(decode_output(&text).unwrap(), msg);
    }
}
