// crates/fade-core/tests/protocol_scenarios.rs
use fade_core::{ClientEvent, ConnectionId, Lobby, OutputMessage};
use fade_protocol::{decode_input, encode_output};

const ROOM_PLACEHOLDER: &str = "{ROOM}";

/// Wire frames sent to each connection, in order.
struct Trace {
    frames: Vec<(u64, String)>,
    malformed: usize,
}

impl Trace {
    fn count(&self, kind: &str) -> usize {
        let tag = format!(r#"{{"type":"{kind}""#);
        self.frames.iter().filter(|(_, f)| f.starts_with(&tag)).count()
    }

    fn to(&self, conn: u64) -> Vec<&str> {
        self.frames
            .iter()
            .filter(|(c, _)| *c == conn)
            .map(|(_, f)| f.as_str())
            .collect()
    }
}

/// Replay a scenario file through a fresh lobby.
fn replay(script: &str) -> (Trace, String) {
    let mut lobby = Lobby::default();
    let mut room = String::new();
    let mut trace = Trace {
        frames: Vec::new(),
        malformed: 0,
    };

    for raw_line in script.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (conn, rest) = line.split_once(' ').expect("<conn> <action>");
        let id = ConnectionId(conn.parse().expect("numeric connection id"));

        let event = match rest {
            "connect" => ClientEvent::Connected,
            "disconnect" => ClientEvent::Disconnected,
            frame => match decode_input(&frame.replace(ROOM_PLACEHOLDER, &room)) {
                Ok(msg) => ClientEvent::Message(msg),
                Err(_) => {
                    trace.malformed += 1;
                    continue;
                }
            },
        };

        for delivery in lobby.process_event(id, event) {
            if let OutputMessage::RoomCreated { room_code } = &delivery.msg {
                if room.is_empty() {
                    room = room_code.clone();
                }
            }
            let text = encode_output(&delivery.msg).expect("encodable");
            trace.frames.push((delivery.to.0, text));
        }
    }

    (trace, room)
}

#[test]
fn private_room_game_matches_expected_wire_trace() {
    const INPUT: &str = include_str!("data/private_room_game.txt");
    let (trace, room) = replay(INPUT);

    assert_eq!(room.len(), 6);
    assert_eq!(trace.malformed, 1);

    assert_eq!(trace.count("roomCreated"), 1);
    assert_eq!(trace.count("availableRooms"), 1);
    assert_eq!(trace.count("matched"), 2);
    assert_eq!(trace.count("roomFull"), 1);
    assert_eq!(trace.count("invalidMove"), 2);
    assert_eq!(trace.count("gameState"), 14, "7 accepted moves, 2 players each");
    assert_eq!(trace.count("gameOver"), 2);
    assert_eq!(trace.count("opponent_left"), 0, "session ended before the disconnect");
    // 3 connects (1 + 2 + 3), one getStats, one disconnect seen by 2 peers.
    assert_eq!(trace.count("stats"), 9);

    let spectator = trace.to(3);
    assert!(spectator.contains(&format!(r#"{{"type":"availableRooms","rooms":["{room}"]}}"#).as_str()));
    assert!(spectator.contains(&r#"{"type":"roomFull"}"#));
    assert_eq!(
        spectator.last().copied(),
        Some(r#"{"type":"stats","playersOnline":2,"playersInQueue":0}"#)
    );

    let ada = trace.to(1);
    let final_state = format!(
        r#"{{"type":"gameState","roomCode":"{room}","board":[null,null,"O","O",null,null,"X","X","X"],"currentTurn":"O","fadingPiece":8}}"#
    );
    let over_at = ada
        .iter()
        .position(|f| *f == r#"{"type":"gameOver","winner":"X"}"#)
        .expect("Ada sees the game end");
    assert_eq!(ada[over_at - 1], final_state);
    assert!(ada.contains(&format!(r#"{{"type":"matched","roomCode":"{room}","playerMark":"X","opponent":"Bob"}}"#).as_str()));
}
