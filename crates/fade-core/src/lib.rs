//! fade-core
//!
//! Pure game logic for networked fading tic-tac-toe:
//! - marks, board and the fading-window rule engine
//! - connection registry, matchmaking queue, session store
//! - the lobby that ties them into a session lifecycle

pub mod mark;
pub mod board;
pub mod rules;
pub mod messages;
pub mod registry;
pub mod queue;
pub mod session;
pub mod session_store;
pub mod lobby;
pub mod error;

pub use mark::Mark;
pub use board::{Board, Outcome, CELL_COUNT, WINNING_LINES};
pub use rules::{GameState, MoveOutcome, Rules, DEFAULT_FADING_WINDOW};

pub use messages::{
    CreateRoom,
    Delivery,
    GameSnapshot,
    InputMessage,
    JoinRoom,
    Matched,
    MoveRequest,
    OutputMessage,
    QueueRequest,
};

pub use registry::{AggregateStats, ConnectionId, ConnectionRegistry};
pub use queue::{MatchQueue, QueueEntry};
pub use session::{Participant, Session, SessionPhase};
pub use session_store::{SessionStore, DEFAULT_ROOM_CODE_LEN, MAX_ROOM_CODE_LEN, MIN_ROOM_CODE_LEN};
pub use lobby::{ClientEvent, Lobby};
pub use error::{LobbyError, RuleError};
