//! A single two-player match.

use crate::error::LobbyError;
use crate::mark::Mark;
use crate::messages::GameSnapshot;
use crate::registry::ConnectionId;
use crate::rules::{GameState, MoveOutcome, Rules};

/// Lifecycle phase of a session.
///
/// `Finished` and `Abandoned` are terminal: the lobby removes the
/// session from the store as soon as it reaches either one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Private room with one participant, waiting for a joiner.
    Forming,
    /// Two participants, accepting moves.
    Active,
    /// Someone won or the board filled up.
    Finished,
    /// A participant disconnected.
    Abandoned,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection: ConnectionId,
    pub name: String,
    pub mark: Mark,
}

#[derive(Debug, Clone)]
pub struct Session {
    room_code: String,
    /// Join order; seat 0 plays X.
    participants: Vec<Participant>,
    game: GameState,
    phase: SessionPhase,
}

impl Session {
    /// Private room with its creator seated as X.
    pub fn forming(room_code: String, creator: ConnectionId, name: String, rules: Rules) -> Self {
        Session {
            room_code,
            participants: vec![Participant {
                connection: creator,
                name,
                mark: Mark::X,
            }],
            game: GameState::new(rules),
            phase: SessionPhase::Forming,
        }
    }

    /// Session created directly from two queued players.
    pub fn paired(
        room_code: String,
        first: (ConnectionId, String),
        second: (ConnectionId, String),
        rules: Rules,
    ) -> Self {
        let mut session = Session::forming(room_code, first.0, first.1, rules);
        session.seat(second.0, second.1);
        session
    }

    /// Seat the second participant as O and start the game.
    pub fn add_participant(&mut self, connection: ConnectionId, name: String) -> Result<(), LobbyError> {
        if self.participants.len() >= 2 || self.phase != SessionPhase::Forming {
            return Err(LobbyError::RoomFull(self.room_code.clone()));
        }
        self.seat(connection, name);
        Ok(())
    }

    fn seat(&mut self, connection: ConnectionId, name: String) {
        let mark = Mark::for_seat(self.participants.len());
        self.participants.push(Participant { connection, name, mark });
        self.phase = SessionPhase::Active;
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() == 2
    }

    pub fn participant(&self, connection: ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.connection == connection)
    }

    pub fn opponent_of(&self, connection: ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.connection != connection)
    }

    /// Play a move on behalf of `connection`.
    ///
    /// The connection's seat decides the mark; the rule engine decides
    /// legality. A terminal outcome moves the session to `Finished`.
    pub fn play(&mut self, connection: ConnectionId, position: usize) -> Result<MoveOutcome, LobbyError> {
        if self.phase != SessionPhase::Active {
            return Err(LobbyError::SessionNotActive(self.room_code.clone()));
        }
        let mark = self
            .participant(connection)
            .map(|p| p.mark)
            .ok_or_else(|| LobbyError::NotAParticipant(connection, self.room_code.clone()))?;

        let result = self.game.apply_move(mark, position)?;
        if result.outcome.is_some() {
            self.phase = SessionPhase::Finished;
        }
        Ok(result)
    }

    pub(crate) fn abandon(&mut self) {
        self.phase = SessionPhase::Abandoned;
    }

    /// Full state for broadcasting.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            room_code: self.room_code.clone(),
            board: *self.game.board().cells(),
            current_turn: self.game.current_turn(),
            fading_piece: self.game.fading_piece(),
        }
    }
}
