//! Session store: room code -> session.
//!
//! Also owns room code generation, the "available rooms" listing for
//! private rooms still waiting on a second player, and a reverse index
//! from connection to the room it sits in.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::LobbyError;
use crate::registry::ConnectionId;
use crate::rules::Rules;
use crate::session::Session;

/// Alphabet room codes are drawn from (base 36, uppercase).
pub const ROOM_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default room code length.
pub const DEFAULT_ROOM_CODE_LEN: usize = 6;

/// Accepted room code lengths. Four characters leave over a million codes.
pub const MIN_ROOM_CODE_LEN: usize = 4;
pub const MAX_ROOM_CODE_LEN: usize = 12;

/// All live sessions, forming and active.
#[derive(Debug)]
pub struct SessionStore {
    sessions: IndexMap<String, Session>,
    /// Forming private rooms, in creation order.
    available: IndexSet<String>,
    by_connection: HashMap<ConnectionId, String>,
    rules: Rules,
    code_len: usize,
    rng: StdRng,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new(Rules::default(), DEFAULT_ROOM_CODE_LEN)
    }
}

impl SessionStore {
    pub fn new(rules: Rules, code_len: usize) -> Self {
        Self::with_rng(rules, code_len, StdRng::from_entropy())
    }

    /// Deterministic room codes, for tests.
    pub fn seeded(rules: Rules, code_len: usize, seed: u64) -> Self {
        Self::with_rng(rules, code_len, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Rules, code_len: usize, rng: StdRng) -> Self {
        SessionStore {
            sessions: IndexMap::new(),
            available: IndexSet::new(),
            by_connection: HashMap::new(),
            rules,
            code_len: code_len.clamp(MIN_ROOM_CODE_LEN, MAX_ROOM_CODE_LEN),
            rng,
        }
    }

    /// Draw a code that no live session is using.
    fn generate_code(&mut self) -> String {
        loop {
            let code: String = (0..self.code_len)
                .map(|_| {
                    let i = self.rng.gen_range(0..ROOM_CODE_ALPHABET.len());
                    ROOM_CODE_ALPHABET[i] as char
                })
                .collect();
            if !self.sessions.contains_key(&code) {
                return code;
            }
        }
    }

    fn ensure_free(&self, connection: ConnectionId) -> Result<(), LobbyError> {
        match self.by_connection.get(&connection) {
            Some(code) => Err(LobbyError::AlreadyInSession(connection, code.clone())),
            None => Ok(()),
        }
    }

    /// Create a single-participant room and list it as available.
    pub fn create_private_room(&mut self, connection: ConnectionId, name: String) -> Result<String, LobbyError> {
        self.ensure_free(connection)?;
        let code = self.generate_code();
        let session = Session::forming(code.clone(), connection, name, self.rules);
        self.by_connection.insert(connection, code.clone());
        self.available.insert(code.clone());
        self.sessions.insert(code.clone(), session);
        Ok(code)
    }

    /// Create an active session from two queued players; returns its code.
    pub fn create_paired(&mut self, first: (ConnectionId, String), second: (ConnectionId, String)) -> String {
        let code = self.generate_code();
        self.by_connection.insert(first.0, code.clone());
        self.by_connection.insert(second.0, code.clone());
        let session = Session::paired(code.clone(), first, second, self.rules);
        self.sessions.insert(code.clone(), session);
        code
    }

    /// Seat `connection` as the second player of a forming room.
    pub fn join_room(&mut self, connection: ConnectionId, name: String, code: &str) -> Result<(), LobbyError> {
        let session = self
            .sessions
            .get_mut(code)
            .ok_or_else(|| LobbyError::RoomNotFound(code.to_string()))?;
        if let Some(other) = self.by_connection.get(&connection) {
            return Err(LobbyError::AlreadyInSession(connection, other.clone()));
        }
        if session.is_full() {
            return Err(LobbyError::RoomFull(code.to_string()));
        }

        session.add_participant(connection, name)?;
        self.available.shift_remove(code);
        self.by_connection.insert(connection, code.to_string());
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Session> {
        self.sessions.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Session> {
        self.sessions.get_mut(code)
    }

    /// Room the connection currently sits in.
    pub fn room_of(&self, connection: ConnectionId) -> Option<&str> {
        self.by_connection.get(&connection).map(String::as_str)
    }

    /// Delete a session and every index entry pointing at it.
    pub fn remove(&mut self, code: &str) -> Option<Session> {
        let session = self.sessions.shift_remove(code)?;
        self.available.shift_remove(code);
        for p in session.participants() {
            self.by_connection.remove(&p.connection);
        }
        Some(session)
    }

    /// Mark the connection's session abandoned and remove it.
    pub fn abandon_for(&mut self, connection: ConnectionId) -> Option<Session> {
        let code = self.by_connection.get(&connection)?.clone();
        let mut session = self.remove(&code)?;
        session.abandon();
        Some(session)
    }

    /// Codes of rooms waiting for a second player, oldest first.
    pub fn available_rooms(&self) -> Vec<String> {
        self.available.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
