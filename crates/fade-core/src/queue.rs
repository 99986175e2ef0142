//! FIFO matchmaking queue.
//!
//! Strict arrival order, no priority. Pairing is checked right after
//! every enqueue, so the queue never holds more than one entry between
//! calls.

use std::collections::VecDeque;

use crate::error::LobbyError;
use crate::registry::ConnectionId;

/// One waiting player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub connection: ConnectionId,
    pub name: String,
}

/// Waiting players, oldest first.
#[derive(Debug, Default)]
pub struct MatchQueue {
    entries: VecDeque<QueueEntry>,
}

impl MatchQueue {
    pub fn new() -> Self {
        MatchQueue::default()
    }

    /// Append a player and pop the two oldest entries if a pair is ready.
    ///
    /// A connection that is already waiting is rejected rather than
    /// queued twice.
    pub fn enqueue(
        &mut self,
        connection: ConnectionId,
        name: String,
    ) -> Result<Option<(QueueEntry, QueueEntry)>, LobbyError> {
        if self.contains(connection) {
            return Err(LobbyError::AlreadyQueued(connection));
        }
        self.entries.push_back(QueueEntry { connection, name });
        Ok(self.take_pair())
    }

    fn take_pair(&mut self) -> Option<(QueueEntry, QueueEntry)> {
        if self.entries.len() < 2 {
            return None;
        }
        let first = self.entries.pop_front()?;
        let second = self.entries.pop_front()?;
        Some((first, second))
    }

    /// Remove a specific connection. Returns whether anything was removed.
    pub fn dequeue_by_connection(&mut self, connection: ConnectionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.connection != connection);
        self.entries.len() != before
    }

    pub fn contains(&self, connection: ConnectionId) -> bool {
        self.entries.iter().any(|e| e.connection == connection)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting connections, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.entries.iter().map(|e| e.connection)
    }
}
