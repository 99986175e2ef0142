//! Registry of live connections.
//!
//! The registry only knows connection identities. Sending is modelled
//! as producing [`Delivery`] values; the networking layer turns those
//! into actual writes and silently drops any whose peer has gone away.

use std::collections::BTreeSet;

use crate::messages::{Delivery, OutputMessage};

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u64);

/// Process-wide population counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub online: usize,
    pub queued: usize,
}

/// Set of currently open connections.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    // Ordered so broadcasts go out in a stable order.
    live: BTreeSet<ConnectionId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        ConnectionRegistry::default()
    }

    /// Returns `false` if the connection was already registered.
    pub fn register(&mut self, id: ConnectionId) -> bool {
        self.live.insert(id)
    }

    /// Returns `false` if the connection was not registered.
    pub fn unregister(&mut self, id: ConnectionId) -> bool {
        self.live.remove(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.live.contains(&id)
    }

    pub fn online_count(&self) -> usize {
        self.live.len()
    }

    /// Address `msg` to `id`. Unknown (closed) connections yield nothing.
    pub fn send_to(&self, id: ConnectionId, msg: OutputMessage) -> Option<Delivery> {
        self.contains(id).then(|| Delivery::new(id, msg))
    }

    /// Address `msg` to every live connection accepted by `filter`.
    pub fn broadcast<F>(&self, msg: &OutputMessage, filter: F) -> Vec<Delivery>
    where
        F: Fn(ConnectionId) -> bool,
    {
        self.live
            .iter()
            .copied()
            .filter(|&id| filter(id))
            .map(|id| Delivery::new(id, msg.clone()))
            .collect()
    }

    /// Address `msg` to every live connection.
    pub fn broadcast_all(&self, msg: &OutputMessage) -> Vec<Delivery> {
        self.broadcast(msg, |_| true)
    }
}
