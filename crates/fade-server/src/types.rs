//! Shared types for the game server.
//!
//! This module defines:
//! - channel aliases between client tasks and the lobby task
//! - `ClientRegistry`: outbound channels of connected clients
//! - `LobbyRequest`: events flowing from clients to the lobby

use std::collections::HashMap;
use std::sync::Arc;

use fade_core::{ClientEvent, ConnectionId, OutputMessage};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Outbound messages from the lobby to a given client.
pub type OutboundTx = mpsc::UnboundedSender<OutputMessage>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputMessage>;

/// Registry of connected clients and their outbound channels.
///
/// - Key: `ConnectionId`
/// - Value: `OutboundTx` to send `OutputMessage`s to that client.
///
/// Game state never lives here; the lobby task owns all of it.
pub type ClientRegistry = Arc<RwLock<HashMap<ConnectionId, OutboundTx>>>;

/// Event flowing from a client task into the central lobby task.
#[derive(Debug)]
pub struct LobbyRequest {
    pub client_id: ConnectionId,
    pub event: ClientEvent,
}

/// Channel from clients → lobby task.
pub type LobbyTx = mpsc::UnboundedSender<LobbyRequest>;
pub type LobbyRx = mpsc::UnboundedReceiver<LobbyRequest>;
