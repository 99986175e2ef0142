//! Central lobby loop.
//!
//! This task owns the `Lobby` (registry, queue, sessions) and processes
//! every `LobbyRequest` from every client, one at a time, in arrival
//! order. Nothing else touches game state, so none of it is locked.
//!
//! Routing: each `Delivery` names exactly one recipient. If that
//! client's channel is gone (it disconnected after the event was
//! queued), the delivery is dropped.

use std::collections::HashMap;

use fade_core::{ConnectionId, Delivery, Lobby};
use tracing::{info, trace};

use crate::types::{ClientRegistry, LobbyRequest, LobbyRx, OutboundTx};

/// Run the central lobby processing loop.
///
/// - `lobby_rx`: receives events from all client tasks.
/// - `clients`: registry of connected clients and their outbound channels.
pub async fn run_lobby_loop(mut lobby: Lobby, mut lobby_rx: LobbyRx, clients: ClientRegistry) {
    while let Some(req) = lobby_rx.recv().await {
        let LobbyRequest { client_id, event } = req;

        let deliveries = lobby.process_event(client_id, event);

        if deliveries.is_empty() {
            continue;
        }

        // Snapshot of current clients to minimize lock hold time.
        let current_clients = {
            let guard = clients.read().await;
            guard.clone()
        };

        for delivery in deliveries {
            route_delivery(delivery, &current_clients);
        }
    }

    info!("lobby loop shutting down (lobby_rx closed)");
}

/// Hand a delivery to its recipient's outbound channel.
///
/// Returns `false` when the recipient is gone; that is not an error.
fn route_delivery(delivery: Delivery, clients: &HashMap<ConnectionId, OutboundTx>) -> bool {
    let Delivery { to, msg } = delivery;
    let kind = msg.kind();
    let sent = clients.get(&to).is_some_and(|tx| tx.send(msg).is_ok());
    if !sent {
        trace!(conn = to.0, kind, "recipient gone, delivery dropped");
    }
    sent
}
