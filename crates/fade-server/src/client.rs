//! Per-connection WebSocket I/O.
//!
//! Each client gets two halves:
//! - a writer task draining its `OutboundRx` into JSON text frames,
//! - a reader loop decoding text frames into `LobbyRequest`s.
//!
//! Malformed frames are logged and dropped; the connection stays open.

use anyhow::{anyhow, Result};
use axum::extract::ws::{Message, WebSocket};
use fade_core::{ClientEvent, ConnectionId};
use fade_protocol::{decode_input, encode_output};
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use tracing::{debug, warn};

use crate::types::{ClientRegistry, LobbyRequest, LobbyTx, OutboundRx};

/// Run the client I/O loop for a single connection.
///
/// The caller has already registered the client's outbound channel in
/// `clients`; this function removes it again on the way out and tells
/// the lobby the client is gone.
pub async fn run_client(
    client_id: ConnectionId,
    socket: WebSocket,
    lobby_tx: LobbyTx,
    mut out_rx: OutboundRx,
    clients: ClientRegistry,
) -> Result<()> {
    let (mut ws_tx, ws_rx) = socket.split();

    // Writer task: consume OutputMessages and write JSON frames.
    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let text = match encode_output(&msg) {
                Ok(text) => text,
                Err(err) => {
                    warn!(conn = client_id.0, %err, "failed to encode outbound message");
                    continue;
                }
            };
            if let Err(err) = ws_tx.send(Message::Text(text)).await {
                // Peer went away between dispatch and send.
                debug!(conn = client_id.0, %err, "write failed, stopping writer");
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    let result = match send_event(&lobby_tx, client_id, ClientEvent::Connected) {
        Ok(()) => read_frames(client_id, ws_rx, &lobby_tx).await,
        Err(err) => Err(err),
    };
    let released = release(client_id, &clients, &lobby_tx).await;

    if let Err(err) = writer.await {
        debug!(conn = client_id.0, %err, "writer task ended abnormally");
    }

    result.and(released)
}

/// Drop the client from the registry and tell the lobby it left.
///
/// Removing the last sender also ends the writer task.
async fn release(client_id: ConnectionId, clients: &ClientRegistry, lobby_tx: &LobbyTx) -> Result<()> {
    clients.write().await.remove(&client_id);
    send_event(lobby_tx, client_id, ClientEvent::Disconnected)
}

async fn read_frames(
    client_id: ConnectionId,
    mut ws_rx: SplitStream<WebSocket>,
    lobby_tx: &LobbyTx,
) -> Result<()> {
    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                debug!(conn = client_id.0, %err, "read error");
                break;
            }
        };

        match frame {
            Message::Text(text) => match decode_input(&text) {
                Ok(msg) => send_event(lobby_tx, client_id, ClientEvent::Message(msg))?,
                Err(err) => {
                    warn!(conn = client_id.0, %err, "dropping malformed message");
                }
            },
            Message::Binary(_) => {
                debug!(conn = client_id.0, "ignoring binary frame");
            }
            Message::Close(_) => break,
            // axum answers pings itself.
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
    Ok(())
}

fn send_event(lobby_tx: &LobbyTx, client_id: ConnectionId, event: ClientEvent) -> Result<()> {
    lobby_tx
        .send(LobbyRequest { client_id, event })
        .map_err(|_| anyhow!("lobby channel closed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Arc;

    use tokio::sync::{mpsc, RwLock};

    #[tokio::test]
    async fn release_reports_the_disconnect() {
        let (out_tx, _out_rx) = mpsc::unbounded_channel();
        let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::from([(ConnectionId(4), out_tx)])));
        let (lobby_tx, mut lobby_rx) = mpsc::unbounded_channel();

        release(ConnectionId(4), &clients, &lobby_tx).await.unwrap();

        assert!(clients.read().await.is_empty());
        let req = lobby_rx.recv().await.unwrap();
        assert_eq!(req.client_id, ConnectionId(4));
        assert!(matches!(req.event, ClientEvent::Disconnected));
    }

    #[tokio::test]
    async fn registry_is_cleaned_even_when_the_lobby_is_gone() {
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::from([(ConnectionId(9), out_tx)])));
        let (lobby_tx, lobby_rx) = mpsc::unbounded_channel();
        drop(lobby_rx);

        assert!(send_event(&lobby_tx, ConnectionId(9), ClientEvent::Connected).is_err());
        assert!(release(ConnectionId(9), &clients, &lobby_tx).await.is_err());

        assert!(clients.read().await.is_empty());
        // Last sender gone, so a writer draining this channel would stop.
        assert!(out_rx.recv().await.is_none());
    }
}
