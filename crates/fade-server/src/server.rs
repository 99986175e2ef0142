//! HTTP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Upgrades requests on the configured path to WebSockets.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns:
//!   - a per-client task to handle I/O,
//!   - a single central lobby task that owns all game state.
//!
//! The actual per-client logic and lobby loop live in `client`
//! and `lobby_task` modules respectively.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use fade_core::{ConnectionId, Lobby};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, OwnedSemaphorePermit, RwLock, Semaphore};
use tracing::{debug, info, warn};

use crate::client;
use crate::config::Config;
use crate::lobby_task;
use crate::types::{ClientRegistry, LobbyRx, LobbyTx, OutboundRx, OutboundTx};

/// Global-ish counter for assigning unique `ConnectionId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ConnectionId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ConnectionId(id)
}

/// Handles shared by every request handler.
#[derive(Clone)]
struct AppState {
    clients: ClientRegistry,
    lobby_tx: LobbyTx,
    /// One permit per admitted connection, held until its task ends.
    slots: Arc<Semaphore>,
    max_clients: usize,
}

/// Run the server with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, path = %config.ws_path, window = config.fading_window, "listening");

    serve(listener, &config).await
}

/// Serve on an already bound listener.
async fn serve(listener: TcpListener, config: &Config) -> Result<()> {
    // Shared registry of clients → outbound channels.
    let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::new()));

    // Channel from clients → lobby task.
    let (lobby_tx, lobby_rx): (LobbyTx, LobbyRx) = mpsc::unbounded_channel();

    // Spawn the central lobby task.
    {
        let lobby = Lobby::new(config.rules(), config.room_code_len);
        let clients_clone = clients.clone();
        tokio::spawn(async move {
            lobby_task::run_lobby_loop(lobby, lobby_rx, clients_clone).await;
        });
    }

    let state = AppState {
        clients,
        lobby_tx,
        slots: Arc::new(Semaphore::new(config.max_clients)),
        max_clients: config.max_clients,
    };

    axum::serve(listener, router(&config.ws_path, state))
        .await
        .context("server terminated")
}

fn router(ws_path: &str, state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route(ws_path, get(ws_handler))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    // Reserve before answering so concurrent upgrades cannot overshoot.
    let permit = match try_admit(&state.slots) {
        Some(permit) => permit,
        None => {
            warn!(max_clients = state.max_clients, "rejecting connection: server full");
            return (StatusCode::SERVICE_UNAVAILABLE, "server full").into_response();
        }
    };

    let client_id = next_client_id();
    ws.on_upgrade(move |socket| async move {
        let _permit = permit;
        info!(conn = client_id.0, "accepted connection");

        // Create outbound channel for this client and register it.
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();
        {
            let mut guard = state.clients.write().await;
            guard.insert(client_id, out_tx);
        }

        match client::run_client(client_id, socket, state.lobby_tx, out_rx, state.clients).await {
            Ok(()) => debug!(conn = client_id.0, "client task finished"),
            Err(err) => warn!(conn = client_id.0, %err, "client task failed"),
        }
    })
}

fn try_admit(slots: &Arc<Semaphore>) -> Option<OwnedSemaphorePermit> {
    slots.clone().try_acquire_owned().ok()
}
