//! Session lifecycle manager.
//!
//! The [`Lobby`] owns the connection registry, the matchmaking queue and
//! the session store, and turns client events into [`Delivery`]s:
//!
//! - `Connected` / `Disconnected` update the population and broadcast
//!   fresh stats to everyone.
//! - `queue` pairs the two oldest waiting players into an active session.
//! - `createRoom` / `join` form a private session by room code.
//! - `move` runs the rule engine and pushes the full board to both
//!   participants; a terminal result tears the session down.
//!
//! Every call runs to completion before the next one, so the lobby
//! itself needs no locking. Errors never escape: they are either
//! reported to the requesting connection or logged and dropped.

use tracing::{debug, info, warn};

use crate::error::LobbyError;
use crate::messages::{
    display_name,
    CreateRoom,
    Delivery,
    InputMessage,
    JoinRoom,
    MoveRequest,
    OutputMessage,
    QueueRequest,
};
use crate::queue::MatchQueue;
use crate::registry::{AggregateStats, ConnectionId, ConnectionRegistry};
use crate::rules::Rules;
use crate::session::Session;
use crate::session_store::SessionStore;

/// Something that happened on a client connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Connected,
    Message(InputMessage),
    Disconnected,
}

#[derive(Debug, Default)]
pub struct Lobby {
    registry: ConnectionRegistry,
    queue: MatchQueue,
    sessions: SessionStore,
}

impl Lobby {
    /// Empty lobby with the given rules and room code length.
    pub fn new(rules: Rules, room_code_len: usize) -> Self {
        Lobby::with_parts(
            ConnectionRegistry::new(),
            MatchQueue::new(),
            SessionStore::new(rules, room_code_len),
        )
    }

    /// Build a lobby from pre-made parts.
    pub fn with_parts(registry: ConnectionRegistry, queue: MatchQueue, sessions: SessionStore) -> Self {
        Lobby {
            registry,
            queue,
            sessions,
        }
    }

    /// Process a single client event and return the resulting deliveries.
    pub fn process_event(&mut self, id: ConnectionId, event: ClientEvent) -> Vec<Delivery> {
        match event {
            ClientEvent::Connected => self.connect(id),
            ClientEvent::Message(msg) => self.process_message(id, msg),
            ClientEvent::Disconnected => self.disconnect(id),
        }
    }

    pub fn connect(&mut self, id: ConnectionId) -> Vec<Delivery> {
        if !self.registry.register(id) {
            warn!(conn = id.0, "connection registered twice");
            return Vec::new();
        }
        info!(conn = id.0, online = self.registry.online_count(), "client connected");
        self.stats_broadcast()
    }

    /// Forget a connection: leave the queue, abandon its session (telling
    /// the other participant), and broadcast the new population.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Delivery> {
        if !self.registry.unregister(id) {
            debug!(conn = id.0, "disconnect for unknown connection");
            return Vec::new();
        }
        info!(conn = id.0, online = self.registry.online_count(), "client disconnected");

        let mut out = Vec::new();
        if self.queue.dequeue_by_connection(id) {
            debug!(conn = id.0, "removed from queue");
        }
        if let Some(session) = self.sessions.abandon_for(id) {
            info!(room = session.room_code(), phase = ?session.phase(), "session abandoned");
            if let Some(opponent) = session.opponent_of(id) {
                out.extend(self.registry.send_to(opponent.connection, OutputMessage::OpponentLeft));
            }
        }
        out.extend(self.stats_broadcast());
        out
    }

    /// Process a single request from a registered connection.
    pub fn process_message(&mut self, id: ConnectionId, msg: InputMessage) -> Vec<Delivery> {
        if !self.registry.contains(id) {
            warn!(error = %LobbyError::UnknownConnection(id), "dropping message");
            return Vec::new();
        }
        debug!(conn = id.0, ?msg, "request");

        match msg {
            InputMessage::Queue(req) => self.handle_queue(id, req),
            InputMessage::CreateRoom(req) => self.handle_create_room(id, req),
            InputMessage::Join(req) => self.handle_join(id, req),
            InputMessage::GetRooms => self.reply(
                id,
                OutputMessage::AvailableRooms {
                    rooms: self.sessions.available_rooms(),
                },
            ),
            InputMessage::Move(req) => self.handle_move(id, req),
            InputMessage::GetStats => self.reply(id, OutputMessage::Stats(self.stats())),
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn handle_queue(&mut self, id: ConnectionId, req: QueueRequest) -> Vec<Delivery> {
        if let Err(err) = self.ensure_not_seated(id) {
            warn!(%err, "queue request rejected");
            return Vec::new();
        }
        let name = display_name(req.name.as_deref());
        let pair = match self.queue.enqueue(id, name) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%err, "queue request rejected");
                return Vec::new();
            }
        };

        let mut out = self.reply(id, OutputMessage::Queued);
        if let Some((first, second)) = pair {
            let code = self
                .sessions
                .create_paired((first.connection, first.name), (second.connection, second.name));
            info!(room = %code, "queue pair matched");
            if let Some(session) = self.sessions.get(&code) {
                out.extend(self.matched_deliveries(session));
            }
        }
        out.extend(self.stats_broadcast());
        out
    }

    fn handle_create_room(&mut self, id: ConnectionId, req: CreateRoom) -> Vec<Delivery> {
        let created = self
            .ensure_idle(id)
            .and_then(|()| self.sessions.create_private_room(id, display_name(req.name.as_deref())));
        match created {
            Ok(code) => {
                info!(room = %code, conn = id.0, "private room created");
                self.reply(id, OutputMessage::room_created(code))
            }
            Err(err) => {
                warn!(%err, "create room rejected");
                Vec::new()
            }
        }
    }

    fn handle_join(&mut self, id: ConnectionId, req: JoinRoom) -> Vec<Delivery> {
        let code = normalize_room_code(&req.room_code);
        if let Err(err) = self.ensure_not_queued(id) {
            warn!(%err, "join rejected");
            return Vec::new();
        }

        match self.sessions.join_room(id, display_name(req.name.as_deref()), &code) {
            Ok(()) => {
                info!(room = %code, conn = id.0, "private room joined");
                let Some(session) = self.sessions.get(&code) else {
                    return Vec::new();
                };
                // Joiner hears first, then the waiting creator.
                let mut out = self.matched_deliveries(session);
                out.reverse();
                out
            }
            Err(LobbyError::RoomNotFound(code)) => {
                debug!(room = %code, "join for unknown room");
                self.reply(id, OutputMessage::room_not_found(code))
            }
            Err(LobbyError::RoomFull(_)) => self.reply(id, OutputMessage::RoomFull),
            Err(err) => {
                warn!(%err, "join rejected");
                Vec::new()
            }
        }
    }

    fn handle_move(&mut self, id: ConnectionId, req: MoveRequest) -> Vec<Delivery> {
        let code = normalize_room_code(&req.room_code);
        let Some(session) = self.sessions.get_mut(&code) else {
            debug!(room = %code, conn = id.0, "move for unknown room ignored");
            return Vec::new();
        };

        let result = match session.play(id, req.position) {
            Ok(result) => result,
            Err(err) => {
                debug!(room = %code, conn = id.0, %err, "invalid move");
                return self.reply(id, OutputMessage::InvalidMove);
            }
        };
        let Some(session) = self.sessions.get(&code) else {
            return Vec::new();
        };

        let snapshot = OutputMessage::GameState(session.snapshot());
        let mut out = self.to_participants(session, &snapshot);

        if let Some(outcome) = result.outcome {
            out.extend(self.to_participants(session, &OutputMessage::game_over(outcome)));
            info!(room = %code, ?outcome, "game over");
            self.sessions.remove(&code);
        }
        out
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn ensure_not_queued(&self, id: ConnectionId) -> Result<(), LobbyError> {
        if self.queue.contains(id) {
            Err(LobbyError::AlreadyQueued(id))
        } else {
            Ok(())
        }
    }

    fn ensure_not_seated(&self, id: ConnectionId) -> Result<(), LobbyError> {
        match self.sessions.room_of(id) {
            Some(code) => Err(LobbyError::AlreadyInSession(id, code.to_string())),
            None => Ok(()),
        }
    }

    /// Neither waiting in the queue nor sitting in a session.
    fn ensure_idle(&self, id: ConnectionId) -> Result<(), LobbyError> {
        self.ensure_not_queued(id)?;
        self.ensure_not_seated(id)
    }

    fn reply(&self, id: ConnectionId, msg: OutputMessage) -> Vec<Delivery> {
        self.registry.send_to(id, msg).into_iter().collect()
    }

    fn to_participants(&self, session: &Session, msg: &OutputMessage) -> Vec<Delivery> {
        session
            .participants()
            .iter()
            .filter_map(|p| self.registry.send_to(p.connection, msg.clone()))
            .collect()
    }

    /// `matched` for each participant, in seat order.
    fn matched_deliveries(&self, session: &Session) -> Vec<Delivery> {
        session
            .participants()
            .iter()
            .filter_map(|p| {
                let opponent = session.opponent_of(p.connection)?;
                let msg = OutputMessage::matched(session.room_code(), p.mark, opponent.name.clone());
                self.registry.send_to(p.connection, msg)
            })
            .collect()
    }

    fn stats_broadcast(&self) -> Vec<Delivery> {
        self.registry.broadcast_all(&OutputMessage::Stats(self.stats()))
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn stats(&self) -> AggregateStats {
        AggregateStats {
            online: self.registry.online_count(),
            queued: self.queue.len(),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &MatchQueue {
        &self.queue
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Room codes are uppercase; accept whatever case a human typed.
fn normalize_room_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
