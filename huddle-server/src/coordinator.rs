use crate::config::ServerConfig;
use crate::connection::{ConnectionRegistry, Outbound};
use crate::error::CoordinatorError;
use crate::presence::PresenceManager;
use crate::room::{Room, RoomDirectory, RoomRegistry};
use crate::signaling::{BroadcastEvent, RoomBroadcaster, SignalKind, SignalingRelay};
use huddle_core::{ClientMessage, RoomId, RoomSummary, ServerMessage, SessionId};
use std::sync::Arc;
use tracing::{debug, warn};

struct CoordinatorInner {
    config: Arc<ServerConfig>,
    connections: Arc<ConnectionRegistry>,
    rooms: Arc<RoomRegistry>,
    presence: PresenceManager,
    relay: SignalingRelay,
    broadcaster: RoomBroadcaster,
    directory: RoomDirectory,
}

/// Owns the registries and routes every inbound client message to the
/// component that handles it. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

impl Coordinator {
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let connections = Arc::new(ConnectionRegistry::new());
        let rooms = Arc::new(RoomRegistry::new());

        Self {
            inner: Arc::new(CoordinatorInner {
                presence: PresenceManager::new(connections.clone(), rooms.clone(), config.clone()),
                relay: SignalingRelay::new(connections.clone()),
                broadcaster: RoomBroadcaster::new(connections.clone(), rooms.clone()),
                directory: RoomDirectory::new(rooms.clone()),
                config,
                connections,
                rooms,
            }),
        }
    }

    pub fn connect(&self, outbound: Outbound) -> SessionId {
        self.inner.presence.connect(outbound)
    }

    pub fn disconnect(&self, session_id: SessionId) {
        self.inner.presence.disconnect(session_id);
    }

    /// Handles one inbound message. Reportable failures go back to the sender
    /// as an `error` frame; everything else is only logged.
    pub fn handle(&self, session_id: SessionId, msg: ClientMessage) {
        if let Err(e) = self.dispatch(session_id, msg) {
            self.reject(session_id, e);
        }
    }

    pub fn reject(&self, session_id: SessionId, error: CoordinatorError) {
        match error.reason() {
            Some(reason) => {
                warn!("Rejected request from {}: {}", session_id, error);
                self.inner
                    .connections
                    .deliver(&session_id, ServerMessage::Error { reason });
            }
            None => debug!("Request from {} dropped: {}", session_id, error),
        }
    }

    fn dispatch(&self, session_id: SessionId, msg: ClientMessage) -> Result<(), CoordinatorError> {
        let inner = &self.inner;

        match msg {
            ClientMessage::CreateRoom { display_name } => {
                inner.presence.create_room(session_id, &display_name)?;
            }
            ClientMessage::JoinRoom {
                room_id,
                display_name,
            } => {
                inner.presence.join_room(session_id, &room_id, &display_name)?;
            }
            ClientMessage::LeaveRoom => {
                inner.presence.leave_room(session_id);
            }
            ClientMessage::Offer { target, data } => {
                inner.relay.relay(SignalKind::Offer, session_id, target, data);
            }
            ClientMessage::Answer { target, data } => {
                inner.relay.relay(SignalKind::Answer, session_id, target, data);
            }
            ClientMessage::IceCandidate { target, data } => {
                inner
                    .relay
                    .relay(SignalKind::IceCandidate, session_id, target, data);
            }
            ClientMessage::SendMessage { text } => {
                self.validate_text(&text)?;
                inner
                    .broadcaster
                    .broadcast(session_id, BroadcastEvent::ChatMessage { text });
            }
            ClientMessage::SendFile { file } => {
                inner
                    .broadcaster
                    .broadcast(session_id, BroadcastEvent::FileShared { file });
            }
            ClientMessage::TypingStart => {
                inner
                    .broadcaster
                    .broadcast(session_id, BroadcastEvent::TypingStart);
            }
            ClientMessage::TypingStop => {
                inner
                    .broadcaster
                    .broadcast(session_id, BroadcastEvent::TypingStop);
            }
            ClientMessage::ToggleMedia { kind, state } => {
                inner
                    .broadcaster
                    .broadcast(session_id, BroadcastEvent::MediaToggle { kind, state });
            }
            ClientMessage::GetRooms => {
                let rooms = inner.directory.list_non_empty_rooms();
                inner
                    .connections
                    .deliver(&session_id, ServerMessage::RoomsList { rooms });
            }
        }

        Ok(())
    }

    fn validate_text(&self, text: &str) -> Result<(), CoordinatorError> {
        if text.trim().is_empty() {
            return Err(CoordinatorError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let max = self.inner.config.max_message_len;
        if text.chars().count() > max {
            return Err(CoordinatorError::InvalidRequest(format!(
                "message longer than {} characters",
                max
            )));
        }

        Ok(())
    }

    pub fn lookup_room(&self, session_id: &SessionId) -> Option<RoomId> {
        self.inner.connections.lookup_room(session_id)
    }

    pub fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.inner.rooms.get_room(room_id)
    }

    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.inner.directory.list_non_empty_rooms()
    }

    pub fn is_connected(&self, session_id: &SessionId) -> bool {
        self.inner.connections.is_connected(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.inner.connections.len()
    }
}
