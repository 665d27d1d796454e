use crate::config::ServerConfig;
use crate::connection::{ConnectionRegistry, Outbound};
use crate::error::CoordinatorError;
use crate::room::RoomRegistry;
use huddle_core::{RoomId, ServerMessage, SessionId};
use std::sync::Arc;
use tracing::{info, warn};

/// Drives session state transitions (connected, joined, disconnected) and keeps
/// the connection bindings and room member sets in step.
///
/// None of these operations await, so a cancelled session task can never leave
/// a transition half applied.
#[derive(Clone)]
pub struct PresenceManager {
    connections: Arc<ConnectionRegistry>,
    rooms: Arc<RoomRegistry>,
    config: Arc<ServerConfig>,
}

impl PresenceManager {
    pub fn new(
        connections: Arc<ConnectionRegistry>,
        rooms: Arc<RoomRegistry>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            connections,
            rooms,
            config,
        }
    }

    pub fn connect(&self, outbound: Outbound) -> SessionId {
        let session_id = self.connections.register(outbound);
        self.connections
            .deliver(&session_id, ServerMessage::Welcome { session_id });

        info!("Session connected: {}", session_id);
        session_id
    }

    pub fn create_room(
        &self,
        session_id: SessionId,
        display_name: &str,
    ) -> Result<RoomId, CoordinatorError> {
        let display_name = self.validate_display_name(display_name)?;
        self.ensure_connected(session_id)?;

        if self.connections.lookup_room(&session_id).is_some() {
            self.remove_from_room(session_id);
        }

        let (room_id, ()) = self
            .rooms
            .create_room(session_id, display_name.clone(), |room| {
                self.bind(session_id, room.id())?;
                self.connections.deliver(
                    &session_id,
                    ServerMessage::RoomCreated {
                        room_id: room.id(),
                        members: room.members(),
                    },
                );
                Ok(())
            })?;

        info!("{} ({}) created room {}", display_name, session_id, room_id);
        Ok(room_id)
    }

    /// Adds the session to an existing room.
    ///
    /// A session already in a different room must leave it first; the request is
    /// rejected before anything changes. The joiner's acknowledgment and the `user-joined` fan-out are both enqueued
    /// before this returns, so they precede anything the joiner sends next.
    pub fn join_room(
        &self,
        session_id: SessionId,
        room_id: &str,
        display_name: &str,
    ) -> Result<RoomId, CoordinatorError> {
        let display_name = self.validate_display_name(display_name)?;
        self.ensure_connected(session_id)?;

        let room_id: RoomId = room_id
            .parse()
            .map_err(|_| CoordinatorError::RoomNotFound(room_id.to_string()))?;

        if !self.rooms.contains(&room_id) {
            return Err(CoordinatorError::RoomNotFound(room_id.to_string()));
        }

        match self.connections.lookup_room(&session_id) {
            Some(current) if current == room_id => {
                self.rooms.with_room(&room_id, |room| {
                    self.connections.deliver(
                        &session_id,
                        ServerMessage::RoomJoined {
                            room_id,
                            members: room.members(),
                        },
                    );
                });
                return Ok(room_id);
            }
            Some(current) => {
                return Err(CoordinatorError::InvalidRequest(format!(
                    "already in room {}",
                    current
                )));
            }
            None => {}
        }

        self.rooms
            .add_member(&room_id, session_id, display_name.clone(), |room| {
                self.bind(session_id, room_id)?;

                let members = room.members();
                self.connections.deliver(
                    &session_id,
                    ServerMessage::RoomJoined {
                        room_id,
                        members: members.clone(),
                    },
                );

                for other in room.others(session_id) {
                    self.connections.deliver(
                        &other,
                        ServerMessage::UserJoined {
                            session_id,
                            display_name: display_name.clone(),
                            members: members.clone(),
                        },
                    );
                }
                Ok(())
            })?;

        info!("{} ({}) joined room {}", display_name, session_id, room_id);
        Ok(room_id)
    }

    /// Explicit leave. The session stays connected and may create or join again.
    pub fn leave_room(&self, session_id: SessionId) -> Option<RoomId> {
        let room_id = self.remove_from_room(session_id)?;
        self.connections
            .deliver(&session_id, ServerMessage::RoomLeft { room_id });
        Some(room_id)
    }

    /// Releases everything the session holds. Safe to call more than once.
    ///
    /// The session is unregistered first, so a create or join still in flight on
    /// another thread either fails to bind or leaves a binding that is cleaned
    /// up here.
    pub fn disconnect(&self, session_id: SessionId) {
        let Some(bound_room) = self.connections.unregister(&session_id) else {
            return;
        };

        if let Some(room_id) = bound_room {
            self.remove_member(room_id, session_id);
        }

        info!("Session disconnected: {}", session_id);
    }

    fn remove_from_room(&self, session_id: SessionId) -> Option<RoomId> {
        let room_id = self.connections.lookup_room(&session_id)?;
        self.remove_member(room_id, session_id);
        Some(room_id)
    }

    fn remove_member(&self, room_id: RoomId, session_id: SessionId) {
        let removed = self.rooms.remove_member(&room_id, &session_id, |room, participant| {
            self.connections.unbind_room(&session_id);

            for other in room.member_ids() {
                self.connections
                    .deliver(&other, ServerMessage::UserLeft { session_id });
            }

            participant.display_name.clone()
        });

        match removed {
            Some(display_name) => {
                info!("{} ({}) left room {}", display_name, session_id, room_id)
            }
            None => {
                warn!(
                    "Session {} was bound to room {} without being a member",
                    session_id, room_id
                );
                self.connections.unbind_room(&session_id);
            }
        }
    }

    /// Binds the session to a room from inside a registry commit hook. Fails if
    /// the session has disconnected meanwhile, which rolls the membership back.
    fn bind(&self, session_id: SessionId, room_id: RoomId) -> Result<(), CoordinatorError> {
        if self.connections.bind_room(&session_id, room_id) {
            Ok(())
        } else {
            Err(CoordinatorError::TargetUnreachable(session_id))
        }
    }

    fn ensure_connected(&self, session_id: SessionId) -> Result<(), CoordinatorError> {
        if self.connections.is_connected(&session_id) {
            Ok(())
        } else {
            Err(CoordinatorError::TargetUnreachable(session_id))
        }
    }

    fn validate_display_name(&self, display_name: &str) -> Result<String, CoordinatorError> {
        let display_name = display_name.trim();

        if display_name.is_empty() {
            return Err(CoordinatorError::InvalidRequest(
                "display name must not be empty".to_string(),
            ));
        }

        if display_name.chars().count() > self.config.max_display_name_len {
            return Err(CoordinatorError::InvalidRequest(format!(
                "display name longer than {} characters",
                self.config.max_display_name_len
            )));
        }

        Ok(display_name.to_string())
    }
}
