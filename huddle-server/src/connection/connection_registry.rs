use crate::error::CoordinatorError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use huddle_core::{RoomId, ServerMessage, SessionId};
use tokio::sync::mpsc;
use tracing::trace;

/// Outbound queue of one session, drained by its transport writer.
pub type Outbound = mpsc::UnboundedSender<ServerMessage>;

struct SessionEntry {
    outbound: Outbound,
    room: Option<RoomId>,
}

/// Live transport sessions and the room each one is bound to.
///
/// Guards returned by the map are never held across calls, so a caller that
/// already holds a room lock may use the registry freely.
#[derive(Default)]
pub struct ConnectionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, outbound: Outbound) -> SessionId {
        loop {
            let session_id = SessionId::new();
            if let Entry::Vacant(slot) = self.sessions.entry(session_id) {
                slot.insert(SessionEntry {
                    outbound,
                    room: None,
                });
                return session_id;
            }
        }
    }

    /// Drops all bookkeeping for the session and hands back the room it was
    /// bound to. Returns `None` if the session was already gone.
    pub fn unregister(&self, session_id: &SessionId) -> Option<Option<RoomId>> {
        self.sessions
            .remove(session_id)
            .map(|(_, entry)| entry.room)
    }

    pub fn is_connected(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn lookup_room(&self, session_id: &SessionId) -> Option<RoomId> {
        self.sessions.get(session_id).and_then(|entry| entry.room)
    }

    pub fn bind_room(&self, session_id: &SessionId, room_id: RoomId) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut entry) => {
                entry.room = Some(room_id);
                true
            }
            None => false,
        }
    }

    pub fn unbind_room(&self, session_id: &SessionId) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.room = None;
        }
    }

    /// Enqueues a message for the session.
    pub fn send(&self, session_id: &SessionId, msg: ServerMessage) -> Result<(), CoordinatorError> {
        let entry = self
            .sessions
            .get(session_id)
            .ok_or(CoordinatorError::TargetUnreachable(*session_id))?;

        entry
            .outbound
            .send(msg)
            .map_err(|_| CoordinatorError::TargetUnreachable(*session_id))
    }

    /// Like [`send`](Self::send), but an unreachable session is only traced.
    pub fn deliver(&self, session_id: &SessionId, msg: ServerMessage) -> bool {
        match self.send(session_id, msg) {
            Ok(()) => true,
            Err(e) => {
                trace!("Dropping message: {}", e);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
