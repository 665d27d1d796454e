use crate::connection::ConnectionRegistry;
use crate::room::RoomRegistry;
use huddle_core::{FileMeta, MediaKind, ServerMessage, SessionId, unix_millis};
use std::sync::Arc;
use tracing::trace;

/// Room events fanned out to everyone except the sender.
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastEvent {
    ChatMessage { text: String },
    FileShared { file: FileMeta },
    TypingStart,
    TypingStop,
    MediaToggle { kind: MediaKind, state: bool },
}

impl BroadcastEvent {
    fn into_message(self, sender: SessionId, display_name: &str) -> ServerMessage {
        match self {
            BroadcastEvent::ChatMessage { text } => ServerMessage::NewMessage {
                sender,
                display_name: display_name.to_string(),
                text,
                timestamp: unix_millis(),
            },
            BroadcastEvent::FileShared { file } => ServerMessage::NewFile {
                sender,
                display_name: display_name.to_string(),
                file,
                timestamp: unix_millis(),
            },
            BroadcastEvent::TypingStart => ServerMessage::UserTyping {
                sender,
                display_name: display_name.to_string(),
            },
            BroadcastEvent::TypingStop => ServerMessage::UserStopTyping { sender },
            BroadcastEvent::MediaToggle { kind, state } => {
                ServerMessage::UserMediaToggle {
                    sender,
                    kind,
                    state,
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct RoomBroadcaster {
    connections: Arc<ConnectionRegistry>,
    rooms: Arc<RoomRegistry>,
}

impl RoomBroadcaster {
    pub fn new(connections: Arc<ConnectionRegistry>, rooms: Arc<RoomRegistry>) -> Self {
        Self { connections, rooms }
    }

    /// Sends `event` to the other members of the sender's room and returns how
    /// many of them it reached. A sender outside any room reaches nobody.
    pub fn broadcast(&self, sender: SessionId, event: BroadcastEvent) -> usize {
        let Some(room_id) = self.connections.lookup_room(&sender) else {
            trace!("Ignoring {:?} from {}: not in a room", event, sender);
            return 0;
        };

        self.rooms
            .with_room(&room_id, |room| {
                let Some(participant) = room.participant(&sender) else {
                    return 0;
                };
                let msg = event.into_message(sender, &participant.display_name);

                room.others(sender)
                    .filter(|recipient| self.connections.deliver(recipient, msg.clone()))
                    .count()
            })
            .unwrap_or(0)
    }
}
