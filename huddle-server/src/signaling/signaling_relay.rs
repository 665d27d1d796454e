use crate::connection::ConnectionRegistry;
use huddle_core::{ServerMessage, SessionId};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

/// Point-to-point forwarding of handshake messages between two sessions.
#[derive(Clone)]
pub struct SignalingRelay {
    connections: Arc<ConnectionRegistry>,
}

impl SignalingRelay {
    pub fn new(connections: Arc<ConnectionRegistry>) -> Self {
        Self { connections }
    }

    /// Forwards `payload` to `target`, tagged with the sender.
    ///
    /// A target that is gone is not an error: peers leave mid-handshake all the
    /// time, so the message is dropped and `false` returned.
    pub fn relay(
        &self,
        kind: SignalKind,
        sender: SessionId,
        target: SessionId,
        payload: Value,
    ) -> bool {
        let msg = match kind {
            SignalKind::Offer => ServerMessage::Offer {
                sender,
                data: payload,
            },
            SignalKind::Answer => ServerMessage::Answer {
                sender,
                data: payload,
            },
            SignalKind::IceCandidate => ServerMessage::IceCandidate {
                sender,
                data: payload,
            },
        };

        match self.connections.send(&target, msg) {
            Ok(()) => {
                debug!("Relayed {:?} {} -> {}", kind, sender, target);
                true
            }
            Err(e) => {
                debug!("Dropped {:?} from {}: {}", kind, sender, e);
                false
            }
        }
    }
}
