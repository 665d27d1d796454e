use crate::model::file::{FileMeta, MediaKind};
use crate::model::member::Member;
use crate::model::room::{RoomId, RoomSummary};
use crate::model::session::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames sent by a client over its session.
///
/// Encoded as `{"event": "<name>", "data": {...}}`. Signaling payloads (`data` of
/// offer/answer/ice-candidate) are opaque and relayed untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    CreateRoom {
        display_name: String,
    },
    /// `room_id` stays a raw string: an id that does not parse simply names no room.
    JoinRoom {
        room_id: String,
        display_name: String,
    },
    LeaveRoom,
    Offer {
        target: SessionId,
        data: Value,
    },
    Answer {
        target: SessionId,
        data: Value,
    },
    IceCandidate {
        target: SessionId,
        data: Value,
    },
    SendMessage {
        text: String,
    },
    SendFile {
        file: FileMeta,
    },
    TypingStart,
    TypingStop,
    ToggleMedia {
        kind: MediaKind,
        state: bool,
    },
    GetRooms,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorReason {
    RoomNotFound,
    InvalidRequest,
}

/// Frames the coordinator delivers to a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    Welcome {
        session_id: SessionId,
    },
    RoomCreated {
        room_id: RoomId,
        members: Vec<Member>,
    },
    RoomJoined {
        room_id: RoomId,
        members: Vec<Member>,
    },
    RoomLeft {
        room_id: RoomId,
    },
    UserJoined {
        session_id: SessionId,
        display_name: String,
        members: Vec<Member>,
    },
    UserLeft {
        session_id: SessionId,
    },
    Offer {
        sender: SessionId,
        data: Value,
    },
    Answer {
        sender: SessionId,
        data: Value,
    },
    IceCandidate {
        sender: SessionId,
        data: Value,
    },
    NewMessage {
        sender: SessionId,
        display_name: String,
        text: String,
        timestamp: u64,
    },
    NewFile {
        sender: SessionId,
        display_name: String,
        file: FileMeta,
        timestamp: u64,
    },
    UserTyping {
        sender: SessionId,
        display_name: String,
    },
    UserStopTyping {
        sender: SessionId,
    },
    UserMediaToggle {
        sender: SessionId,
        kind: MediaKind,
        state: bool,
    },
    RoomsList {
        rooms: Vec<RoomSummary>,
    },
    Error {
        reason: ErrorReason,
    },
}
