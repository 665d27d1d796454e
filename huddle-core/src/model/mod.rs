mod file;
mod member;
mod room;
mod session;
mod signaling;
mod time;

pub use file::{FileMeta, MediaKind};
pub use member::Member;
pub use room::{RoomId, RoomSummary};
pub use session::SessionId;
pub use signaling::{ClientMessage, ErrorReason, ServerMessage};
pub use time::unix_millis;
