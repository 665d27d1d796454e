use crate::room::RoomRegistry;
use huddle_core::RoomSummary;
use std::sync::Arc;

/// Read-only discovery view over the room registry.
#[derive(Clone)]
pub struct RoomDirectory {
    rooms: Arc<RoomRegistry>,
}

impl RoomDirectory {
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Rooms with at least one member.
    pub fn list_non_empty_rooms(&self) -> Vec<RoomSummary> {
        self.rooms.list_non_empty_rooms()
    }
}
