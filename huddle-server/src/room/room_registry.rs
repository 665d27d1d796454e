use crate::error::CoordinatorError;
use crate::room::{Participant, Room};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use huddle_core::{RoomId, RoomSummary, SessionId};
use tracing::info;

/// All live rooms.
///
/// Every mutation runs under the lock of the room's map shard, and the
/// `on_commit` hooks run before that lock is released. An emptied room is
/// removed inside the same critical section, so no reader ever sees it.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh room that already holds its founder.
    ///
    /// `on_commit` runs before the room becomes visible, under its shard lock.
    /// If it fails the room is never inserted.
    pub fn create_room<R>(
        &self,
        founder: SessionId,
        display_name: String,
        on_commit: impl FnOnce(&Room) -> Result<R, CoordinatorError>,
    ) -> Result<(RoomId, R), CoordinatorError> {
        loop {
            let room_id = RoomId::new();
            if let Entry::Vacant(slot) = self.rooms.entry(room_id) {
                let mut room = Room::new(room_id);
                room.insert(founder, display_name);

                let committed = on_commit(&room)?;
                slot.insert(room);
                info!("Room created: {}", room_id);
                return Ok((room_id, committed));
            }
        }
    }

    /// Snapshot of a room.
    pub fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.get(room_id).map(|room| room.clone())
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Runs `f` against the room while holding its read lock.
    pub fn with_room<R>(&self, room_id: &RoomId, f: impl FnOnce(&Room) -> R) -> Option<R> {
        self.rooms.get(room_id).map(|room| f(&*room))
    }

    /// Adds a member. If `on_commit` fails the member is taken out again before
    /// the room lock is released.
    pub fn add_member<R>(
        &self,
        room_id: &RoomId,
        session_id: SessionId,
        display_name: String,
        on_commit: impl FnOnce(&Room) -> Result<R, CoordinatorError>,
    ) -> Result<R, CoordinatorError> {
        let mut result = Err(CoordinatorError::RoomNotFound(room_id.to_string()));

        self.rooms.remove_if_mut(room_id, |_, room| {
            let replaced = room.insert(session_id, display_name);
            result = on_commit(&*room);

            if result.is_err() {
                room.remove(&session_id);
                if let Some(previous) = replaced {
                    room.restore(previous);
                }
            }
            room.is_empty()
        });

        result
    }

    /// Removes a member, deleting the room if it became empty.
    ///
    /// `on_commit` sees the remaining members and the removed participant.
    /// Returns `None` when the room or the member does not exist.
    pub fn remove_member<R>(
        &self,
        room_id: &RoomId,
        session_id: &SessionId,
        on_commit: impl FnOnce(&Room, &Participant) -> R,
    ) -> Option<R> {
        let mut result = None;

        let deleted = self.rooms.remove_if_mut(room_id, |_, room| {
            let Some(participant) = room.remove(session_id) else {
                return false;
            };
            result = Some(on_commit(&*room, &participant));
            room.is_empty()
        });

        if deleted.is_some() {
            info!("Room {} is empty, deleted", room_id);
        }

        result
    }

    pub fn list_non_empty_rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self.rooms.iter().map(|room| room.summary()).collect();
        rooms.sort_by_key(|summary| summary.created_at);
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
