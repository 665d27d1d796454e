use huddle_core::{Member, RoomId, RoomSummary, SessionId, unix_millis};
use std::collections::HashMap;

/// A session bound to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub session_id: SessionId,
    pub display_name: String,
    pub room_id: RoomId,
    join_seq: u64,
}

impl Participant {
    pub fn to_member(&self) -> Member {
        Member {
            session_id: self.session_id,
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    members: HashMap<SessionId, Participant>,
    created_at: u64,
    next_seq: u64,
}

impl Room {
    pub(crate) fn new(id: RoomId) -> Self {
        Self {
            id,
            members: HashMap::new(),
            created_at: unix_millis(),
            next_seq: 0,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.members.contains_key(session_id)
    }

    pub fn participant(&self, session_id: &SessionId) -> Option<&Participant> {
        self.members.get(session_id)
    }

    pub fn member_ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.members.keys().copied()
    }

    /// Every member except `session_id`.
    pub fn others(&self, session_id: SessionId) -> impl Iterator<Item = SessionId> + '_ {
        self.member_ids().filter(move |id| *id != session_id)
    }

    /// Members in the order they joined.
    pub fn members(&self) -> Vec<Member> {
        let mut participants: Vec<&Participant> = self.members.values().collect();
        participants.sort_by_key(|p| p.join_seq);
        participants.into_iter().map(Participant::to_member).collect()
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.id,
            member_count: self.members.len(),
            created_at: self.created_at,
        }
    }

    /// Returns the participant previously stored under `session_id`, if any.
    pub(crate) fn insert(&mut self, session_id: SessionId, display_name: String) -> Option<Participant> {
        let participant = Participant {
            session_id,
            display_name,
            room_id: self.id,
            join_seq: self.next_seq,
        };
        self.next_seq += 1;
        self.members.insert(session_id, participant)
    }

    pub(crate) fn restore(&mut self, participant: Participant) {
        self.members.insert(participant.session_id, participant);
    }

    pub(crate) fn remove(&mut self, session_id: &SessionId) -> Option<Participant> {
        self.members.remove(session_id)
    }
}
