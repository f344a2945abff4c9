//! Entities of the study-room domain.

use super::value_object::{DisplayName, MessageContent, RoomId, SessionId, Timestamp, UserId};

/// One user's presence in one room.
///
/// Exclusively owned by the Room Registry; within a room, user ids are
/// unique and re-joining replaces the existing entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMember {
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub avatar_url: Option<String>,
    pub joined_at: Timestamp,
}

impl RoomMember {
    pub fn new(
        user_id: UserId,
        display_name: DisplayName,
        avatar_url: Option<String>,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            display_name,
            avatar_url,
            joined_at,
        }
    }
}

/// An ephemeral chat payload. Never persisted by this server; the id is a
/// client-side rendering key, not a globally coordinated identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub from: UserId,
    pub display_name: DisplayName,
    pub avatar_url: Option<String>,
    pub content: MessageContent,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn compose(
        from: UserId,
        display_name: DisplayName,
        avatar_url: Option<String>,
        content: MessageContent,
        sent_at: Timestamp,
    ) -> Self {
        let id = format!("{}-{}", sent_at.value(), from.as_str());
        Self {
            id,
            from,
            display_name,
            avatar_url,
            content,
            sent_at,
        }
    }
}

/// Phase kind of the shared pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Focus,
    Break,
}

/// A room-wide countdown phase. Broadcast-only: the server keeps no copy,
/// and every new phase supersedes the previous one in each client's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroPhase {
    pub kind: PhaseKind,
    pub ends_at: Timestamp,
}

impl PomodoroPhase {
    /// Start a phase of the given length. The end time is always computed
    /// server-side so a client cannot desynchronize the room.
    pub fn begin(kind: PhaseKind, duration_minutes: u32, now: Timestamp) -> Self {
        Self {
            kind,
            ends_at: now.plus_minutes(duration_minutes),
        }
    }
}

/// Binding of a session to a room under a claimed user id
#[derive(Debug, Clone, PartialEq)]
pub struct RoomBinding {
    pub room_id: RoomId,
    pub user_id: UserId,
}

/// One live client connection.
///
/// State machine: Unbound until the client joins, Bound(room, user) after,
/// back to Unbound on leave or disconnect. There is no third state, and a
/// session is bound to at most one room at a time.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    binding: Option<RoomBinding>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self { id, binding: None }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn binding(&self) -> Option<&RoomBinding> {
        self.binding.as_ref()
    }

    /// Bind to a room, returning the previous binding if there was one
    /// (the caller performs the implicit leave of that room).
    pub fn bind(&mut self, room_id: RoomId, user_id: UserId) -> Option<RoomBinding> {
        self.binding.replace(RoomBinding { room_id, user_id })
    }

    /// Clear the binding, returning it if there was one
    pub fn unbind(&mut self) -> Option<RoomBinding> {
        self.binding.take()
    }

    pub fn is_bound_to(&self, room_id: &RoomId) -> bool {
        self.binding.as_ref().is_some_and(|b| &b.room_id == room_id)
    }
}
