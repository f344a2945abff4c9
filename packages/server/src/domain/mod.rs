//! Domain layer: value objects, entities and the interfaces the realtime
//! core depends on. Infrastructure implements the interfaces defined here.

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, PhaseKind, PomodoroPhase, RoomBinding, RoomMember, Session};
pub use error::{EventPushError, ValidationError};
pub use pusher::{EventPusher, PusherChannel};
pub use registry::RoomRegistry;
pub use value_object::{DisplayName, MessageContent, RoomId, SessionId, Timestamp, UserId};

#[cfg(test)]
pub use pusher::MockEventPusher;
