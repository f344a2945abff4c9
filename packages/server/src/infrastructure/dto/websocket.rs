//! WebSocket event DTOs.
//!
//! Events are JSON text frames with an internally tagged envelope: the
//! `type` field selects the event (snake_case), payload fields are
//! camelCase to match the web frontend. A frame that fails to parse is
//! dropped by the handler, never echoed back.

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        user_id: String,
        #[serde(default)]
        user_name: Option<String>,
        #[serde(default)]
        user_avatar: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: String,
        user_id: String,
        #[serde(default)]
        user_name: Option<String>,
        #[serde(default)]
        user_avatar: Option<String>,
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    TypingStart {
        room_id: String,
        user_id: String,
        #[serde(default)]
        user_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TypingStop { room_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    PomodoroStart {
        room_id: String,
        duration_minutes: u32,
    },
    #[serde(rename_all = "camelCase")]
    PomodoroBreak {
        room_id: String,
        duration_minutes: u32,
    },
}

/// A room member as rendered on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUser {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Unix timestamp in milliseconds (UTC)
    pub joined_at: i64,
}

/// Pomodoro phase as rendered on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroStatus {
    Active,
    Break,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Sent only to a joiner: the members already present in the room
    RoomUsers { users: Vec<RoomUser> },
    #[serde(rename_all = "camelCase")]
    UserJoined {
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_avatar: Option<String>,
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        user_id: String,
        user_name: String,
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    NewMessage {
        id: String,
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_avatar: Option<String>,
        content: String,
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    UserTyping {
        user_id: String,
        /// Present on typing_start, absent on typing_stop
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
        is_typing: bool,
    },
    #[serde(rename_all = "camelCase")]
    PomodoroUpdate {
        status: PomodoroStatus,
        /// Absolute end of the phase, Unix milliseconds (UTC)
        end_time: i64,
    },
}
