//! HTTP API response DTOs.
//!
//! Timestamps here are RFC 3339 strings (UTC) for human consumption, unlike
//! the realtime protocol which uses epoch milliseconds.

use serde::{Deserialize, Serialize};

/// Summary of one occupied room, for `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub member_count: usize,
}

/// One member in a room detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetailDto {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub joined_at: String,
}

/// Response DTO for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub room_id: String,
    pub member_count: usize,
    pub members: Vec<MemberDetailDto>,
}
