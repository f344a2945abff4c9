//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of occupied rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.room_directory_usecase.list_rooms().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|(room_id, member_count)| RoomSummaryDto {
            room_id: room_id.into_string(),
            member_count,
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by ID
///
/// Rooms exist only while occupied, so an unknown id is indistinguishable
/// from an empty room. Both respond with an empty member list.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Json<RoomDetailDto> {
    let members = match RoomId::new(room_id.clone()) {
        Ok(id) => state.room_directory_usecase.members_of(&id).await,
        Err(_) => Vec::new(),
    };

    // Domain Model から DTO への変換
    let room_detail = RoomDetailDto {
        room_id,
        member_count: members.len(),
        members: members.into_iter().map(MemberDetailDto::from).collect(),
    };

    Json(room_detail)
}
