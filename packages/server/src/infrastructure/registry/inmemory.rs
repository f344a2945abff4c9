//! インメモリの Room Registry 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, RoomMember, RoomRegistry, UserId};

/// プロセス内の HashMap による Room Registry 実装
///
/// ## フィールド
///
/// - `rooms`: ルーム ID → (ユーザー ID → メンバーエントリ) の二段マップ
///
/// 全操作が単一の Mutex 越しに行われるため、ブロードキャスト対象の算出に使う
/// 読み取りが適用途中の join/leave を観測することはない。
///
/// ルームのエントリは最初の入室で生成され、最後の退室で破棄される
/// （遅延プルーニング）。空のルームがマップに残り続けることはない。
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomId, HashMap<UserId, RoomMember>>>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_id: RoomId, member: RoomMember) -> Vec<RoomMember> {
        let mut rooms = self.rooms.lock().await;
        let members = rooms.entry(room_id).or_default();
        // 同一ユーザー ID のエントリは置き換え（再入室は冪等）
        members.insert(member.user_id.clone(), member);
        members.values().cloned().collect()
    }

    async fn leave(&self, room_id: &RoomId, user_id: &UserId) -> Option<RoomMember> {
        let mut rooms = self.rooms.lock().await;
        let members = rooms.get_mut(room_id)?;
        let removed = members.remove(user_id);
        if members.is_empty() {
            rooms.remove(room_id);
        }
        removed
    }

    async fn members_of(&self, room_id: &RoomId) -> Vec<RoomMember> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn occupied_rooms(&self) -> Vec<(RoomId, usize)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(room_id, members)| (room_id.clone(), members.len()))
            .collect()
    }
}
