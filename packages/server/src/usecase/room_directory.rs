//! UseCase: ルーム一覧・在室状況の照会
//!
//! ## 責務
//!
//! - HTTP API 向けに、在室者のいるルームの一覧とメンバー詳細を提供する
//!
//! ## 設計ノート
//!
//! ルームは暗黙に生成・消滅するため「存在しないルーム」という概念がない。
//! 未知のルーム ID の照会は空のメンバー一覧として扱う。

use std::sync::Arc;

use crate::domain::{RoomId, RoomMember, RoomRegistry};

/// ルーム照会のユースケース
pub struct RoomDirectoryUseCase {
    /// Registry（在室状態の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl RoomDirectoryUseCase {
    /// 新しい RoomDirectoryUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 在室者のいるルームの一覧を取得（ルーム ID 順）
    pub async fn list_rooms(&self) -> Vec<(RoomId, usize)> {
        let mut rooms = self.registry.occupied_rooms().await;
        rooms.sort_by(|a, b| a.0.cmp(&b.0));
        rooms
    }

    /// ルームの在室メンバーを取得（ユーザー ID 順）
    pub async fn members_of(&self, room_id: &RoomId) -> Vec<RoomMember> {
        let mut members = self.registry.members_of(room_id).await;
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        members
    }
}
