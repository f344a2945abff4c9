//! UseCase: ルーム退室処理
//!
//! ## 責務
//!
//! - セッションとルームの結び付きの解除（EventPusher の索引更新）
//! - Room Registry からの参加者削除
//! - 残メンバーへの user_left 通知のブロードキャスト
//!
//! ## 設計ノート
//!
//! 明示的な leave_room イベントと切断時のクリーンアップは同じ処理を通る。
//! `execute` が `None` を返した場合（対象ユーザーが在室していなかった場合）、
//! 呼び出し側は user_left を配信しない。これにより leave 後の切断で通知が
//! 二重に飛ぶことを防ぐ。

use std::sync::Arc;

use crate::domain::{EventPusher, RoomId, RoomMember, RoomRegistry, SessionId, UserId};

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（在室状態の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, event_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// 退室を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 退室するセッションの ID
    /// * `room_id` - 退室元のルーム ID
    /// * `user_id` - 削除対象のユーザー ID
    ///
    /// # Returns
    ///
    /// 削除されたメンバーのエントリ。在室していなかった場合は `None`
    pub async fn execute(
        &self,
        session_id: &SessionId,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Option<RoomMember> {
        // 1. セッションとルームの結び付きを解除する
        self.event_pusher.exit_room(session_id, room_id).await;

        // 2. Registry から削除する
        self.registry.leave(room_id, user_id).await
    }

    /// 退室したことを残メンバーにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `leaver` - 退室したセッション（配信から除外される）
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn notify_left(&self, room_id: &RoomId, leaver: &SessionId, message: &str) {
        self.event_pusher
            .broadcast_to_room(room_id, message, Some(leaver.clone()))
            .await;
    }
}
