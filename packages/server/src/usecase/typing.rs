//! UseCase: タイピング状態の中継
//!
//! ## 責務
//!
//! - typing_start / typing_stop をルームの他メンバーへ中継する
//!
//! ## 設計ノート
//!
//! サーバーはタイピング状態を保持しない。入力中かどうかは揮発性の高い情報で、
//! 切断時に掃除すべき状態を増やさないため、中継のみに徹する。表示の終了判定は
//! 受信側クライアントの責務（最後に受け取ったイベントが勝つ）。

use std::sync::Arc;

use crate::domain::{EventPusher, RoomId, SessionId};

/// タイピング状態中継のユースケース
pub struct TypingIndicatorUseCase {
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl TypingIndicatorUseCase {
    /// 新しい TypingIndicatorUseCase を作成
    pub fn new(event_pusher: Arc<dyn EventPusher>) -> Self {
        Self { event_pusher }
    }

    /// タイピング状態をルームの他メンバーへ中継
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `typist` - 入力中のセッション（配信から除外される）
    /// * `message` - 中継するメッセージ（JSON）
    pub async fn relay(&self, room_id: &RoomId, typist: &SessionId, message: &str) {
        self.event_pusher
            .broadcast_to_room(room_id, message, Some(typist.clone()))
            .await;
    }
}
