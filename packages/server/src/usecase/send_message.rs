//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::compose() / broadcast_message() メソッド
//! - メッセージ ID とタイムスタンプの組み立て、ルーム全員への配信
//!
//! ### なぜこのテストが必要か
//! - メッセージ ID が「タイムスタンプ-ユーザー ID」形式で決定的に生成されることを確認
//! - 送信者自身も配信対象に含まれることを保証（送信者はこの配信を受けて描画する）
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーが在室するルームへの送信
//! - エッジケース：送信者のみが在室している場合（送信者本人だけに届く）

use std::sync::Arc;

use juku_shared::time::Clock;

use crate::domain::{
    ChatMessage, DisplayName, EventPusher, MessageContent, RoomId, Timestamp, UserId,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
    /// Clock（現在時刻の抽象化、テスト用に注入可能）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(event_pusher: Arc<dyn EventPusher>, clock: Arc<dyn Clock>) -> Self {
        Self { event_pusher, clock }
    }

    /// 受信時刻を確定し、配信用のメッセージを組み立てる
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者のユーザー ID
    /// * `display_name` - 送信者の表示名
    /// * `avatar_url` - 送信者のアバター URL
    /// * `content` - 検証済みのメッセージ本文
    ///
    /// # Returns
    ///
    /// ID とタイムスタンプが確定した ChatMessage
    pub fn compose(
        &self,
        from: UserId,
        display_name: DisplayName,
        avatar_url: Option<String>,
        content: MessageContent,
    ) -> ChatMessage {
        let sent_at = Timestamp::new(self.clock.now_millis());
        ChatMessage::compose(from, display_name, avatar_url, content, sent_at)
    }

    /// メッセージをルームの全メンバーにブロードキャスト
    ///
    /// 送信者も配信対象に含まれる。送信者のクライアントはローカルエコーせず、
    /// この配信を受けて自分のメッセージを描画する。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_message(&self, room_id: &RoomId, message: &str) {
        self.event_pusher
            .broadcast_to_room(room_id, message, None)
            .await;
    }
}
