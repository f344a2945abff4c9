//! UseCase: ルーム入室処理
//!
//! ## 責務
//!
//! - セッションを配信先としてルームに結び付ける（EventPusher の索引更新）
//! - Room Registry への参加者登録（同一ユーザーの再入室は置き換え = 冪等）
//! - 入室者へ返す既存メンバー一覧（入室者自身を除く）の構築
//! - 既存メンバーへの user_joined 通知のブロードキャスト
//!
//! ## 設計ノート
//!
//! 結び付きの更新を Registry への登録より先に行うことで、登録直後に他の
//! セッションが発するブロードキャストを入室セッションが取りこぼさない。
//! スナップショットと重複して届く可能性のある user_joined は、クライアント側で
//! ユーザー ID により重複排除される。

use std::sync::Arc;

use juku_shared::time::Clock;

use crate::domain::{
    DisplayName, EventPusher, RoomId, RoomMember, RoomRegistry, SessionId, Timestamp, UserId,
};

/// 入室処理の結果
#[derive(Debug)]
pub struct JoinOutcome {
    /// 登録された本人のエントリ
    pub member: RoomMember,
    /// 入室時点でルームにいた他のメンバー（ユーザー ID 順）
    pub peers: Vec<RoomMember>,
}

/// ルーム入室のユースケース
pub struct JoinRoomUseCase {
    /// Registry（在室状態の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
    /// Clock（現在時刻の抽象化、テスト用に注入可能）
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        event_pusher: Arc<dyn EventPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            event_pusher,
            clock,
        }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 入室するセッションの ID
    /// * `room_id` - 入室先のルーム ID
    /// * `user_id` - このセッションが名乗るユーザー ID
    /// * `display_name` - 表示名（未指定はプレースホルダー適用済み）
    /// * `avatar_url` - アバター画像の URL
    ///
    /// # Returns
    ///
    /// 登録された本人のエントリと、入室時点の既存メンバー一覧
    pub async fn execute(
        &self,
        session_id: &SessionId,
        room_id: RoomId,
        user_id: UserId,
        display_name: DisplayName,
        avatar_url: Option<String>,
    ) -> JoinOutcome {
        let joined_at = Timestamp::new(self.clock.now_millis());
        let member = RoomMember::new(user_id, display_name, avatar_url, joined_at);

        // 1. セッションを配信先としてルームに結び付ける
        self.event_pusher
            .enter_room(session_id, room_id.clone())
            .await;

        // 2. Registry へ登録し、登録後のスナップショットを得る
        let snapshot = self.registry.join(room_id, member.clone()).await;

        // 3. 入室者自身を除いた一覧を構築
        let mut peers: Vec<RoomMember> = snapshot
            .into_iter()
            .filter(|m| m.user_id != member.user_id)
            .collect();
        peers.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        JoinOutcome { member, peers }
    }

    /// 入室したことを既存メンバーにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `joiner` - 入室したセッション（配信から除外される）
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn notify_joined(&self, room_id: &RoomId, joiner: &SessionId, message: &str) {
        self.event_pusher
            .broadcast_to_room(room_id, message, Some(joiner.clone()))
            .await;
    }
}
