//! UseCase: ポモドーロタイマーの同期
//!
//! ## 責務
//!
//! - フェーズ（集中 / 休憩）の終了時刻をサーバー時刻で確定する
//! - 発行セッションが対象ルームに在室していることの検証
//! - ルーム全メンバー（発行者含む）へのフェーズ通知のブロードキャスト
//!
//! ## 設計ノート
//!
//! サーバーはタイマーの進行状態を保持しない。終了時刻を一度だけ確定して配信し、
//! カウントダウンは各クライアントが自前で行う。クライアントの時計に依存しない
//! 共通の終了時刻を全員が受け取るので、表示は自然に揃う。
//!
//! タイマーの操作権限は「そのルームに在室していること」のみ。開始者を記録して
//! 権限を絞るほどの状態管理は、共同作業ルームの用途では割に合わない。

use std::sync::Arc;

use juku_shared::time::Clock;

use crate::domain::{EventPusher, PhaseKind, PomodoroPhase, RoomId, Timestamp};

use super::error::PomodoroError;

/// ポモドーロタイマー同期のユースケース
pub struct PomodoroSyncUseCase {
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
    /// Clock（現在時刻の抽象化、テスト用に注入可能）
    clock: Arc<dyn Clock>,
}

impl PomodoroSyncUseCase {
    /// 新しい PomodoroSyncUseCase を作成
    pub fn new(event_pusher: Arc<dyn EventPusher>, clock: Arc<dyn Clock>) -> Self {
        Self { event_pusher, clock }
    }

    /// フェーズを開始し、終了時刻を確定する
    ///
    /// # Arguments
    ///
    /// * `bound_room` - 発行セッションが現在在室しているルーム（未入室なら None）
    /// * `room_id` - タイマーを開始する対象ルーム
    /// * `kind` - フェーズの種別（集中 / 休憩）
    /// * `duration_minutes` - フェーズの長さ（分）
    ///
    /// # Returns
    ///
    /// * `Ok(PomodoroPhase)` - 終了時刻が確定したフェーズ
    /// * `Err(PomodoroError::NotInRoom)` - 発行セッションが対象ルームに在室していない
    pub fn start_phase(
        &self,
        bound_room: Option<&RoomId>,
        room_id: &RoomId,
        kind: PhaseKind,
        duration_minutes: u32,
    ) -> Result<PomodoroPhase, PomodoroError> {
        if bound_room != Some(room_id) {
            return Err(PomodoroError::NotInRoom(room_id.as_str().to_string()));
        }

        let now = Timestamp::new(self.clock.now_millis());
        Ok(PomodoroPhase::begin(kind, duration_minutes, now))
    }

    /// フェーズの開始をルームの全メンバーにブロードキャスト
    ///
    /// 発行者自身も配信対象に含まれる。発行者のクライアントもこの配信を受けて
    /// タイマー表示を開始する。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_phase(&self, room_id: &RoomId, message: &str) {
        self.event_pusher
            .broadcast_to_room(room_id, message, None)
            .await;
    }
}
