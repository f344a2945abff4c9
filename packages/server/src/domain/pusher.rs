//! Event Pusher trait 定義
//!
//! セッションへのイベント配信のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;

use super::{EventPushError, RoomId, SessionId};

/// Channel used to push serialized events to a session's writer task
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Event Pusher trait
///
/// セッションごとの送信チャネルと、セッション → ルームの結び付き（配信先の索引）を
/// 管理する。ブロードキャストは fire-and-forget（at-most-once）で、切断済み
/// セッションへの配信は黙って破棄される。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// セッションの送信チャネルを登録
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信チャネルを削除
    async fn unregister_session(&self, session_id: &SessionId);

    /// セッションを配信先としてルームに結び付ける（既存の結び付きは置き換え）
    async fn enter_room(&self, session_id: &SessionId, room_id: RoomId);

    /// ルームとの結び付きを解除する（指定したルームに結び付いていなければ何もしない）
    async fn exit_room(&self, session_id: &SessionId, room_id: &RoomId);

    /// 単一セッションへイベントを送信
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), EventPushError>;

    /// ルームに結び付いた全セッションへイベントを配信（exclude は除外）
    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str, exclude: Option<SessionId>);
}
