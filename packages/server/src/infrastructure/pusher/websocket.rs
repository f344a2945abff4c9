//! WebSocket を使った EventPusher 実装
//!
//! ## 責務
//!
//! - セッションごとの `UnboundedSender` と、セッション → ルームの結び付きを管理
//! - セッションへのイベント送信（push_to, broadcast_to_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント送信に使用します。
//!
//! これにより、「WebSocket の生成」と「イベントの配信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成、フレームの書き込み
//! - Infrastructure 層: sender の管理、配信先の選別、イベント送信
//!
//! ブロードキャストはルームへの結び付きで配信先を選ぶため、Registry の
//! 在室状態を参照しません（ユーザー単位の在室と、配信先としてのセッションは
//! 別の索引）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{EventPushError, EventPusher, PusherChannel, RoomId, SessionId};

/// 1 セッション分の配信状態
struct SessionChannel {
    sender: PusherChannel,
    /// 現在結び付いているルーム（未入室なら None）
    room_id: Option<RoomId>,
}

/// WebSocket を使った EventPusher 実装
///
/// ## フィールド
///
/// - `sessions`: 接続中のセッション ID → 送信チャネルと結び付きのマップ
pub struct WebSocketEventPusher {
    sessions: Mutex<HashMap<SessionId, SessionChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            session_id.clone(),
            SessionChannel {
                sender,
                room_id: None,
            },
        );
        tracing::debug!("Session '{}' registered to EventPusher", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
        tracing::debug!("Session '{}' unregistered from EventPusher", session_id);
    }

    async fn enter_room(&self, session_id: &SessionId, room_id: RoomId) {
        let mut sessions = self.sessions.lock().await;
        if let Some(channel) = sessions.get_mut(session_id) {
            tracing::debug!("Session '{}' entered room '{}'", session_id, room_id);
            channel.room_id = Some(room_id);
        } else {
            tracing::warn!(
                "Session '{}' not registered, cannot enter room '{}'",
                session_id,
                room_id
            );
        }
    }

    async fn exit_room(&self, session_id: &SessionId, room_id: &RoomId) {
        let mut sessions = self.sessions.lock().await;
        if let Some(channel) = sessions.get_mut(session_id)
            && channel.room_id.as_ref() == Some(room_id)
        {
            channel.room_id = None;
            tracing::debug!("Session '{}' exited room '{}'", session_id, room_id);
        }
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<(), EventPushError> {
        let sessions = self.sessions.lock().await;

        if let Some(channel) = sessions.get(session_id) {
            channel
                .sender
                .send(content.to_string())
                .map_err(|_| EventPushError::ChannelClosed(session_id.to_string()))?;
            tracing::debug!("Pushed event to session '{}'", session_id);
            Ok(())
        } else {
            Err(EventPushError::SessionNotFound(session_id.to_string()))
        }
    }

    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str, exclude: Option<SessionId>) {
        let sessions = self.sessions.lock().await;

        for (session_id, channel) in sessions.iter() {
            if channel.room_id.as_ref() != Some(room_id) {
                continue;
            }
            if exclude.as_ref() == Some(session_id) {
                continue;
            }
            // 切断済みセッションへの配信失敗は破棄する（at-most-once）
            if let Err(e) = channel.sender.send(content.to_string()) {
                tracing::warn!("Failed to push event to session '{}': {}", session_id, e);
            } else {
                tracing::debug!(
                    "Broadcast event to session '{}' in room '{}'",
                    session_id,
                    room_id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketEventPusher の配信機能
    // - push_to: 特定セッションへの送信とエラーハンドリング
    // - enter_room / exit_room: 配信先の索引の更新
    // - broadcast_to_room: ルーム単位の配信、除外指定、配信失敗の許容
    //
    // 【なぜこのテストが必要か】
    // - EventPusher は UseCase から呼ばれる配信層の中核
    // - 「誰に届き、誰に届かないか」はプロトコルの正しさそのもの
    // - 切断済みセッションが配信全体を失敗させないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功・失敗（未登録セッション、閉じたチャネル）
    // 2. ルームに結び付いたセッションだけへの配信
    // 3. exclude 指定による送信者の除外
    // 4. exit_room / unregister_session 後の配信停止
    // ========================================

    fn room(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    async fn register(
        pusher: &WebSocketEventPusher,
    ) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let session_id = SessionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_session(session_id.clone(), tx).await;
        (session_id, rx)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 登録済みセッションへイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (session_id, mut rx) = register(&pusher).await;

        // when (操作):
        let result = pusher.push_to(&session_id, "hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_session_fails() {
        // テスト項目: 未登録セッションへの送信は SessionNotFound を返す
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let session_id = SessionId::generate();

        // when (操作):
        let result = pusher.push_to(&session_id, "hello").await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            EventPushError::SessionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_push_to_closed_channel_fails() {
        // テスト項目: 受信側が閉じたチャネルへの送信は ChannelClosed を返す
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (session_id, rx) = register(&pusher).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&session_id, "hello").await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            EventPushError::ChannelClosed(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_sessions_in_room() {
        // テスト項目: ブロードキャストがルームに結び付いたセッションだけに届く
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, mut alice_rx) = register(&pusher).await;
        let (bob, mut bob_rx) = register(&pusher).await;
        let (_outsider, mut outsider_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;
        pusher.enter_room(&bob, room("math-101")).await;

        // when (操作):
        pusher.broadcast_to_room(&room("math-101"), "event", None).await;

        // then (期待する結果):
        assert_eq!(alice_rx.recv().await, Some("event".to_string()));
        assert_eq!(bob_rx.recv().await, Some("event".to_string()));
        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_excludes_given_session() {
        // テスト項目: exclude 指定されたセッションには配信されない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, mut alice_rx) = register(&pusher).await;
        let (bob, mut bob_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;
        pusher.enter_room(&bob, room("math-101")).await;

        // when (操作):
        pusher
            .broadcast_to_room(&room("math-101"), "event", Some(alice.clone()))
            .await;

        // then (期待する結果):
        assert!(alice_rx.try_recv().is_err());
        assert_eq!(bob_rx.recv().await, Some("event".to_string()));
    }

    #[tokio::test]
    async fn test_exit_room_stops_delivery() {
        // テスト項目: exit_room 後はそのルームのブロードキャストが届かない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, mut alice_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;
        pusher.exit_room(&alice, &room("math-101")).await;

        // when (操作):
        pusher.broadcast_to_room(&room("math-101"), "event", None).await;

        // then (期待する結果):
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_exit_room_ignores_mismatched_room() {
        // テスト項目: 結び付いていないルームを指定した exit_room は何もしない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, mut alice_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;

        // when (操作):
        pusher.exit_room(&alice, &room("physics-201")).await;
        pusher.broadcast_to_room(&room("math-101"), "event", None).await;

        // then (期待する結果): math-101 への結び付きは維持されている
        assert_eq!(alice_rx.recv().await, Some("event".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_channel() {
        // テスト項目: 一部のチャネルが閉じていても他のセッションへ配信される
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, alice_rx) = register(&pusher).await;
        let (bob, mut bob_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;
        pusher.enter_room(&bob, room("math-101")).await;
        drop(alice_rx);

        // when (操作):
        pusher.broadcast_to_room(&room("math-101"), "event", None).await;

        // then (期待する結果):
        assert_eq!(bob_rx.recv().await, Some("event".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_is_noop() {
        // テスト項目: 誰も結び付いていないルームへのブロードキャストは何もしない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (_alice, mut alice_rx) = register(&pusher).await;

        // when (操作):
        pusher.broadcast_to_room(&room("empty"), "event", None).await;

        // then (期待する結果):
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        // テスト項目: unregister_session 後は push_to もブロードキャストも届かない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (alice, mut alice_rx) = register(&pusher).await;
        pusher.enter_room(&alice, room("math-101")).await;

        // when (操作):
        pusher.unregister_session(&alice).await;
        pusher.broadcast_to_room(&room("math-101"), "event", None).await;
        let push_result = pusher.push_to(&alice, "direct").await;

        // then (期待する結果):
        assert!(alice_rx.try_recv().is_err());
        assert!(matches!(
            push_result.unwrap_err(),
            EventPushError::SessionNotFound(_)
        ));
    }
}
