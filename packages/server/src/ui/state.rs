//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::EventPusher;
use crate::usecase::{
    JoinRoomUseCase, LeaveRoomUseCase, PomodoroSyncUseCase, RoomDirectoryUseCase,
    SendMessageUseCase, TypingIndicatorUseCase,
};

/// Shared application state
pub struct AppState {
    /// EventPusher（イベント配信の抽象化）
    pub event_pusher: Arc<dyn EventPusher>,
    /// JoinRoomUseCase（ルーム入室のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退室のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// TypingIndicatorUseCase（タイピング状態中継のユースケース）
    pub typing_usecase: Arc<TypingIndicatorUseCase>,
    /// PomodoroSyncUseCase（ポモドーロ同期のユースケース）
    pub pomodoro_usecase: Arc<PomodoroSyncUseCase>,
    /// RoomDirectoryUseCase（ルーム照会のユースケース）
    pub room_directory_usecase: Arc<RoomDirectoryUseCase>,
}
