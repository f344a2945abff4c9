//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::EventPusher;
use crate::usecase::{
    JoinRoomUseCase, LeaveRoomUseCase, PomodoroSyncUseCase, RoomDirectoryUseCase,
    SendMessageUseCase, TypingIndicatorUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime study room server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     event_pusher,
///     join_room_usecase,
///     leave_room_usecase,
///     send_message_usecase,
///     typing_usecase,
///     pomodoro_usecase,
///     room_directory_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3001, "http://localhost:3000".to_string()).await?;
/// ```
pub struct Server {
    /// EventPusher（イベント配信の抽象化）
    event_pusher: Arc<dyn EventPusher>,
    /// JoinRoomUseCase（ルーム入室のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退室のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// TypingIndicatorUseCase（タイピング状態中継のユースケース）
    typing_usecase: Arc<TypingIndicatorUseCase>,
    /// PomodoroSyncUseCase（ポモドーロ同期のユースケース）
    pomodoro_usecase: Arc<PomodoroSyncUseCase>,
    /// RoomDirectoryUseCase（ルーム照会のユースケース）
    room_directory_usecase: Arc<RoomDirectoryUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `event_pusher` - Pusher shared with the WebSocket handler
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `leave_room_usecase` - UseCase for leaving a room
    /// * `send_message_usecase` - UseCase for message sending
    /// * `typing_usecase` - UseCase for typing indicator relay
    /// * `pomodoro_usecase` - UseCase for pomodoro phase sync
    /// * `room_directory_usecase` - UseCase for the room listing API
    pub fn new(
        event_pusher: Arc<dyn EventPusher>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        typing_usecase: Arc<TypingIndicatorUseCase>,
        pomodoro_usecase: Arc<PomodoroSyncUseCase>,
        room_directory_usecase: Arc<RoomDirectoryUseCase>,
    ) -> Self {
        Self {
            event_pusher,
            join_room_usecase,
            leave_room_usecase,
            send_message_usecase,
            typing_usecase,
            pomodoro_usecase,
            room_directory_usecase,
        }
    }

    /// Build the router with every endpoint wired to the shared state.
    ///
    /// Split out of `run` so integration tests can serve the router on an
    /// ephemeral port without the signal handler.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            event_pusher: self.event_pusher,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            send_message_usecase: self.send_message_usecase,
            typing_usecase: self.typing_usecase,
            pomodoro_usecase: self.pomodoro_usecase,
            room_directory_usecase: self.room_directory_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .with_state(app_state)
    }

    /// Run the realtime study room server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    /// * `allow_origin` - The origin allowed to call the HTTP API (e.g., "http://localhost:3000")
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not a valid header value, if the
    /// server fails to bind to the specified address, or if there's an error
    /// during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        allow_origin: String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(allow_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET]);

        let app = self
            .into_router()
            .layer(TraceLayer::new_for_http())
            .layer(cors);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Study room server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Allowed CORS origin: {}", allow_origin);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
