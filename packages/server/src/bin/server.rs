//! Realtime study room server.
//!
//! Coordinates room presence, chat, typing indicators, and shared pomodoro
//! timers over WebSocket, with a read-only HTTP API for room listings.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin juku-server
//! cargo run --bin juku-server -- --host 0.0.0.0 --port 3001
//! ```

use std::sync::Arc;

use clap::Parser;
use juku_server::{
    infrastructure::{pusher::WebSocketEventPusher, registry::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        JoinRoomUseCase, LeaveRoomUseCase, PomodoroSyncUseCase, RoomDirectoryUseCase,
        SendMessageUseCase, TypingIndicatorUseCase,
    },
};
use juku_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "juku-server")]
#[command(about = "Realtime study room coordination server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3001")]
    port: u16,

    /// Origin allowed to call the HTTP API
    #[arg(long, default_value = "http://localhost:3000")]
    allow_origin: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. EventPusher
    // 3. Clock
    // 4. UseCases
    // 5. Server

    // 1. Create Registry (in-memory room membership)
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create EventPusher (WebSocket implementation)
    let event_pusher = Arc::new(WebSocketEventPusher::new());

    // 3. Create Clock (system time)
    let clock = Arc::new(SystemClock);

    // 4. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        event_pusher.clone(),
        clock.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        event_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        event_pusher.clone(),
        clock.clone(),
    ));
    let typing_usecase = Arc::new(TypingIndicatorUseCase::new(event_pusher.clone()));
    let pomodoro_usecase = Arc::new(PomodoroSyncUseCase::new(
        event_pusher.clone(),
        clock.clone(),
    ));
    let room_directory_usecase = Arc::new(RoomDirectoryUseCase::new(registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
        event_pusher,
        join_room_usecase,
        leave_room_usecase,
        send_message_usecase,
        typing_usecase,
        pomodoro_usecase,
        room_directory_usecase,
    );
    if let Err(e) = server.run(args.host, args.port, args.allow_origin).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
