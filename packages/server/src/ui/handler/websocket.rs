//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, MessageContent, PhaseKind, RoomId, Session, SessionId, UserId},
    infrastructure::dto::websocket::{ClientEvent, RoomUser, ServerEvent},
    ui::state::AppState,
};
use juku_shared::time::now_utc_millis;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound event flow: events addressed to this session
/// (via rx channel) are written to this session's WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events addressed to this session
/// * `sender` - WebSocket sink to send events to this session
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this session
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = SessionId::generate();

    // Create a channel for this session to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .event_pusher
        .register_session(session_id.clone(), tx)
        .await;
    tracing::info!("Session '{}' connected", session_id);

    let (sender, mut receiver) = socket.split();

    // Spawn a task to receive events addressed to this session and write them out
    let send_task = pusher_loop(rx, sender);

    // The read loop exclusively owns the session binding; cleanup runs after
    // the loop exits, so it always sees the final binding state
    let mut session = Session::new(session_id.clone());

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text: {}", text);

                // Parse the incoming event; an unparsable frame is dropped
                let event = match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!("Failed to parse client event: {}", e);
                        continue;
                    }
                };

                dispatch_event(&state, &mut session, event).await;
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Session '{}' requested close", session_id);
                break;
            }
            _ => {}
        }
    }

    send_task.abort();

    // Disconnecting while bound is an implicit leave of that room
    if let Some(binding) = session.unbind() {
        let removed = state
            .leave_room_usecase
            .execute(&session_id, &binding.room_id, &binding.user_id)
            .await;
        if let Some(member) = removed {
            let left_json = user_left_json(&member.user_id, &member.display_name);
            state
                .leave_room_usecase
                .notify_left(&binding.room_id, &session_id, &left_json)
                .await;
            tracing::info!(
                "Session '{}' left room '{}' on disconnect",
                session_id,
                binding.room_id
            );
        }
    }

    state.event_pusher.unregister_session(&session_id).await;
    tracing::info!("Session '{}' disconnected", session_id);
}

async fn dispatch_event(state: &Arc<AppState>, session: &mut Session, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom {
            room_id,
            user_id,
            user_name,
            user_avatar,
        } => {
            handle_join_room(state, session, room_id, user_id, user_name, user_avatar).await;
        }
        ClientEvent::LeaveRoom { room_id, user_id } => {
            handle_leave_room(state, session, room_id, user_id).await;
        }
        ClientEvent::SendMessage {
            room_id,
            user_id,
            user_name,
            user_avatar,
            content,
        } => {
            handle_send_message(state, room_id, user_id, user_name, user_avatar, content).await;
        }
        ClientEvent::TypingStart {
            room_id,
            user_id,
            user_name,
        } => {
            handle_typing(state, session, room_id, user_id, user_name, true).await;
        }
        ClientEvent::TypingStop { room_id, user_id } => {
            handle_typing(state, session, room_id, user_id, None, false).await;
        }
        ClientEvent::PomodoroStart {
            room_id,
            duration_minutes,
        } => {
            handle_pomodoro(state, session, room_id, PhaseKind::Focus, duration_minutes).await;
        }
        ClientEvent::PomodoroBreak {
            room_id,
            duration_minutes,
        } => {
            handle_pomodoro(state, session, room_id, PhaseKind::Break, duration_minutes).await;
        }
    }
}

async fn handle_join_room(
    state: &Arc<AppState>,
    session: &mut Session,
    room_id: String,
    user_id: String,
    user_name: Option<String>,
    user_avatar: Option<String>,
) {
    // Convert String -> Domain Models
    let (room_id, user_id) = match (RoomId::new(room_id), UserId::new(user_id)) {
        (Ok(room_id), Ok(user_id)) => (room_id, user_id),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Invalid join_room event: {}", e);
            return;
        }
    };

    // A session is bound to at most one room: joining while bound elsewhere
    // (or under another user id) performs an implicit leave first
    if let Some(previous) = session.binding().cloned()
        && (previous.room_id != room_id || previous.user_id != user_id)
    {
        let removed = state
            .leave_room_usecase
            .execute(session.id(), &previous.room_id, &previous.user_id)
            .await;
        if let Some(member) = removed {
            let left_json = user_left_json(&member.user_id, &member.display_name);
            state
                .leave_room_usecase
                .notify_left(&previous.room_id, session.id(), &left_json)
                .await;
        }
    }
    session.bind(room_id.clone(), user_id.clone());

    let display_name = DisplayName::or_placeholder(user_name);
    let outcome = state
        .join_room_usecase
        .execute(
            session.id(),
            room_id.clone(),
            user_id,
            display_name,
            user_avatar,
        )
        .await;

    // Broadcast user_joined to the members already in the room
    let joined_event = ServerEvent::UserJoined {
        user_id: outcome.member.user_id.as_str().to_string(),
        user_name: outcome.member.display_name.as_str().to_string(),
        user_avatar: outcome.member.avatar_url.clone(),
        timestamp: outcome.member.joined_at.value(),
    };
    let joined_json = serde_json::to_string(&joined_event).unwrap();
    state
        .join_room_usecase
        .notify_joined(&room_id, session.id(), &joined_json)
        .await;

    // Send the current member list (the joiner excluded) to the joiner
    let users: Vec<RoomUser> = outcome.peers.into_iter().map(RoomUser::from).collect();
    let users_json = serde_json::to_string(&ServerEvent::RoomUsers { users }).unwrap();
    if let Err(e) = state.event_pusher.push_to(session.id(), &users_json).await {
        tracing::warn!("Failed to send room_users to '{}': {}", session.id(), e);
    }

    tracing::info!(
        "Session '{}' joined room '{}' as '{}'",
        session.id(),
        room_id,
        outcome.member.user_id
    );
}

async fn handle_leave_room(
    state: &Arc<AppState>,
    session: &mut Session,
    room_id: String,
    user_id: String,
) {
    let (room_id, user_id) = match (RoomId::new(room_id), UserId::new(user_id)) {
        (Ok(room_id), Ok(user_id)) => (room_id, user_id),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Invalid leave_room event: {}", e);
            return;
        }
    };

    if session.is_bound_to(&room_id) {
        session.unbind();
    }

    let removed = state
        .leave_room_usecase
        .execute(session.id(), &room_id, &user_id)
        .await;

    // user_left is broadcast only when the user was actually removed, so a
    // leave followed by a disconnect notifies the room once
    if let Some(member) = removed {
        let left_json = user_left_json(&member.user_id, &member.display_name);
        state
            .leave_room_usecase
            .notify_left(&room_id, session.id(), &left_json)
            .await;
        tracing::info!("Session '{}' left room '{}'", session.id(), room_id);
    }
}

async fn handle_send_message(
    state: &Arc<AppState>,
    room_id: String,
    user_id: String,
    user_name: Option<String>,
    user_avatar: Option<String>,
    content: String,
) {
    let (room_id, user_id) = match (RoomId::new(room_id), UserId::new(user_id)) {
        (Ok(room_id), Ok(user_id)) => (room_id, user_id),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Invalid send_message event: {}", e);
            return;
        }
    };

    let content_len = content.chars().count();
    let content = match MessageContent::new(content) {
        Ok(content) => content,
        Err(_) => {
            tracing::warn!("Invalid message content (length: {})", content_len);
            return;
        }
    };

    let display_name = DisplayName::or_placeholder(user_name);
    let message = state
        .send_message_usecase
        .compose(user_id, display_name, user_avatar, content);

    tracing::info!(
        "Broadcasting message '{}' from '{}' to room '{}'",
        message.id,
        message.from,
        room_id
    );

    let message_json = serde_json::to_string(&ServerEvent::from(message)).unwrap();
    state
        .send_message_usecase
        .broadcast_message(&room_id, &message_json)
        .await;
}

async fn handle_typing(
    state: &Arc<AppState>,
    session: &Session,
    room_id: String,
    user_id: String,
    user_name: Option<String>,
    is_typing: bool,
) {
    let (room_id, user_id) = match (RoomId::new(room_id), UserId::new(user_id)) {
        (Ok(room_id), Ok(user_id)) => (room_id, user_id),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Invalid typing event: {}", e);
            return;
        }
    };

    let typing_event = ServerEvent::UserTyping {
        user_id: user_id.into_string(),
        user_name,
        is_typing,
    };
    let typing_json = serde_json::to_string(&typing_event).unwrap();
    state
        .typing_usecase
        .relay(&room_id, session.id(), &typing_json)
        .await;
}

async fn handle_pomodoro(
    state: &Arc<AppState>,
    session: &Session,
    room_id: String,
    kind: PhaseKind,
    duration_minutes: u32,
) {
    let room_id = match RoomId::new(room_id) {
        Ok(room_id) => room_id,
        Err(e) => {
            tracing::warn!("Invalid pomodoro event: {}", e);
            return;
        }
    };

    // Timer control is limited to sessions bound to the target room
    let bound_room = session.binding().map(|b| &b.room_id);
    let phase = match state
        .pomodoro_usecase
        .start_phase(bound_room, &room_id, kind, duration_minutes)
    {
        Ok(phase) => phase,
        Err(e) => {
            tracing::debug!("Rejected pomodoro control: {}", e);
            return;
        }
    };

    let phase_json = serde_json::to_string(&ServerEvent::from(phase)).unwrap();
    state
        .pomodoro_usecase
        .broadcast_phase(&room_id, &phase_json)
        .await;
}

/// Serialize a user_left event stamped with the current server time.
fn user_left_json(user_id: &UserId, display_name: &DisplayName) -> String {
    let event = ServerEvent::UserLeft {
        user_id: user_id.as_str().to_string(),
        user_name: display_name.as_str().to_string(),
        timestamp: now_utc_millis(),
    };
    serde_json::to_string(&event).unwrap()
}
