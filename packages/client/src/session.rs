//! WebSocket client session management.
//!
//! One session covers a single connection: join the room, render incoming
//! events, and bridge prompt input to client events until the user exits
//! or the connection drops.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use juku_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use juku_shared::time::now_utc_millis;

use crate::{
    command::{HELP_TEXT, InputCommand},
    error::ClientError,
    formatter::MessageFormatter,
    ui::{prompt_for, redisplay_prompt},
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Connection settings for one client session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the study room server
    pub url: String,
    /// Room to join on connect
    pub room_id: String,
    /// Stable user identifier claimed by this client
    pub user_id: String,
    /// Display name shown to other members
    pub user_name: Option<String>,
    /// Avatar URL forwarded to the web frontend
    pub avatar_url: Option<String>,
}

/// Run one WebSocket client session
pub async fn run_client_session(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = match connect_async(&config.url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(Box::new(ClientError::ConnectionError(e.to_string())));
        }
    };

    tracing::info!("Connected to study room server!");

    let (mut write, mut read) = ws_stream.split();

    // Join before anything else so the first frame coming back is the
    // current member list. This runs again on every reconnection; the
    // server treats a repeated join as a roster refresh.
    let join = ClientEvent::JoinRoom {
        room_id: config.room_id.clone(),
        user_id: config.user_id.clone(),
        user_name: config.user_name.clone(),
        user_avatar: config.avatar_url.clone(),
    };
    let join_json = serde_json::to_string(&join)?;
    if let Err(e) = write.send(Message::Text(join_json.into())).await {
        return Err(Box::new(ClientError::ConnectionError(e.to_string())));
    }

    println!(
        "\nYou are '{}' in room '{}'. Type a message and press Enter to send, /help for commands. Press Ctrl+C to exit.\n",
        config.user_id, config.room_id
    );

    // Clones for the read task
    let room_for_read = config.room_id.clone();
    let user_for_read = config.user_id.clone();

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => {
                        if let Some(formatted) = render_event(&event, now_utc_millis()) {
                            print!("{}", formatted);
                            redisplay_prompt(&room_for_read, &user_for_read);
                        }
                    }
                    Err(_) => {
                        let formatted = MessageFormatter::format_raw_message(&text);
                        print!("{}", formatted);
                        redisplay_prompt(&room_for_read, &user_for_read);
                    }
                },
                Ok(Message::Binary(data)) => {
                    let formatted = MessageFormatter::format_binary_message(data.len());
                    print!("{}", formatted);
                    redisplay_prompt(&room_for_read, &user_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    let prompt = prompt_for(&config.room_id, &config.user_id);

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Clones for the write task
    let room_id = config.room_id.clone();
    let user_id = config.user_id.clone();
    let user_name = config.user_name.clone();
    let user_avatar = config.avatar_url.clone();

    // Spawn a task to turn input lines into client events
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        'input: while let Some(line) = input_rx.recv().await {
            let command = match InputCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    print!("\n{}\n", e);
                    redisplay_prompt(&room_id, &user_id);
                    continue;
                }
            };

            match command {
                InputCommand::Chat(content) => {
                    // Input is line-buffered, so the typing indicator is
                    // sent around the finished line rather than per
                    // keystroke.
                    let events = [
                        ClientEvent::TypingStart {
                            room_id: room_id.clone(),
                            user_id: user_id.clone(),
                            user_name: user_name.clone(),
                        },
                        ClientEvent::SendMessage {
                            room_id: room_id.clone(),
                            user_id: user_id.clone(),
                            user_name: user_name.clone(),
                            user_avatar: user_avatar.clone(),
                            content,
                        },
                        ClientEvent::TypingStop {
                            room_id: room_id.clone(),
                            user_id: user_id.clone(),
                        },
                    ];
                    for event in &events {
                        if let Err(e) = send_event(&mut write, event).await {
                            tracing::warn!("Failed to send message: {}", e);
                            write_error = true;
                            break 'input;
                        }
                    }
                }
                InputCommand::Focus(minutes) => {
                    let event = ClientEvent::PomodoroStart {
                        room_id: room_id.clone(),
                        duration_minutes: minutes,
                    };
                    if let Err(e) = send_event(&mut write, &event).await {
                        tracing::warn!("Failed to send pomodoro control: {}", e);
                        write_error = true;
                        break;
                    }
                }
                InputCommand::Break(minutes) => {
                    let event = ClientEvent::PomodoroBreak {
                        room_id: room_id.clone(),
                        duration_minutes: minutes,
                    };
                    if let Err(e) = send_event(&mut write, &event).await {
                        tracing::warn!("Failed to send pomodoro control: {}", e);
                        write_error = true;
                        break;
                    }
                }
                InputCommand::Leave => {
                    let event = ClientEvent::LeaveRoom {
                        room_id: room_id.clone(),
                        user_id: user_id.clone(),
                    };
                    if let Err(e) = send_event(&mut write, &event).await {
                        tracing::warn!("Failed to send leave notice: {}", e);
                        write_error = true;
                    }
                    println!("\nLeft room '{}'.", room_id);
                    break;
                }
                InputCommand::Quit => break,
                InputCommand::Help => {
                    print!("\n{}\n\n", HELP_TEXT);
                    redisplay_prompt(&room_id, &user_id);
                }
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

/// Serialize and send one client event.
///
/// Serialization failures are logged and skipped; transport failures are
/// returned to the caller.
async fn send_event(write: &mut WsSink, event: &ClientEvent) -> Result<(), WsError> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            return Ok(());
        }
    };
    write.send(Message::Text(json.into())).await
}

/// Map a server event to its display form.
///
/// Returns `None` for events that produce no output (typing stop).
fn render_event(event: &ServerEvent, now_millis: i64) -> Option<String> {
    match event {
        ServerEvent::RoomUsers { users } => Some(MessageFormatter::format_room_users(users)),
        ServerEvent::UserJoined {
            user_name,
            timestamp,
            ..
        } => Some(MessageFormatter::format_user_joined(user_name, *timestamp)),
        ServerEvent::UserLeft {
            user_name,
            timestamp,
            ..
        } => Some(MessageFormatter::format_user_left(user_name, *timestamp)),
        ServerEvent::NewMessage {
            user_name,
            content,
            timestamp,
            ..
        } => Some(MessageFormatter::format_chat_message(
            user_name, content, *timestamp,
        )),
        ServerEvent::UserTyping {
            user_id,
            user_name,
            is_typing,
        } => is_typing.then(|| {
            MessageFormatter::format_typing_started(user_name.as_deref().unwrap_or(user_id))
        }),
        ServerEvent::PomodoroUpdate { status, end_time } => Some(
            MessageFormatter::format_pomodoro_update(*status, *end_time, now_millis),
        ),
    }
}
