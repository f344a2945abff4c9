//! Interactive study room client with reconnection support.
//!
//! Connects to a juku server, joins a room and bridges stdin to the room:
//! plain lines become chat messages, slash commands control the shared
//! pomodoro timer. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval) and re-joins the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin juku-client -- --room math-101 --user-id alice --name Alice
//! cargo run --bin juku-client -- -r math-101 -i bob
//! ```

use clap::Parser;

use juku_client::{ClientConfig, run_client};
use juku_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "juku-client")]
#[command(about = "CLI client for the juku study room server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// User ID identifying this member across reconnects
    #[arg(short = 'i', long)]
    user_id: String,

    /// Display name shown to other members
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Avatar URL forwarded to the web frontend
    #[arg(long)]
    avatar: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        room_id: args.room,
        user_id: args.user_id,
        user_name: args.name,
        avatar_url: args.avatar,
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
