//! Client execution logic with reconnection support.

use std::time::Duration;

use juku_server::domain::value_object::{RoomId, UserId};

use crate::{
    error::ClientError,
    session::{ClientConfig, run_client_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the study room client with reconnection logic.
///
/// Every session re-sends the join on connect, so a successful reconnect
/// puts the member back into the room without extra bookkeeping.
pub async fn run_client(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    // A malformed identity would never produce a join; the server drops it
    // silently and the client would sit at the prompt forever.
    if let Err(e) = validate_identity(&config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            config.url,
            config.user_id,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&config).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // If the session ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    std::process::exit(1);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

/// Reject identities the server would silently drop at join time
fn validate_identity(config: &ClientConfig) -> Result<(), ClientError> {
    RoomId::new(config.room_id.clone()).map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
    UserId::new(config.user_id.clone()).map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
    Ok(())
}
