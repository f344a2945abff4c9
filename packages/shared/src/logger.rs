//! Logging setup shared by the juku server and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter covers this shared crate and the calling binary's crate;
/// it can be overridden entirely with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "juku-server", "juku-client")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use juku_shared::logger::setup_logger;
///
/// setup_logger("juku-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    // Target names use underscores even when the crate name has hyphens.
    let default_filter = format!(
        "{}={},{}={}",
        env!("CARGO_PKG_NAME").replace("-", "_"),
        default_log_level,
        binary_name.replace("-", "_"),
        default_log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::debug!("Logger initialized (default filter: '{}')", default_filter);
}
