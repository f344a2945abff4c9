//! Interactive CLI client for the juku study room server.

mod command;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
pub use session::ClientConfig;
