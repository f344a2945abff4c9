//! Shared utilities for the juku server and client binaries.

pub mod logger;
pub mod time;
