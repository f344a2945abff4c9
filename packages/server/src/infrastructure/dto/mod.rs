//! Data Transfer Objects (DTOs) for the realtime protocol and the HTTP API.
//!
//! DTOs are organized by protocol:
//! - `websocket`: realtime event DTOs (client → server and server → client)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
