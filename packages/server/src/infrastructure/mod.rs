//! Infrastructure layer: concrete implementations of the domain interfaces
//! and the DTOs spoken over the wire.

pub mod dto;
pub mod pusher;
pub mod registry;
