//! Realtime study-room coordination server library.
//!
//! This library implements the realtime core of a study platform: room
//! presence tracking, chat and typing-indicator broadcast, and shared
//! pomodoro timer synchronization over WebSocket. All state is in-memory
//! and ephemeral; durable storage belongs to external collaborators.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
