//! Room Registry の実装
//!
//! ## 概要
//!
//! このモジュールは `RoomRegistry` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `inmemory`: プロセス内の HashMap による実装（単一プロセス前提）

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
