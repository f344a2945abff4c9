//! UseCase 層のエラー定義

use thiserror::Error;

/// ポモドーロタイマー操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PomodoroError {
    /// 対象ルームに結び付いていないセッションからの操作
    #[error("session is not bound to room '{0}'")]
    NotInRoom(String),
}
