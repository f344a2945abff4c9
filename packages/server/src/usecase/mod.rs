//! UseCase layer: one struct per protocol operation, each holding its
//! dependencies as trait objects.

pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod pomodoro;
pub mod room_directory;
pub mod send_message;
pub mod typing;

pub use error::PomodoroError;
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use pomodoro::PomodoroSyncUseCase;
pub use room_directory::RoomDirectoryUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingIndicatorUseCase;
