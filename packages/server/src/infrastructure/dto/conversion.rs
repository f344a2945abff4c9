//! Conversion implementations between domain entities and wire DTOs.

use juku_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, PhaseKind, PomodoroPhase, RoomMember};

use super::http::MemberDetailDto;
use super::websocket::{PomodoroStatus, RoomUser, ServerEvent};

// ========================================
// Domain Entity -> WebSocket DTO
// ========================================

impl From<RoomMember> for RoomUser {
    fn from(member: RoomMember) -> Self {
        Self {
            id: member.user_id.into_string(),
            name: member.display_name.into_string(),
            avatar_url: member.avatar_url,
            joined_at: member.joined_at.value(),
        }
    }
}

impl From<ChatMessage> for ServerEvent {
    fn from(message: ChatMessage) -> Self {
        Self::NewMessage {
            id: message.id,
            user_id: message.from.into_string(),
            user_name: message.display_name.into_string(),
            user_avatar: message.avatar_url,
            content: message.content.into_string(),
            timestamp: message.sent_at.value(),
        }
    }
}

impl From<PhaseKind> for PomodoroStatus {
    fn from(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Focus => Self::Active,
            PhaseKind::Break => Self::Break,
        }
    }
}

impl From<PomodoroPhase> for ServerEvent {
    fn from(phase: PomodoroPhase) -> Self {
        Self::PomodoroUpdate {
            status: phase.kind.into(),
            end_time: phase.ends_at.value(),
        }
    }
}

// ========================================
// Domain Entity -> HTTP DTO
// ========================================

impl From<RoomMember> for MemberDetailDto {
    fn from(member: RoomMember) -> Self {
        Self {
            user_id: member.user_id.into_string(),
            name: member.display_name.into_string(),
            avatar_url: member.avatar_url,
            joined_at: timestamp_to_rfc3339(member.joined_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageContent, Timestamp, UserId};

    fn member(user_id: &str, name: &str, joined_at: i64) -> RoomMember {
        RoomMember::new(
            UserId::new(user_id.to_string()).unwrap(),
            DisplayName::new(name.to_string()),
            Some("https://example.com/a.png".to_string()),
            Timestamp::new(joined_at),
        )
    }

    #[test]
    fn test_room_member_to_room_user() {
        // テスト項目: RoomMember が wire 上の RoomUser に変換される
        // given (前提条件):
        let entity = member("alice", "Alice", 1_700_000_000_000);

        // when (操作):
        let dto: RoomUser = entity.into();

        // then (期待する結果):
        assert_eq!(dto.id, "alice");
        assert_eq!(dto.name, "Alice");
        assert_eq!(dto.avatar_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(dto.joined_at, 1_700_000_000_000);
    }

    #[test]
    fn test_chat_message_to_new_message_event() {
        // テスト項目: ChatMessage が new_message イベントに変換される
        // given (前提条件):
        let message = ChatMessage::compose(
            UserId::new("alice".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()),
            None,
            MessageContent::new("hello".to_string()).unwrap(),
            Timestamp::new(1_700_000_000_000),
        );

        // when (操作):
        let event: ServerEvent = message.into();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::NewMessage {
                id: "1700000000000-alice".to_string(),
                user_id: "alice".to_string(),
                user_name: "Alice".to_string(),
                user_avatar: None,
                content: "hello".to_string(),
                timestamp: 1_700_000_000_000,
            }
        );
    }

    #[test]
    fn test_phase_kind_to_pomodoro_status() {
        // テスト項目: フェーズ種別が wire 上の status に対応する
        // given (前提条件):

        // when (操作):
        let active: PomodoroStatus = PhaseKind::Focus.into();
        let rest: PomodoroStatus = PhaseKind::Break.into();

        // then (期待する結果):
        assert_eq!(active, PomodoroStatus::Active);
        assert_eq!(rest, PomodoroStatus::Break);
    }

    #[test]
    fn test_pomodoro_phase_to_update_event() {
        // テスト項目: PomodoroPhase が pomodoro_update イベントに変換される
        // given (前提条件):
        let phase = PomodoroPhase::begin(PhaseKind::Focus, 25, Timestamp::new(1_700_000_000_000));

        // when (操作):
        let event: ServerEvent = phase.into();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::PomodoroUpdate {
                status: PomodoroStatus::Active,
                end_time: 1_700_000_000_000 + 25 * 60 * 1000,
            }
        );
    }

    #[test]
    fn test_room_member_to_member_detail_dto() {
        // テスト項目: RoomMember が HTTP 用の MemberDetailDto に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 UTC
        let entity = member("alice", "Alice", 1_672_531_200_000);

        // when (操作):
        let dto: MemberDetailDto = entity.into();

        // then (期待する結果):
        assert_eq!(dto.user_id, "alice");
        assert!(dto.joined_at.starts_with("2023-01-01T00:00:00"));
        assert!(dto.joined_at.contains("+00:00"));
    }
}
