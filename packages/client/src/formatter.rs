//! Message formatting utilities for client display.

use chrono::{TimeZone, Utc};

use juku_server::infrastructure::dto::websocket::{PomodoroStatus, RoomUser};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the member list received on joining a room
    ///
    /// # Arguments
    ///
    /// * `users` - Members already present in the room, excluding ourselves
    ///
    /// # Returns
    ///
    /// A formatted string with the member list
    pub fn format_room_users(users: &[RoomUser]) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Already in the room:\n");

        if users.is_empty() {
            output.push_str("(No one else is here yet)\n");
        } else {
            for user in users {
                let timestamp_str = clock_time(user.joined_at);
                output.push_str(&format!("{} - joined at {}\n", user.name, timestamp_str));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a member-joined notification
    ///
    /// # Arguments
    ///
    /// * `user_name` - The display name of the member who joined
    /// * `timestamp` - Unix timestamp when the member joined (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the join notification
    pub fn format_user_joined(user_name: &str, timestamp: i64) -> String {
        let timestamp_str = clock_time(timestamp);
        format!("\n+ {} joined at {}\n", user_name, timestamp_str)
    }

    /// Format a member-left notification
    ///
    /// # Arguments
    ///
    /// * `user_name` - The display name of the member who left
    /// * `timestamp` - Unix timestamp when the member left (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the leave notification
    pub fn format_user_left(user_name: &str, timestamp: i64) -> String {
        let timestamp_str = clock_time(timestamp);
        format!("\n- {} left at {}\n", user_name, timestamp_str)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - The display name of the sender
    /// * `content` - The message content
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(from: &str, content: &str, sent_at: i64) -> String {
        let timestamp_str = clock_time(sent_at);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            from, content, timestamp_str
        )
    }

    /// Format a typing notification
    ///
    /// # Arguments
    ///
    /// * `user_name` - The display name of the member who is typing
    ///
    /// # Returns
    ///
    /// A formatted string with the typing notification
    pub fn format_typing_started(user_name: &str) -> String {
        format!("\n* {} is typing...\n", user_name)
    }

    /// Format a pomodoro phase change
    ///
    /// # Arguments
    ///
    /// * `status` - Whether the room entered a focus or a break phase
    /// * `end_time` - Unix timestamp when the phase ends (milliseconds)
    /// * `now_millis` - Current Unix timestamp (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the phase headline and remaining minutes
    pub fn format_pomodoro_update(
        status: PomodoroStatus,
        end_time: i64,
        now_millis: i64,
    ) -> String {
        let headline = match status {
            PomodoroStatus::Active => "Focus time!",
            PomodoroStatus::Break => "Break time!",
        };
        format!(
            "\n\n============================================================\n\
             {} {} min remaining (until {})\n\
             ============================================================\n",
            headline,
            remaining_minutes(end_time, now_millis),
            clock_time(end_time)
        )
    }

    /// Format a binary message notification
    ///
    /// # Arguments
    ///
    /// * `byte_count` - The number of bytes received
    ///
    /// # Returns
    ///
    /// A formatted string with the binary data notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    ///
    /// # Arguments
    ///
    /// * `text` - The raw text received
    ///
    /// # Returns
    ///
    /// A formatted string with the raw message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

/// Render a millisecond timestamp as a wall-clock time (UTC)
fn clock_time(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => String::from("--:--:--"),
    }
}

/// Minutes until `end_time`, rounded up, never negative
fn remaining_minutes(end_time: i64, now_millis: i64) -> i64 {
    let delta = (end_time - now_millis).max(0);
    (delta + 59_999) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_room_users_with_empty_list() {
        // テスト項目: 他の参加者がいない場合、適切なメッセージが表示される
        // given (前提条件):
        let users = vec![];

        // when (操作):
        let result = MessageFormatter::format_room_users(&users);

        // then (期待する結果):
        assert!(result.contains("Already in the room:"));
        assert!(result.contains("(No one else is here yet)"));
        assert!(result.contains("============================================================"));
    }

    #[test]
    fn test_format_room_users_lists_every_member() {
        // テスト項目: 複数の参加者が全員表示される
        // given (前提条件):
        let users = vec![
            RoomUser {
                id: "alice".to_string(),
                name: "Alice".to_string(),
                avatar_url: None,
                joined_at: 1672531200000,
            },
            RoomUser {
                id: "bob".to_string(),
                name: "Bob".to_string(),
                avatar_url: None,
                joined_at: 1672574696000,
            },
        ];

        // when (操作):
        let result = MessageFormatter::format_room_users(&users);

        // then (期待する結果):
        assert!(result.contains("Alice - joined at 00:00:00"));
        assert!(result.contains("Bob - joined at 12:04:56"));
    }

    #[test]
    fn test_format_user_joined() {
        // テスト項目: 参加通知が正しくフォーマットされる
        // given (前提条件):
        let user_name = "Bob";
        let timestamp = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_user_joined(user_name, timestamp);

        // then (期待する結果):
        assert!(result.contains("+ Bob"));
        assert!(result.contains("joined at 00:00:00"));
    }

    #[test]
    fn test_format_user_left() {
        // テスト項目: 退出通知が正しくフォーマットされる
        // given (前提条件):
        let user_name = "Carol";
        let timestamp = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_user_left(user_name, timestamp);

        // then (期待する結果):
        assert!(result.contains("- Carol"));
        assert!(result.contains("left at 00:00:00"));
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが正しくフォーマットされる
        // given (前提条件):
        let from = "Alice";
        let content = "Hello, room!";
        let sent_at = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_chat_message(from, content, sent_at);

        // then (期待する結果):
        assert!(result.contains("@Alice:"));
        assert!(result.contains("Hello, room!"));
        assert!(result.contains("sent at 00:00:00"));
        assert!(result.contains("------------------------------------------------------------"));
    }

    #[test]
    fn test_format_typing_started() {
        // テスト項目: タイピング通知が正しくフォーマットされる
        // given (前提条件):
        let user_name = "Alice";

        // when (操作):
        let result = MessageFormatter::format_typing_started(user_name);

        // then (期待する結果):
        assert!(result.contains("* Alice is typing..."));
    }

    #[test]
    fn test_format_pomodoro_update_for_focus_phase() {
        // テスト項目: フォーカス区間の通知に残り分数と終了時刻が含まれる
        // given (前提条件):
        let now = 1672531200000;
        let end_time = now + 25 * 60_000;

        // when (操作):
        let result =
            MessageFormatter::format_pomodoro_update(PomodoroStatus::Active, end_time, now);

        // then (期待する結果):
        assert!(result.contains("Focus time!"));
        assert!(result.contains("25 min remaining"));
        assert!(result.contains("until 00:25:00"));
    }

    #[test]
    fn test_format_pomodoro_update_for_break_phase() {
        // テスト項目: 休憩区間の通知は 'Break time!' と表示される
        // given (前提条件):
        let now = 1672531200000;
        let end_time = now + 5 * 60_000;

        // when (操作):
        let result =
            MessageFormatter::format_pomodoro_update(PomodoroStatus::Break, end_time, now);

        // then (期待する結果):
        assert!(result.contains("Break time!"));
        assert!(result.contains("5 min remaining"));
    }

    #[test]
    fn test_format_pomodoro_update_rounds_remaining_minutes_up() {
        // テスト項目: 残り時間が分に満たない端数は切り上げられる
        // given (前提条件):
        let now = 1672531200000;
        let end_time = now + 61_000;

        // when (操作):
        let result =
            MessageFormatter::format_pomodoro_update(PomodoroStatus::Active, end_time, now);

        // then (期待する結果):
        assert!(result.contains("2 min remaining"));
    }

    #[test]
    fn test_format_pomodoro_update_with_elapsed_phase() {
        // テスト項目: すでに終了した区間の残り時間は 0 分になる
        // given (前提条件):
        let now = 1672531200000;
        let end_time = now - 1;

        // when (操作):
        let result =
            MessageFormatter::format_pomodoro_update(PomodoroStatus::Active, end_time, now);

        // then (期待する結果):
        assert!(result.contains("0 min remaining"));
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージ通知が正しくフォーマットされる
        // given (前提条件):
        let byte_count = 1024;

        // when (操作):
        let result = MessageFormatter::format_binary_message(byte_count);

        // then (期待する結果):
        assert!(result.contains("1024 bytes"));
        assert!(result.contains("Received"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 解釈できないメッセージがそのまま表示される
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
