//! UI utilities for the client.

use std::io::Write;

/// Build the input prompt shown before each line
pub fn prompt_for(room_id: &str, user_id: &str) -> String {
    format!("[{}] {}> ", room_id, user_id)
}

/// Redisplay the prompt after printing a received message
pub fn redisplay_prompt(room_id: &str, user_id: &str) {
    print!("{}", prompt_for(room_id, user_id));
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_room_and_user() {
        // テスト項目: プロンプトにルームとユーザーの両方が表示される
        // given (前提条件):
        let room_id = "math-101";
        let user_id = "alice";

        // when (操作):
        let prompt = prompt_for(room_id, user_id);

        // then (期待する結果):
        assert_eq!(prompt, "[math-101] alice> ");
    }
}
