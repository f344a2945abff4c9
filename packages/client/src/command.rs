//! Parsing of interactive input lines.
//!
//! Lines starting with `/` are commands; everything else is a chat message
//! sent to the room as-is. Commands are a closed set, so parsing returns an
//! enum and the session loop dispatches with an exhaustive match.

use crate::error::CommandParseError;

/// Focus phase length used when `/focus` is given without minutes.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

/// Break phase length used when `/break` is given without minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Help text printed for `/help` and shown once at startup.
pub const HELP_TEXT: &str = "\
Commands:
  /focus [minutes]  start a focus phase for the whole room (default 25)
  /break [minutes]  start a break phase for the whole room (default 5)
  /leave            leave the room and exit
  /quit             exit the client
  /help             show this help
Anything else is sent to the room as a chat message.";

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain chat message
    Chat(String),
    /// Start a focus phase of the given length
    Focus(u32),
    /// Start a break phase of the given length
    Break(u32),
    /// Leave the room and end the session
    Leave,
    /// End the session without an explicit leave
    Quit,
    /// Show the command help
    Help,
}

impl InputCommand {
    /// Parse an input line into a command.
    ///
    /// # Arguments
    ///
    /// * `input` - The raw line read from the prompt
    ///
    /// # Returns
    ///
    /// The parsed command, or a `CommandParseError` for an unknown slash
    /// command or a malformed duration argument
    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let input = input.trim();
        let Some(stripped) = input.strip_prefix('/') else {
            return Ok(Self::Chat(input.to_string()));
        };

        let (command, args) = stripped
            .split_once(' ')
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((stripped, ""));

        match command {
            "focus" => Ok(Self::Focus(parse_minutes(args, DEFAULT_FOCUS_MINUTES)?)),
            "break" => Ok(Self::Break(parse_minutes(args, DEFAULT_BREAK_MINUTES)?)),
            "leave" => Ok(Self::Leave),
            "quit" => Ok(Self::Quit),
            "help" => Ok(Self::Help),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_minutes(args: &str, default: u32) -> Result<u32, CommandParseError> {
    if args.is_empty() {
        return Ok(default);
    }
    args.parse::<u32>()
        .map_err(|_| CommandParseError::InvalidDuration(args.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_becomes_chat_message() {
        // テスト項目: スラッシュで始まらない行はチャットメッセージになる
        // given (前提条件):
        let input = "hello, room!";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(result, Ok(InputCommand::Chat("hello, room!".to_string())));
    }

    #[test]
    fn test_chat_message_is_trimmed() {
        // テスト項目: チャットメッセージの前後の空白が取り除かれる
        // given (前提条件):
        let input = "  good luck everyone  ";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InputCommand::Chat("good luck everyone".to_string()))
        );
    }

    #[test]
    fn test_focus_with_minutes() {
        // テスト項目: /focus に分数を指定できる
        // given (前提条件):
        let input = "/focus 50";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(result, Ok(InputCommand::Focus(50)));
    }

    #[test]
    fn test_focus_without_minutes_uses_default() {
        // テスト項目: 分数を省略した /focus はデフォルト値になる
        // given (前提条件):
        let input = "/focus";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(result, Ok(InputCommand::Focus(DEFAULT_FOCUS_MINUTES)));
    }

    #[test]
    fn test_break_with_and_without_minutes() {
        // テスト項目: /break も分数指定と省略の両方を受け付ける
        // given (前提条件):
        let with_minutes = "/break 10";
        let without_minutes = "/break";

        // when (操作):
        let result_with = InputCommand::parse(with_minutes);
        let result_without = InputCommand::parse(without_minutes);

        // then (期待する結果):
        assert_eq!(result_with, Ok(InputCommand::Break(10)));
        assert_eq!(result_without, Ok(InputCommand::Break(DEFAULT_BREAK_MINUTES)));
    }

    #[test]
    fn test_leave_quit_and_help_parse() {
        // テスト項目: 引数を取らないコマンドがパースできる
        // given (前提条件):

        // when (操作):
        let leave = InputCommand::parse("/leave");
        let quit = InputCommand::parse("/quit");
        let help = InputCommand::parse("/help");

        // then (期待する結果):
        assert_eq!(leave, Ok(InputCommand::Leave));
        assert_eq!(quit, Ok(InputCommand::Quit));
        assert_eq!(help, Ok(InputCommand::Help));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let input = "/dance";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommandParseError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        // テスト項目: 数値でない分数指定はエラーになる
        // given (前提条件):
        let input = "/focus soon";

        // when (操作):
        let result = InputCommand::parse(input);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommandParseError::InvalidDuration("soon".to_string()))
        );
    }
}
