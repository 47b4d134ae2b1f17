//! Command parser - Splits prefixed messages into command name and arguments

use crate::domain::entities::{ParseResult, ParsedCommand};

/// Parse `text` as a command invocation marked by `prefix`.
///
/// Returns `None` when the text does not start with the prefix or when nothing
/// but whitespace follows it. Runs of whitespace never produce empty arguments.
pub fn parse(text: &str, prefix: &str) -> ParseResult {
    let body = text.strip_prefix(prefix)?;
    let mut tokens = body.split_whitespace();
    let command = tokens.next()?;

    Some(ParsedCommand {
        command: command.to_string(),
        args: tokens.map(str::to_string).collect(),
    })
}

/// Parser bound to a configured prefix
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn parse(&self, text: &str) -> ParseResult {
        parse(text, &self.prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parsed: &ParsedCommand) -> Vec<&str> {
        parsed.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_without_prefix_is_not_a_command() {
        for text in ["ping", "", " !ping", "hello !ping", "?ping"] {
            assert!(parse(text, "!").is_none(), "{:?} parsed", text);
        }
    }

    #[test]
    fn test_command_with_args() {
        let parsed = parse("!draw cat blue", "!").unwrap();
        assert_eq!(parsed.command, "draw");
        assert_eq!(args(&parsed), vec!["cat", "blue"]);
    }

    #[test]
    fn test_repeated_whitespace_yields_no_empty_args() {
        let parsed = parse("!draw   cat \t\n blue  ", "!").unwrap();
        assert_eq!(parsed.command, "draw");
        assert_eq!(args(&parsed), vec!["cat", "blue"]);
    }

    #[test]
    fn test_prefix_alone_is_not_a_command() {
        assert!(parse("!", "!").is_none());
        assert!(parse("!    ", "!").is_none());
    }

    #[test]
    fn test_command_name_is_verbatim() {
        let parsed = parse("!PiNg", "!").unwrap();
        assert_eq!(parsed.command, "PiNg");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_multi_char_prefix() {
        let parser = CommandParser::new("y!");
        let parsed = parser.parse("y!help me").unwrap();
        assert_eq!(parsed.command, "help");
        assert_eq!(args(&parsed), vec!["me"]);

        assert!(parser.parse("y help").is_none());
        assert!(parser.parse("!help").is_none());
    }

    #[test]
    fn test_prefix_is_stripped_once() {
        let parsed = parse("!!ping", "!").unwrap();
        assert_eq!(parsed.command, "!ping");
    }

    #[test]
    fn test_whitespace_after_prefix() {
        let parsed = parse("! ping now", "!").unwrap();
        assert_eq!(parsed.command, "ping");
        assert_eq!(args(&parsed), vec!["now"]);
    }
}
