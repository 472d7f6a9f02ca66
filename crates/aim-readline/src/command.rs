//! Console command parsing.

/// Command names offered for completion and highlighting.
pub const COMMAND_NAMES: &[&str] = &[
    ":quit",
    ":exit",
    ":help",
    ":history",
    ":verify",
    ":verify full",
    ":lane",
    ":tutorial",
    ":export",
    ":clear",
];

/// A parsed line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    History,
    Verify { full: bool },
    Lane,
    Export,
    Clear,
    /// Anything that is not a command is a conversational turn.
    Turn(String),
}

impl Command {
    /// Parses a sanitized, trimmed, non-empty line.
    ///
    /// Command words are case-insensitive and may carry one leading colon.
    pub fn parse(line: &str) -> Self {
        let lower = line.to_lowercase();
        let word = lower.strip_prefix(':').unwrap_or(&lower);
        let mut parts = word.split_whitespace();

        let command = match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "exit"), None, _) => Command::Quit,
            (Some("help"), None, _) => Command::Help,
            (Some("history"), None, _) => Command::History,
            (Some("lane" | "tutorial"), None, _) => Command::Lane,
            (Some("export"), None, _) => Command::Export,
            (Some("clear"), None, _) => Command::Clear,
            (Some("verify"), second, None) => Command::Verify {
                full: second == Some("full"),
            },
            _ => Command::Turn(line.to_string()),
        };
        tracing::trace!(?command, "parsed input");
        command
    }
}
