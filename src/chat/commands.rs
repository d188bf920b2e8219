//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to pick a mode and manage attachments without sending
//! anything to the service.

use crate::types::Mode;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Choose the input mode.
    Mode(Mode),

    /// Attach the file at the given path.
    Attach(String),

    /// Drop a selected file by name.
    Detach(String),

    /// List the selected files.
    Files,

    /// Send the selected files without any text.
    Send,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use advisor_chat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/mode references").is_some());
/// assert!(parse_command("My idea is to study X").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "mode" => match argument {
            Some(arg) => match arg.parse::<Mode>() {
                Ok(mode) => ChatCommand::Mode(mode),
                Err(err) => ChatCommand::Invalid(format!("/mode: {err}")),
            },
            None => ChatCommand::Invalid("/mode requires idea or references".to_string()),
        },
        "idea" => ChatCommand::Mode(Mode::Idea),
        "references" | "refs" => ChatCommand::Mode(Mode::References),
        "attach" | "add" => match argument {
            Some(path) => ChatCommand::Attach(path.to_string()),
            None => ChatCommand::Invalid("/attach requires a file path".to_string()),
        },
        "detach" | "remove" | "rm" => match argument {
            Some(name) => ChatCommand::Detach(name.to_string()),
            None => ChatCommand::Invalid("/detach requires a file name".to_string()),
        },
        "files" | "ls" => ChatCommand::Files,
        "send" => ChatCommand::Send,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{command}. Type /help for help.")),
    };

    Some(result)
}

/// Returns help text for the available commands.
pub fn help_text() -> &'static str {
    "Available commands:
  /mode <idea|references>  Choose the input mode (only once per session)
  /idea, /references       Shorthand for /mode
  /attach <path>           Attach a file to the next message
  /detach <name>           Remove an attached file
  /files                   List attached files
  /send                    Send the attached files without text
  /help                    Show this help
  /quit                    Exit

Anything else is sent as your message, together with the attached files."
}
