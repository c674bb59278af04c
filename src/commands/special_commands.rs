//! Special commands parser for the interactive research session
//!
//! Commands are prefixed with `/` and are case-insensitive. Plain `exit`
//! and `quit` are accepted without the prefix.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during a research session
///
/// These commands inspect the session state instead of being sent as a
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Display the collected citation sources
    Sources,

    /// List the suggested starter queries
    Hints,

    /// Submit the n-th (1-based) suggested starter query
    Hint(usize),

    /// Reprint the whole transcript
    Transcript,

    /// Exit the session
    Exit,

    /// Not a special command; submit the input as a query
    None,
}

/// Parse user input into a special command
///
/// # Errors
///
/// Returns `CommandError` for unknown commands and bad arguments
///
/// # Examples
///
/// ```
/// use cairuilin::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/hint 2"), Ok(SpecialCommand::Hint(2)));
/// assert_eq!(parse_special_command("반도체 현황"), Ok(SpecialCommand::None));
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/sources" => Ok(SpecialCommand::Sources),
        "/hints" => Ok(SpecialCommand::Hints),
        "/transcript" | "/history" => Ok(SpecialCommand::Transcript),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),

        "/hint" => Err(CommandError::MissingArgument {
            command: "/hint".to_string(),
            usage: "/hint <number>".to_string(),
        }),
        input if input.starts_with("/hint ") => {
            let arg = input[6..].trim();
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Ok(SpecialCommand::Hint(n)),
                _ => Err(CommandError::UnsupportedArgument {
                    command: "/hint".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the special commands reference
pub fn print_help() {
    println!(
        r#"
Special Commands for the Research Session
=========================================

  /sources        - Show the citation sources collected so far
  /hints          - List suggested starter queries
  /hint <n>       - Ask the n-th suggested query
  /transcript     - Reprint the conversation
  /help           - Show this help message
  /exit, exit     - End the session

Anything else is sent to the research assistant as a query.
"#
    );
}
