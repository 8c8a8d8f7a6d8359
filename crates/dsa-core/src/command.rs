//! Command-line surface of the session loop.
//!
//! Commands are always available and never change; they are initialized
//! once and cached for the lifetime of the process.

use crate::error::{DsaError, Result};
use crate::mode::SubmissionMode;
use std::sync::OnceLock;

/// Every command starts with this prefix.
pub const COMMAND_PREFIX: &str = "dsa";

/// A builtin command.
#[derive(Debug, Clone)]
pub struct BuiltinCommand {
    /// Command name as typed (e.g., "dsa-init")
    pub name: &'static str,
    /// Usage format (e.g., "dsa-init <slug> <lang>")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

impl BuiltinCommand {
    pub const fn new(name: &'static str, usage: &'static str, description: &'static str) -> Self {
        Self {
            name,
            usage,
            description,
        }
    }
}

static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinCommand>> = OnceLock::new();

/// Returns all builtin commands in help order.
pub fn builtin_commands() -> &'static [BuiltinCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinCommand::new(
                "dsa-init",
                "dsa-init <slug> <lang>",
                "Start a new session (e.g., dsa-init two-sum python)",
            ),
            BuiltinCommand::new(
                "dsa-submit",
                "dsa-submit <mode>",
                "Analyze your code (modes: check, help, fix)",
            ),
            BuiltinCommand::new("dsa-exit", "dsa-exit", "End the current session"),
            BuiltinCommand::new("dsa-help", "dsa-help", "Show this help message"),
        ]
    })
}

/// Find a builtin command by name.
pub fn find_builtin_command(name: &str) -> Option<&'static BuiltinCommand> {
    builtin_commands().iter().find(|cmd| cmd.name == name)
}

/// Renders the command list shown by `dsa-help`.
pub fn help_text() -> String {
    let width = builtin_commands()
        .iter()
        .map(|cmd| cmd.usage.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec!["--- Available Commands ---".to_string()];
    for cmd in builtin_commands() {
        lines.push(format!("  {:<width$}  - {}", cmd.usage, cmd.description));
    }
    lines.push("--------------------------".to_string());
    lines.join("\n")
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { slug: String, language: String },
    /// The mode is kept raw; it is validated against the session first.
    Submit { mode: String },
    Exit,
    Help,
}

impl Command {
    /// Parses one input line.
    ///
    /// Blank input yields `Ok(None)`. Anything not starting with the `dsa`
    /// prefix is rejected without further parsing.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(None);
        }
        if !input.starts_with(COMMAND_PREFIX) {
            return Err(DsaError::unknown_command(
                "Invalid command. Please start with 'dsa'.",
            ));
        }

        let args: Vec<&str> = input.split_whitespace().collect();
        let Some(builtin) = find_builtin_command(args[0]) else {
            return Err(DsaError::unknown_command(
                "Unknown command. Type 'dsa-help' for a list of commands.",
            ));
        };
        let command = match builtin.name {
            "dsa-init" => match args.as_slice() {
                [_, slug, language] => Command::Init {
                    slug: slug.to_string(),
                    language: language.to_string(),
                },
                _ => {
                    return Err(DsaError::usage(
                        "dsa-init <problem-slug> <language> (e.g., dsa-init two-sum python)",
                    ));
                }
            },
            "dsa-submit" => match args.as_slice() {
                [_, mode] => Command::Submit {
                    mode: mode.to_string(),
                },
                _ => {
                    return Err(DsaError::usage(format!(
                        "dsa-submit <mode> (available modes: {})",
                        SubmissionMode::command_modes_label()
                    )));
                }
            },
            "dsa-exit" => Command::Exit,
            _ => Command::Help,
        };
        Ok(Some(command))
    }
}
