//! Slash command parsing and help for the chat loop.
//!
//! Commands start with `/` and never reach the backend.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Leave the chat.
    Exit,
    /// Print the transcript so far.
    History,
    /// Show session details.
    Status,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" | "/ayuda" => Some(ChatCommand::Help),
        "/clear" | "/cls" | "/limpiar" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" | "/salir" => Some(ChatCommand::Exit),
        "/history" | "/historial" => Some(ChatCommand::History),
        "/status" | "/estado" => Some(ChatCommand::Status),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Command, Spanish alias, description.
const HELP_ROWS: [(&str, &str, &str); 5] = [
    ("/help", "/ayuda", "Show this help message"),
    ("/clear", "/limpiar", "Clear the screen"),
    ("/history", "/historial", "Show the conversation so far"),
    ("/status", "/estado", "Show session details"),
    ("/exit", "/salir", "Leave the chat"),
];

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, alias, about) in HELP_ROWS {
        println!(
            "  {:<10} {:<12} {}",
            style(name).cyan(),
            style(alias).dim(),
            about
        );
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
