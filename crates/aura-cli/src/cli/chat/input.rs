//! Visitor line input for the chat loop.
//!
//! Reads lines through `rustyline_async` and classifies each one as chat
//! text, a slash command, or nothing, so the loop never has to look at raw
//! readline events.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use super::commands::{self, ChatCommand};

/// One thing the visitor did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// Text to send to the bot, trimmed.
    Message(String),
    /// A slash command; never sent to the backend.
    Command(ChatCommand),
    /// Enter on an empty or whitespace-only line.
    Blank,
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Open the prompt for `visitor_name`.
    ///
    /// The returned `SharedWriter` prints above the prompt without
    /// corrupting the line being edited.
    pub fn open(visitor_name: &str) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt_for(visitor_name))?;
        Ok((Self { rl }, writer))
    }

    /// Wait for the next visitor action.
    pub async fn next_event(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let event = classify(&line);
                if !matches!(event, InputEvent::Blank) {
                    self.rl.add_history_entry(line.trim().to_string());
                }
                event
            }
            Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        }
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}

/// Classify one submitted line.
pub fn classify(line: &str) -> InputEvent {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputEvent::Blank;
    }
    match commands::parse(trimmed) {
        Some(cmd) => InputEvent::Command(cmd),
        None => InputEvent::Message(trimmed.to_string()),
    }
}

/// Prompt shown before each visitor line, using the first word of the name.
fn prompt_for(visitor_name: &str) -> String {
    let first = visitor_name.split_whitespace().next().unwrap_or("Tú");
    format!("  {} ", style(format!("{first} >")).green().bold())
}
