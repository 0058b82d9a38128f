//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner shown once a session has started.
///
/// Displays the widget title, the backend, and a short session id, with a
/// hint about slash commands.
pub fn print_welcome_banner(title: &str, base_url: &str, session_id: &str) {
    println!();
    println!("  {}", style(title).magenta().bold());
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(base_url).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(short_id(session_id)).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// First eight characters of a session id, on a char boundary.
pub fn short_id(session_id: &str) -> &str {
    match session_id.char_indices().nth(8) {
        Some((idx, _)) => &session_id[..idx],
        None => session_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_long_ids() {
        assert_eq!(short_id("0192f3a4-aaaa-bbbb"), "0192f3a4");
    }

    #[test]
    fn short_id_keeps_short_ids() {
        assert_eq!(short_id("sess-1"), "sess-1");
        assert_eq!(short_id(""), "");
    }
}
