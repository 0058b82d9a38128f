//! Main chat loop orchestration.
//!
//! Owns one `ChatSessionClient` for the duration of the run: collects the
//! visitor details, starts the session, prints the welcome message, then
//! forwards each line to the backend until the visitor leaves. The session
//! is discarded when the loop returns.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use aura_core::backend::ChatBackend;
use aura_core::chat::client::{ChatSessionClient, ClientSettings, SendOutcome, SkipReason};
use aura_infra::http::HttpChatBackend;
use aura_types::chat::{ChatMessage, Sender, VisitorInfo};

use crate::state::AppState;

use super::banner::{print_welcome_banner, short_id};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

/// How long the connect spinner waits before saying the server is slow.
const SLOW_CONNECT: Duration = Duration::from_secs(3);

/// Visitor details given on the command line.
pub struct VisitorArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub source_url: String,
}

/// Run the interactive chat loop against the configured backend.
pub async fn run_chat_loop(state: &AppState, args: VisitorArgs) -> anyhow::Result<()> {
    let backend = HttpChatBackend::from_config(&state.config)?;
    let client = ChatSessionClient::new(backend, ClientSettings::from_config(&state.config));

    let visitor = resolve_visitor(args)?;
    let visitor_name = visitor.visitor_name.clone();

    let connecting = spinner("connecting...");
    let started = {
        let start = client.start_session(visitor);
        tokio::pin!(start);
        let mut ticks = tokio::time::interval(SLOW_CONNECT);
        ticks.tick().await;
        loop {
            tokio::select! {
                result = &mut start => break result,
                _ = ticks.tick() => {
                    if client.is_loading() {
                        connecting.set_message("still connecting...");
                    }
                }
            }
        }
    };
    connecting.finish_and_clear();
    let session = started.map_err(|e| anyhow::anyhow!("Could not start chat session: {e}"))?;

    print_welcome_banner(&state.config.title, &state.config.base_url, &session.id);
    if let Some(welcome) = client.last_message() {
        print_message(&welcome);
    }

    let (mut chat_input, _writer) = ChatInput::open(&visitor_name)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.next_event().await {
            InputEvent::Message(text) => text,
            InputEvent::Blank => continue,
            InputEvent::Eof | InputEvent::Command(ChatCommand::Exit) => {
                println!("\n  {}", style("Chat ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Command(cmd) => {
                run_command(cmd, &client, &mut chat_input);
                continue;
            }
        };

        client.set_input(text);
        let typing = spinner("typing...");
        let outcome = client.send_pending().await;
        typing.finish_and_clear();

        match outcome {
            SendOutcome::Replied(reply) => print_message(&reply),
            // Failures were already logged by the client; the transcript keeps
            // the visitor line without a reply.
            SendOutcome::Failed(_) | SendOutcome::Skipped(SkipReason::EmptyText) => {}
            skipped @ SendOutcome::Skipped(SkipReason::NoSession) => {
                skipped.into_result()?;
            }
        }
    }

    info!(
        session_id = %session.id,
        messages = client.transcript_len(),
        "Chat loop finished"
    );
    Ok(())
}

fn run_command<B: ChatBackend>(
    cmd: ChatCommand,
    client: &ChatSessionClient<B>,
    chat_input: &mut ChatInput,
) {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::History => print_history(client),
        ChatCommand::Status => print_status(client),
        ChatCommand::Unknown(name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
        ChatCommand::Exit => {}
    }
}

/// Fill in missing visitor details, prompting for the name when needed.
fn resolve_visitor(args: VisitorArgs) -> anyhow::Result<VisitorInfo> {
    let interactive = args.name.is_none();

    let visitor_name = match args.name {
        Some(name) => name,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Tu nombre")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("El nombre es obligatorio")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let visitor_email = match args.email {
        Some(email) => Some(email),
        None if interactive => {
            let email: String = dialoguer::Input::new()
                .with_prompt("Email (opcional)")
                .allow_empty(true)
                .interact_text()?;
            Some(email)
        }
        None => None,
    };

    Ok(VisitorInfo {
        visitor_name,
        visitor_email,
        source_url: args.source_url,
        user_agent: user_agent(),
    })
}

fn user_agent() -> String {
    format!("aura-cli/{}", env!("CARGO_PKG_VERSION"))
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn sender_label(sender: Sender) -> String {
    match sender {
        Sender::Visitor => format!("{}", style("Tú").green().bold()),
        Sender::Bot => format!("{}", style("AURA").magenta().bold()),
    }
}

fn print_message(message: &ChatMessage) {
    println!("\n  {} {}\n", sender_label(message.sender), message.text);
}

fn print_history<B: ChatBackend>(client: &ChatSessionClient<B>) {
    println!();
    for message in client.transcript() {
        let preview = if message.text.chars().count() > 100 {
            let cut: String = message.text.chars().take(97).collect();
            format!("{cut}...")
        } else {
            message.text.clone()
        };
        println!(
            "  {} {} {}",
            style(&message.timestamp).dim(),
            sender_label(message.sender),
            preview
        );
    }
    println!();
}

fn print_status<B: ChatBackend>(client: &ChatSessionClient<B>) {
    let Some(session) = client.session() else {
        println!("\n  {}\n", style("No active session.").dim());
        return;
    };

    println!();
    println!("  {}  {}", style("Session:").bold(), short_id(&session.id));
    println!("  {}   {}", style("Status:").bold(), session.status);
    println!("  {}   {}", style("Clinic:").bold(), session.clinic_id);
    println!(
        "  {} {} ({} from you, {} from AURA)",
        style("Messages:").bold(),
        client.transcript_len(),
        client.count_from(Sender::Visitor),
        client.count_from(Sender::Bot)
    );
    println!(
        "  {} {}",
        style("Ordering:").bold(),
        client.settings().send_ordering
    );
    println!();
}
