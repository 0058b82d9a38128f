//! AURA terminal chat client.
//!
//! Binary name: `aura`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then dispatches
//! to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::chat::loop_runner::{VisitorArgs, run_chat_loop};
use cli::{Cli, Commands};
use state::{AppState, ConfigOverrides};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,aura_core=debug,aura_infra=debug",
        _ => "trace",
    };
    aura_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "aura", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(ConfigOverrides {
        base_url: cli.base_url,
        clinic_id: cli.clinic_id,
        send_ordering: cli.send_ordering,
        timeout_secs: cli.timeout,
    })
    .await;

    let result = match cli.command {
        Commands::Chat {
            name,
            email,
            source_url,
        } => {
            run_chat_loop(
                &state,
                VisitorArgs {
                    name,
                    email,
                    source_url,
                },
            )
            .await
        }
        Commands::Health => cli::health::check_health(&state, cli.json).await,
        Commands::Simulate { demo: true, .. } => cli::simulate::run_demo(&state, cli.json).await,
        Commands::Simulate {
            contact,
            conversation,
            text,
            ..
        } => {
            let text = text.unwrap_or_default();
            cli::simulate::simulate(&state, &contact, conversation, &text, cli.json).await
        }
        Commands::Nbo { command } => cli::nbo::handle_nbo_command(command, &state, cli.json).await,
        Commands::WhatsApp { to, message } => {
            cli::whatsapp::send(&state, &to, &message, cli.json).await
        }
        Commands::Config => cli::config::show_config(&state, cli.json),
        Commands::Completions { .. } => Ok(()),
    };

    aura_observe::tracing_setup::shutdown_tracing();
    result
}
