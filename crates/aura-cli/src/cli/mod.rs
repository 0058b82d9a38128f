//! CLI command definitions for the `aura` binary.
//!
//! Uses clap derive macros for argument parsing. Global flags override the
//! values loaded from `config.toml`.

pub mod chat;
pub mod config;
pub mod health;
pub mod nbo;
pub mod simulate;
pub mod whatsapp;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use aura_types::config::SendOrdering;

pub use nbo::NboCommand;

/// Chat with the AURA clinic assistant from your terminal.
#[derive(Parser)]
#[command(name = "aura", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Backend base URL (overrides config.toml).
    #[arg(long, env = "AURA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Clinic the session is opened for (overrides config.toml).
    #[arg(long, env = "AURA_CLINIC_ID", global = true)]
    pub clinic_id: Option<String>,

    /// Ordering of overlapping sends: `concurrent` or `serialized`.
    #[arg(long, global = true)]
    pub send_ordering: Option<SendOrdering>,

    /// Per-request timeout in seconds (default: wait forever).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Visitor name (prompted for when omitted).
        #[arg(long)]
        name: Option<String>,

        /// Visitor email.
        #[arg(long)]
        email: Option<String>,

        /// Page the visitor is chatting from.
        #[arg(long, default_value = "cli://aura")]
        source_url: String,
    },

    /// Check that the backend is reachable.
    Health,

    /// Send one message to the intent simulator, or run the canned demo.
    #[command(alias = "sim")]
    Simulate {
        /// Contact name to simulate.
        #[arg(long, default_value = "Demo")]
        contact: String,

        /// Continue an existing simulated conversation.
        #[arg(long)]
        conversation: Option<String>,

        /// Run the server's demo conversation instead of sending one message.
        #[arg(long, conflicts_with_all = ["text", "conversation"])]
        demo: bool,

        /// Message text.
        #[arg(required_unless_present = "demo")]
        text: Option<String>,
    },

    /// Next-best-offer recommendations and feedback.
    Nbo {
        #[command(subcommand)]
        command: NboCommand,
    },

    /// Send a WhatsApp text message through the backend.
    #[command(name = "whatsapp", alias = "wa")]
    WhatsApp {
        /// Destination phone number, e.g. +56911112222.
        #[arg(long)]
        to: String,

        /// Message text.
        message: String,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
