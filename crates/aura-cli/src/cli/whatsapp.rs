//! Outbound WhatsApp text message command.

use anyhow::{Context, Result};
use console::style;

use aura_infra::whatsapp::WhatsAppClient;

use crate::state::AppState;

pub async fn send(state: &AppState, to: &str, message: &str, json: bool) -> Result<()> {
    WhatsAppClient::from_config(&state.config)?
        .send_text(to, message)
        .await
        .context("WhatsApp send failed")?;

    if json {
        let report = serde_json::json!({ "to": to, "sent": true });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n  {} Message sent to {}\n",
            style("✓").green().bold(),
            style(to).cyan()
        );
    }
    Ok(())
}
