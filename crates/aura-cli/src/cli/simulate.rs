//! Intent simulator commands: one message, or the server's canned demo.

use anyhow::{Context, Result};
use console::style;

use aura_infra::simulator::SimulatorClient;
use aura_types::simulate::SimulationResult;

use crate::state::AppState;

/// Send `text` as `contact` through `POST /sim/message` and print the result.
pub async fn simulate(
    state: &AppState,
    contact: &str,
    conversation: Option<String>,
    text: &str,
    json: bool,
) -> Result<()> {
    let client = SimulatorClient::from_config(&state.config)?;
    let result = client
        .simulate(contact, text, conversation)
        .await
        .context("Simulator request failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style(contact).green().bold(), text);
    print_result(&result);
    println!();

    Ok(())
}

/// Run `GET /simulate` and print every result of the demo conversation.
pub async fn run_demo(state: &AppState, json: bool) -> Result<()> {
    let client = SimulatorClient::from_config(&state.config)?;
    let results = client.run_demo().await.context("Simulator demo failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} results",
        style("Demo conversation:").bold(),
        results.len()
    );
    for (i, result) in results.iter().enumerate() {
        println!();
        println!("  {}", style(format!("#{}", i + 1)).dim());
        print_result(result);
    }
    println!();

    Ok(())
}

fn print_result(result: &SimulationResult) {
    println!("  {} {}", style("AURA").magenta().bold(), result.response);
    println!(
        "  {} {}  {} {}  {} {}ms",
        style("intent:").dim(),
        style(&result.intent).cyan(),
        style("conversation:").dim(),
        result.conversation_id,
        style("latency:").dim(),
        result.latency_ms
    );
    if let Some(error) = &result.error {
        println!("  {} {}", style("error:").red(), error);
    }
}
