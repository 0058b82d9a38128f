//! Backend reachability check.

use std::time::Instant;

use anyhow::Result;
use console::style;

use aura_infra::http::HttpChatBackend;

use crate::state::AppState;

/// Query `GET /health` and report whether the backend answered.
///
/// Exits with an error when the backend is unreachable or reports not ok,
/// so the command can be used from scripts.
pub async fn check_health(state: &AppState, json: bool) -> Result<()> {
    let backend = HttpChatBackend::from_config(&state.config)?;
    let started = Instant::now();
    let result = backend.health().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let (ok, error) = match &result {
        Ok(ok) => (*ok, None),
        Err(e) => (false, Some(e.to_string())),
    };

    if json {
        let report = serde_json::json!({
            "base_url": state.config.base_url,
            "ok": ok,
            "latency_ms": latency_ms,
            "error": error,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        if ok {
            println!(
                "  {} {} is up ({}ms)",
                style("✓").green().bold(),
                style(&state.config.base_url).cyan(),
                latency_ms
            );
        } else {
            println!(
                "  {} {} is not healthy",
                style("✗").red().bold(),
                style(&state.config.base_url).cyan()
            );
            if let Some(error) = &error {
                println!("    {}", style(error).dim());
            }
        }
        println!();
    }

    if ok {
        Ok(())
    } else {
        anyhow::bail!("backend at {} is not healthy", state.config.base_url)
    }
}
