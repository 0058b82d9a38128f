//! Show the effective client configuration.

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use console::style;

use aura_infra::config::config_path;

use crate::state::AppState;

/// Print the configuration after `config.toml` and CLI overrides are applied.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let config = &state.config;
    let path = config_path(&state.data_dir);

    if json {
        let report = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config_file": path.display().to_string(),
            "config_file_exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let timeout = match config.request_timeout_secs {
        Some(secs) => format!("{secs}s"),
        None => "none".to_string(),
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Setting"), Cell::new("Value")]);
    table.add_row(vec![Cell::new("base_url"), Cell::new(&config.base_url)]);
    table.add_row(vec![Cell::new("clinic_id"), Cell::new(&config.clinic_id)]);
    table.add_row(vec![Cell::new("title"), Cell::new(&config.title)]);
    table.add_row(vec![
        Cell::new("welcome_message"),
        Cell::new(&config.welcome_message),
    ]);
    table.add_row(vec![Cell::new("request_timeout"), Cell::new(timeout)]);
    table.add_row(vec![
        Cell::new("send_ordering"),
        Cell::new(config.send_ordering.to_string()),
    ]);

    println!();
    println!("  {}", style("AURA configuration").bold());
    println!(
        "  {} {}{}",
        style("file:").dim(),
        path.display(),
        if path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!();
    println!("{table}");
    println!();

    Ok(())
}
