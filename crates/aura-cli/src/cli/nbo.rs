//! Next-best-offer CLI commands: recommend, feedback.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use aura_infra::nbo::NboClient;
use aura_types::nbo::{FeedbackAction, Recommendation};

use crate::state::AppState;

/// NBO subcommands.
#[derive(Subcommand)]
pub enum NboCommand {
    /// Rank clinic services for a conversation.
    Recommend {
        /// Conversation to rank for.
        #[arg(long)]
        conversation: String,

        /// Contact name.
        #[arg(long)]
        contact: String,

        /// Current intent, e.g. precios or agendar.
        #[arg(long)]
        intent: String,
    },

    /// Record what the contact did with a recommendation.
    Feedback {
        /// `service_id` of the recommendation.
        #[arg(long)]
        service: String,

        /// Conversation the recommendation belongs to.
        #[arg(long)]
        conversation: String,

        /// clicked, booked, or rejected.
        #[arg(long)]
        action: FeedbackAction,
    },
}

pub async fn handle_nbo_command(cmd: NboCommand, state: &AppState, json: bool) -> Result<()> {
    let client = NboClient::from_config(&state.config)?;
    match cmd {
        NboCommand::Recommend {
            conversation,
            contact,
            intent,
        } => recommend(&client, &conversation, &contact, &intent, json).await,
        NboCommand::Feedback {
            service,
            conversation,
            action,
        } => feedback(&client, &service, &conversation, action, json).await,
    }
}

async fn recommend(
    client: &NboClient,
    conversation: &str,
    contact: &str,
    intent: &str,
    json: bool,
) -> Result<()> {
    let resp = client
        .recommend(conversation, contact, intent)
        .await
        .context("NBO recommend failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} ({} {}, {} messages, {}ms)",
        style("Recommendations for").bold(),
        style(contact).green().bold(),
        style("intent").dim(),
        style(&resp.context.intent).cyan(),
        resp.context.message_count,
        resp.latency_ms
    );
    println!();

    if resp.recommendations.is_empty() {
        println!("  {}", style("No recommendations.").dim());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Service", "Id", "Price", "Confidence", "Reason"]);
    for rec in &resp.recommendations {
        table.add_row(vec![
            Cell::new(&rec.service_name),
            Cell::new(&rec.service_id),
            Cell::new(format_price(rec.price)),
            Cell::new(format!("{}%", rec.confidence_percent())).fg(confidence_color(rec)),
            Cell::new(&rec.reason),
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}

async fn feedback(
    client: &NboClient,
    service: &str,
    conversation: &str,
    action: FeedbackAction,
    json: bool,
) -> Result<()> {
    client
        .feedback(service, conversation, action)
        .await
        .context("NBO feedback failed")?;

    if json {
        let report = serde_json::json!({
            "service_id": service,
            "conversation_id": conversation,
            "action": action,
            "feedback_score": action.score(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n  {} Feedback recorded: {} for {}\n",
            style("✓").green().bold(),
            style(action).cyan(),
            style(service).bold()
        );
    }
    Ok(())
}

fn confidence_color(rec: &Recommendation) -> Color {
    match rec.confidence_percent() {
        90.. => Color::Green,
        70..=89 => Color::Blue,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Whole pesos with `.` thousands separators, e.g. `$29.990`.
fn format_price(price: f64) -> String {
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    format!("${out}")
}
