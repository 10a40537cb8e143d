//! `helpdesk history <session-id>`: dump a session's transcript.

use anyhow::Result;
use console::style;

use helpdesk_types::chat::{Sender, validate_session_id};

use crate::state::AppState;

/// Print every message of a session, oldest first.
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let session_id = validate_session_id(session_id)?;
    let history = state.chat_service.get_conversation_history(session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!();
        println!(
            "  {} No messages stored for session {}",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    for entry in &history {
        let who = match entry.sender {
            Sender::User => style("user").green().bold(),
            Sender::Ai => style("ai").magenta().bold(),
        };
        println!(
            "  {} {}  {}",
            style(entry.timestamp.format("%Y-%m-%d %H:%M:%S")).dim(),
            who,
            entry.text
        );
    }
    println!();
    println!("  {} messages", style(history.len()).bold());

    Ok(())
}
