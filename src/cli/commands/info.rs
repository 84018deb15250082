//! Info command implementation.
//!
//! Displays transcript-level information: message count, participants,
//! and the covered date range.

use serde::Serialize;

use crate::cli::{Cli, InfoArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;

use super::load_transcript;

/// JSON payload for the info command.
#[derive(Serialize)]
struct InfoOutput {
    path: String,
    message_count: usize,
    participants: Vec<String>,
    first_timestamp: Option<String>,
    last_timestamp: Option<String>,
}

/// Run the info command.
pub fn run(cli: &Cli, _config: &Config, args: &InfoArgs) -> Result<()> {
    let transcript = load_transcript(&args.transcript, args.strict)?;

    let output = InfoOutput {
        path: args.transcript.display().to_string(),
        message_count: transcript.len(),
        participants: transcript.participants(),
        first_timestamp: transcript.first_timestamp().map(|t| t.to_rfc3339()),
        last_timestamp: transcript.last_timestamp().map(|t| t.to_rfc3339()),
    };

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("Transcript: {}", output.path);
            println!("Messages:   {}", output.message_count);
            println!(
                "Participants ({}): {}",
                output.participants.len(),
                output.participants.join(", ")
            );
            if let (Some(first), Some(last)) = (&output.first_timestamp, &output.last_timestamp) {
                println!("From:       {first}");
                println!("To:         {last}");
            }
        }
    }

    Ok(())
}
