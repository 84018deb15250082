//! Show command implementation.
//!
//! Prints the composed view slice non-interactively. This runs the exact
//! same composition path as the TUI, so it doubles as a scriptable probe
//! of the windowing behavior: `--grow N` applies N growth steps before
//! printing.

use std::time::Duration;

use serde::Serialize;

use crate::cli::{Cli, OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::model::Message;
use crate::view::{compose, FilterMode, ScrollDirection, WindowController};

use super::{build_filter, load_transcript};

/// JSON payload for the show command.
#[derive(Serialize)]
struct ShowOutput<'a> {
    shown_count: usize,
    total_count: usize,
    is_limited: bool,
    has_more: bool,
    messages: Vec<&'a Message>,
}

/// Run the show command.
pub fn run(cli: &Cli, config: &Config, args: &ShowArgs) -> Result<()> {
    let transcript = load_transcript(&args.transcript, args.strict)?;
    let filter = build_filter(
        args.mode,
        args.from.as_deref(),
        args.to.as_deref(),
        args.reverse,
    )?;

    let page_size = args.page_size.unwrap_or(config.window.page_size);

    // No event loop here, so the debounce rate-limiter would only slow the
    // growth steps down; run without a cool-down.
    let mut window = WindowController::new(page_size, Duration::ZERO);
    if filter.mode == FilterMode::Index {
        window.initialize(transcript.len(), page_size);
        for _ in 0..args.grow {
            if !window.request_growth() {
                break;
            }
        }
    }

    let slice = compose(&transcript, &filter, &window);

    match cli.output {
        OutputFormat::Json => {
            let output = ShowOutput {
                shown_count: slice.shown_count(),
                total_count: slice.total_count,
                is_limited: slice.is_limited,
                has_more: slice.has_more,
                messages: slice.messages.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for message in &slice.messages {
                let timestamp = message.timestamp.format("%Y-%m-%d %H:%M");
                println!("[{timestamp}] {}: {}", message.author_or_empty(), message.content);
            }
            if !transcript.is_empty() {
                match filter.mode {
                    FilterMode::Index => {
                        let hint = if slice.has_more {
                            match filter.direction {
                                ScrollDirection::Forward => " (more below)",
                                ScrollDirection::Reverse => " (more above)",
                            }
                        } else {
                            ""
                        };
                        eprintln!(
                            "Showing {} out of {} messages{hint}",
                            slice.shown_count(),
                            slice.total_count
                        );
                    }
                    FilterMode::Date => {
                        eprintln!("Showing {} messages in range", slice.shown_count());
                    }
                }
            }
        }
    }

    Ok(())
}
