//! View command implementation.
//!
//! Loads a transcript and launches the interactive TUI browser.

use crate::cli::{Cli, ViewArgs};
use crate::config::Config;
use crate::error::Result;
use crate::tui;

use super::{build_filter, load_transcript};

/// Run the view command.
pub fn run(_cli: &Cli, config: &Config, args: &ViewArgs) -> Result<()> {
    let transcript = load_transcript(&args.transcript, args.strict)?;
    let filter = build_filter(
        args.mode,
        args.from.as_deref(),
        args.to.as_deref(),
        args.reverse,
    )?;

    tui::run(transcript, filter, config.clone(), args.theme.as_deref())
}
