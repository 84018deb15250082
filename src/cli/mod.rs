//! Command-line interface for chatlens.
//!
//! Provides scriptable access to transcript browsing with four commands:
//! - `view`: Launch the interactive TUI browser
//! - `show`: Print the composed view slice non-interactively
//! - `info`: Display transcript information
//! - `completions`: Generate shell completions

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Chat transcript viewer with incremental windowed scrolling.
#[derive(Debug, Parser)]
#[command(name = "chatlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for structured data.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "CHATLENS_OUTPUT")]
    pub output: OutputFormat,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "CHATLENS_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "CHATLENS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "CHATLENS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the interactive transcript browser.
    #[command(alias = "ui")]
    View(ViewArgs),

    /// Print the composed view slice to stdout.
    #[command(alias = "cat")]
    Show(ShowArgs),

    /// Display transcript information.
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "chatlens", &mut io::stdout());
}

/// Browsing mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FilterModeArg {
    /// Positional browsing through an incrementally revealed window.
    #[default]
    Index,
    /// Restrict the visible set to a date range.
    Date,
}

/// Arguments for the view command.
#[derive(Debug, Parser)]
pub struct ViewArgs {
    /// Transcript file (JSONL, one message per line).
    pub transcript: PathBuf,

    /// Browsing mode.
    #[arg(short = 'm', long, default_value = "index")]
    pub mode: FilterModeArg,

    /// Only show messages from this date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub from: Option<String>,

    /// Only show messages up to this date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub to: Option<String>,

    /// Browse newest messages first.
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Theme name (dark, light, high-contrast).
    #[arg(short = 't', long)]
    pub theme: Option<String>,

    /// Fail on malformed transcript lines instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Transcript file (JSONL, one message per line).
    pub transcript: PathBuf,

    /// Browsing mode.
    #[arg(short = 'm', long, default_value = "index")]
    pub mode: FilterModeArg,

    /// Only show messages from this date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub from: Option<String>,

    /// Only show messages up to this date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub to: Option<String>,

    /// Show the window from the end of the transcript.
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Growth steps to apply before printing (each reveals one page).
    #[arg(short = 'g', long, default_value = "0")]
    pub grow: usize,

    /// Override the configured page size.
    #[arg(short = 'p', long)]
    pub page_size: Option<usize>,

    /// Fail on malformed transcript lines instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the info command.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Transcript file (JSONL, one message per line).
    pub transcript: PathBuf,

    /// Fail on malformed transcript lines instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

/// Initialize tracing/logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    // Build subscriber based on log format
    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let config = match &cli.config {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::load().unwrap_or_default(),
    };

    match &cli.command {
        Commands::View(args) => commands::view::run(&cli, &config, args),
        Commands::Show(args) => commands::show::run(&cli, &config, args),
        Commands::Info(args) => commands::info::run(&cli, &config, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
