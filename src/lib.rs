//! chatlens: CLI/TUI viewer for large chat transcripts.
//!
//! This crate renders a large, append-only chat transcript in a scrollable
//! view. Browsing is either positional, through a fixed-size window that
//! grows incrementally as the user scrolls toward a boundary, or restricted
//! to a date range that shows the full filtered subset at once.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatlens::import::TranscriptReader;
//! use chatlens::view::{compose, ViewFilter, WindowController};
//! use std::time::Duration;
//!
//! fn main() -> chatlens::Result<()> {
//!     let mut reader = TranscriptReader::new();
//!     let transcript = reader.read_file("chat.jsonl")?;
//!
//!     let mut window = WindowController::new(100, Duration::from_millis(100));
//!     window.initialize(transcript.len(), 100);
//!
//!     let slice = compose(&transcript, &ViewFilter::default(), &window);
//!     println!("showing {} of {}", slice.shown_count(), slice.total_count);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`model`]: Messages and the ordered transcript collection
//! - [`import`]: JSONL transcript loading
//! - [`view`]: The windowed display controller (window, composer, watcher)
//! - [`cli`]: Command-line interface
//! - [`tui`]: Terminal user interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod tui;
pub mod util;
pub mod view;

// Re-export commonly used types at the crate root
pub use error::{LensError, Result};
pub use model::{Message, Transcript};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {

    pub use crate::error::{LensError, Result};
    pub use crate::import::TranscriptReader;
    pub use crate::model::{Message, Transcript};
    pub use crate::view::{
        compose, DateRange, FilterMode, ScrollDirection, ViewFilter, ViewSlice, WindowController,
    };
}
