//! Terminal User Interface for chatlens.
//!
//! An interactive, scrollable transcript browser:
//! - Summary line showing how much of the transcript is revealed
//! - Message list with per-participant colors and a load-more sentinel
//! - Status bar with the active filter mode and scroll direction
//!
//! Built with ratatui for cross-platform terminal support.

mod app;
mod components;
mod events;
mod state;
mod theme;

pub use app::run;
pub use state::AppState;
pub use theme::{available_themes, Theme};
