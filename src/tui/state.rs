//! TUI application state.
//!
//! `AppState` owns the window controller and the filter configuration;
//! everything the renderer shows is derived from them by recomposing the
//! view after each state change. The boundary watcher feeds back into the
//! controller through a signal latch drained on every tick.

use std::collections::HashMap;

use ratatui::style::Color;
use ratatui::text::Line;

use crate::config::Config;
use crate::model::Transcript;
use crate::view::{
    compose, BoundaryWatcher, Edge, FilterMode, ManualTrigger, ScrollDirection, SignalLatch,
    ViewFilter, ViewportMetrics, ViewportWatcher, WindowController,
};

use super::components::{message_lines, sentinel_line, summary_line};
use super::theme::Theme;

/// Application state.
pub struct AppState {
    /// The loaded transcript.
    pub transcript: Transcript,
    /// Active filter configuration.
    pub filter: ViewFilter,
    /// Application configuration.
    pub config: Config,
    /// Current theme.
    pub theme: Theme,
    /// Rendered content lines (sentinel row included).
    pub lines: Vec<Line<'static>>,
    /// Summary line, absent for an empty transcript.
    pub summary: Option<Line<'static>>,
    /// First visible content row.
    pub scroll_offset: usize,
    /// Rows available for content.
    pub viewport_height: usize,
    /// Show help overlay.
    pub show_help: bool,
    /// Messages in the rendered slice.
    pub shown_count: usize,
    /// Size of the effective subset.
    pub total_count: usize,
    /// Whether the window can reveal more.
    pub has_more: bool,

    window: WindowController,
    watcher: ViewportWatcher,
    manual: ManualTrigger,
    latch: SignalLatch,
    sentinel: Option<Edge>,
    color_map: HashMap<String, Color>,
}

impl AppState {
    /// Create app state for a loaded transcript.
    pub fn new(transcript: Transcript, config: Config, theme: Theme) -> Self {
        let color_map = transcript
            .participants()
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, theme.participant_color(i)))
            .collect();

        let window = WindowController::new(config.window.page_size, config.window.debounce());
        let watcher = ViewportWatcher::new(
            config.watcher.proximity_rows,
            config.watcher.intersection_threshold,
        );

        let mut state = Self {
            transcript,
            filter: ViewFilter::default(),
            config,
            theme,
            lines: Vec::new(),
            summary: None,
            scroll_offset: 0,
            viewport_height: 0,
            show_help: false,
            shown_count: 0,
            total_count: 0,
            has_more: false,
            window,
            watcher,
            manual: ManualTrigger::new(),
            latch: SignalLatch::new(),
            sentinel: None,
            color_map,
        };
        state.rebuild();
        state
    }

    /// Replace the filter configuration (from CLI flags) and recompose.
    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
        if self.filter.mode == FilterMode::Index {
            self.reset_window();
        }
        self.rebuild();
        self.snap_to_direction_edge();
    }

    /// The window controller (read-only).
    pub fn window(&self) -> &WindowController {
        &self.window
    }

    /// Recompose the view and re-render content lines.
    ///
    /// Also re-attaches the boundary watcher with a fresh callback binding,
    /// so a stale closure can never observe outdated window state.
    pub fn rebuild(&mut self) {
        if self.filter.mode == FilterMode::Index {
            // Idempotent when the size is unchanged, a reset otherwise.
            self.window
                .initialize(self.transcript.len(), self.config.window.page_size);
        }

        let slice = compose(&self.transcript, &self.filter, &self.window);
        self.shown_count = slice.shown_count();
        self.total_count = slice.total_count;
        self.has_more = slice.has_more;
        self.sentinel = slice.sentinel;
        self.summary = summary_line(&slice, &self.filter, self.transcript.is_empty(), &self.theme);

        let mut lines = Vec::new();
        if self.sentinel == Some(Edge::Start) {
            lines.push(sentinel_line(Edge::Start, &self.theme));
        }
        let mut previous_author: Option<String> = None;
        for message in &slice.messages {
            let author = message.author_or_empty().to_string();
            let color = self
                .color_map
                .get(&author)
                .copied()
                .unwrap_or(self.theme.foreground);
            let compact = previous_author.as_deref() == Some(author.as_str());
            lines.extend(message_lines(
                message,
                color,
                compact,
                &self.config.display,
                &self.theme,
            ));
            lines.push(Line::from(""));
            previous_author = Some(author);
        }
        if self.sentinel == Some(Edge::End) {
            lines.push(sentinel_line(Edge::End, &self.theme));
        }
        self.lines = lines;

        self.refresh_watcher();
        self.clamp_scroll();
    }

    /// Attach the watcher to the sentinel edge, or detach when windowing
    /// is inactive or exhausted.
    fn refresh_watcher(&mut self) {
        match self.sentinel {
            Some(edge) => {
                self.watcher.attach(edge, self.latch.callback());
                self.manual.attach(edge, self.latch.callback());
            }
            None => {
                self.watcher.detach();
                self.manual.detach();
            }
        }
    }

    /// Feed scroll geometry to the watcher and apply any growth signal.
    /// Called on every tick and after every scroll movement.
    pub fn poll_boundary(&mut self) {
        self.watcher.observe(ViewportMetrics {
            offset: self.scroll_offset,
            height: self.viewport_height,
            content_rows: self.lines.len(),
        });
        self.drain_growth_signal();
    }

    /// Explicit load-more fallback (key binding).
    pub fn load_more(&mut self) {
        self.manual.trigger();
        self.drain_growth_signal();
    }

    /// Convert a latched boundary signal into a growth request.
    fn drain_growth_signal(&mut self) {
        if !self.latch.take() {
            return;
        }
        let rows_before = self.lines.len();
        if self.window.request_growth() {
            self.rebuild();
            // Reverse mode prepends older rows; shift the offset so the
            // viewport keeps showing the same content.
            if self.filter.direction == ScrollDirection::Reverse {
                let added = self.lines.len().saturating_sub(rows_before);
                self.scroll_offset += added;
                self.clamp_scroll();
            }
        }
    }

    /// Toggle scroll direction. Keeps the reveal count; only the active
    /// edge (and therefore the sentinel) changes.
    pub fn toggle_direction(&mut self) {
        self.filter.direction = self.filter.direction.toggled();
        self.rebuild();
        self.snap_to_direction_edge();
    }

    /// Toggle between index and date filtering.
    pub fn toggle_mode(&mut self) {
        self.filter.mode = match self.filter.mode {
            FilterMode::Index => FilterMode::Date,
            FilterMode::Date => {
                // Window state is created fresh when index mode becomes
                // active again.
                self.reset_window();
                FilterMode::Index
            }
        };
        self.rebuild();
        self.snap_to_direction_edge();
    }

    fn reset_window(&mut self) {
        self.window = WindowController::new(
            self.config.window.page_size,
            self.config.window.debounce(),
        );
    }

    fn snap_to_direction_edge(&mut self) {
        match self.filter.direction {
            ScrollDirection::Forward => self.scroll_to_top(),
            ScrollDirection::Reverse => self.scroll_to_bottom(),
        }
    }

    /// Scroll up.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down.
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = (self.scroll_offset + amount).min(self.max_scroll());
    }

    /// Scroll to top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Toggle help.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height.max(1))
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Short label for the active filter mode.
    pub fn mode_label(&self) -> &'static str {
        match self.filter.mode {
            FilterMode::Index => "index",
            FilterMode::Date => "date",
        }
    }

    /// Short label for the active scroll direction.
    pub fn direction_label(&self) -> &'static str {
        match self.filter.direction {
            ScrollDirection::Forward => "oldest first",
            ScrollDirection::Reverse => "newest first",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Message;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    fn state_with(n: usize, page_size: usize) -> AppState {
        let messages = (0..n)
            .map(|i| Message {
                index: 0,
                author: Some("alice".to_string()),
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
                content: format!("m{i}"),
                extra: IndexMap::new(),
            })
            .collect();
        let mut config = Config::default();
        config.window.page_size = page_size;
        config.window.debounce_ms = 0;
        let mut state = AppState::new(Transcript::from_messages(messages), config, Theme::dark());
        state.viewport_height = 10;
        state
    }

    #[test]
    fn test_initial_window_is_one_page() {
        let state = state_with(50, 10);
        assert_eq!(state.shown_count, 10);
        assert_eq!(state.total_count, 50);
        assert!(state.has_more);
        assert!(state.summary.is_some());
    }

    #[test]
    fn test_manual_load_more_grows_window() {
        let mut state = state_with(50, 10);
        state.load_more();
        assert_eq!(state.shown_count, 20);
    }

    #[test]
    fn test_boundary_poll_grows_near_end() {
        let mut state = state_with(500, 10);
        state.scroll_to_bottom();
        state.poll_boundary();
        assert_eq!(state.shown_count, 20);
    }

    #[test]
    fn test_boundary_poll_far_from_edge_is_noop() {
        let mut state = state_with(500, 10);
        state.scroll_to_top();
        // Content is taller than viewport + margin, so the end sentinel is
        // out of reach.
        assert!(state.lines.len() > state.viewport_height + state.config.watcher.proximity_rows);
        state.poll_boundary();
        assert_eq!(state.shown_count, 10);
    }

    #[test]
    fn test_direction_toggle_keeps_reveal_count() {
        let mut state = state_with(50, 10);
        state.load_more();
        assert_eq!(state.shown_count, 20);

        state.toggle_direction();
        assert_eq!(state.filter.direction, ScrollDirection::Reverse);
        assert_eq!(state.shown_count, 20);
    }

    #[test]
    fn test_mode_roundtrip_resets_window() {
        let mut state = state_with(50, 10);
        state.load_more();
        assert_eq!(state.shown_count, 20);

        state.toggle_mode();
        assert_eq!(state.filter.mode, FilterMode::Date);
        // Unbounded range: the full transcript, unwindowed.
        assert_eq!(state.shown_count, 50);
        assert!(!state.has_more);

        state.toggle_mode();
        assert_eq!(state.filter.mode, FilterMode::Index);
        assert_eq!(state.shown_count, 10);
    }

    #[test]
    fn test_empty_transcript_has_no_summary() {
        let state = state_with(0, 10);
        assert!(state.summary.is_none());
        assert_eq!(state.lines.len(), 0);
        assert!(!state.has_more);
    }
}
