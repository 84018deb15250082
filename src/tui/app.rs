//! TUI application main loop.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::error::{LensError, Result};
use crate::model::Transcript;
use crate::view::ViewFilter;

use super::components::StatusBar;
use super::events::{Event, EventHandler, KeyBindings};
use super::state::AppState;
use super::theme::{available_themes, Theme};

/// Rows scrolled per mouse wheel step.
const WHEEL_SCROLL_ROWS: usize = 3;

/// Run the TUI application for a loaded transcript.
pub fn run(
    transcript: Transcript,
    filter: ViewFilter,
    config: Config,
    theme_name: Option<&str>,
) -> Result<()> {
    let theme = match theme_name {
        Some(name) => Theme::from_name(name).ok_or_else(|| LensError::TuiError {
            message: format!(
                "Unknown theme '{name}' (available: {})",
                available_themes().join(", ")
            ),
        })?,
        None => Theme::from_name(&config.theme.name).unwrap_or_default(),
    };

    // Setup terminal
    enable_raw_mode().map_err(|e| {
        LensError::io(
            "Cannot launch TUI - no interactive terminal available. \
             The TUI requires a terminal with keyboard input support",
            e,
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| LensError::io("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| LensError::io("Failed to create terminal", e))?;

    let mut app = AppState::new(transcript, config, theme);
    app.set_filter(filter);

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| LensError::io("Failed to disable raw mode", e))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| LensError::io("Failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| LensError::io("Failed to show cursor", e))?;

    result
}

/// Main event loop using EventHandler.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    // Tick rate doubles as the watcher polling interval.
    let events = EventHandler::new(std::time::Duration::from_millis(100));
    let bindings = KeyBindings::default();

    loop {
        terminal
            .draw(|f| draw_ui(f, app))
            .map_err(|e| LensError::io("Failed to draw TUI", e))?;

        match events.next() {
            Ok(Event::Key(key)) => {
                if app.show_help {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                            app.toggle_help();
                        }
                        _ => {}
                    }
                    continue;
                }

                if bindings.is_quit(&key) {
                    return Ok(());
                } else if bindings.is_up(&key) {
                    app.scroll_up(1);
                    app.poll_boundary();
                } else if bindings.is_down(&key) {
                    app.scroll_down(1);
                    app.poll_boundary();
                } else if bindings.is_page_up(&key) {
                    app.scroll_up(app.viewport_height.max(1));
                    app.poll_boundary();
                } else if bindings.is_page_down(&key) {
                    app.scroll_down(app.viewport_height.max(1));
                    app.poll_boundary();
                } else if bindings.is_top(&key) {
                    app.scroll_to_top();
                    app.poll_boundary();
                } else if bindings.is_bottom(&key) {
                    app.scroll_to_bottom();
                    app.poll_boundary();
                } else if bindings.is_toggle_direction(&key) {
                    app.toggle_direction();
                } else if bindings.is_toggle_mode(&key) {
                    app.toggle_mode();
                } else if bindings.is_load_more(&key) {
                    app.load_more();
                } else if bindings.is_help(&key) {
                    app.toggle_help();
                }
            }
            Ok(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    app.scroll_up(WHEEL_SCROLL_ROWS);
                    app.poll_boundary();
                }
                MouseEventKind::ScrollDown => {
                    app.scroll_down(WHEEL_SCROLL_ROWS);
                    app.poll_boundary();
                }
                _ => {}
            },
            Ok(Event::Tick) => {
                // Proximity is re-evaluated even without input so a held
                // scroll position near the sentinel keeps revealing pages
                // as each debounce cool-down expires.
                app.poll_boundary();
            }
            Ok(Event::Resize(..)) => {}
            Err(_) => return Ok(()),
        }
    }
}

/// Draw the UI.
fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    // Summary line
    if let Some(summary) = &app.summary {
        f.render_widget(Paragraph::new(summary.clone()), chunks[0]);
    }

    // Message list
    let content_area = chunks[1];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title("chatlens");
    let inner = block.inner(content_area);
    app.viewport_height = inner.height as usize;

    let visible: Vec<Line> = app
        .lines
        .iter()
        .skip(app.scroll_offset)
        .take(inner.height as usize)
        .cloned()
        .collect();
    f.render_widget(Paragraph::new(visible).block(block), content_area);

    // Status bar
    let status = StatusBar::new()
        .left(vec![Span::raw(format!(
            " mode:{} | {}",
            app.mode_label(),
            app.direction_label()
        ))])
        .right(vec![Span::raw("q quit | r reverse | d dates | ? help ")]);
    status.render(f, chunks[2]);

    if app.show_help {
        draw_help(f, app);
    }
}

/// Draw the help overlay.
fn draw_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 60, f.area());

    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().fg(app.theme.primary))),
        Line::from(""),
        Line::from("  j / Down      scroll down"),
        Line::from("  k / Up        scroll up"),
        Line::from("  PgUp / PgDn   scroll by page"),
        Line::from("  g / Home      jump to top"),
        Line::from("  G / End       jump to bottom"),
        Line::from("  r             toggle newest-first browsing"),
        Line::from("  d             toggle date filtering"),
        Line::from("  m             load more messages"),
        Line::from("  ?             toggle this help"),
        Line::from("  q             quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title("Help");
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Compute a centered rectangle occupying the given percentages.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
