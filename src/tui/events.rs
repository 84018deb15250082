//! TUI event handling.
//!
//! This module provides event handling infrastructure for the TUI. Events
//! are delivered over a channel by a polling thread; the tick event drives
//! the boundary watcher and the debounce cool-down, so growth works even
//! while no input arrives.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick (drives watcher polling).
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Mouse event (scroll wheel).
    Mouse(MouseEvent),
    /// Terminal resize.
    Resize(u16, u16),
}

/// Event handler using channels.
pub struct EventHandler {
    /// Event receiver.
    rx: mpsc::Receiver<Event>,
    /// Sender (kept for cloning).
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        // Spawn event loop thread
        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => {
                            if event_tx.send(Event::Mouse(mouse)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                }

                if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Key binding configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Quit keys.
    pub quit: Vec<KeyEvent>,
    /// Scroll up one row.
    pub up: Vec<KeyEvent>,
    /// Scroll down one row.
    pub down: Vec<KeyEvent>,
    /// Scroll up one page.
    pub page_up: Vec<KeyEvent>,
    /// Scroll down one page.
    pub page_down: Vec<KeyEvent>,
    /// Jump to the top.
    pub top: Vec<KeyEvent>,
    /// Jump to the bottom.
    pub bottom: Vec<KeyEvent>,
    /// Toggle scroll direction (newest first).
    pub toggle_direction: Vec<KeyEvent>,
    /// Toggle between index and date filtering.
    pub toggle_mode: Vec<KeyEvent>,
    /// Manual load-more fallback.
    pub load_more: Vec<KeyEvent>,
    /// Toggle help overlay.
    pub help: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        Self {
            quit: vec![
                KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ],
            up: vec![
                KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            ],
            down: vec![
                KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            ],
            page_up: vec![KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE)],
            page_down: vec![KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)],
            top: vec![
                KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            ],
            bottom: vec![
                KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            ],
            toggle_direction: vec![KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)],
            toggle_mode: vec![KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)],
            load_more: vec![KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE)],
            help: vec![KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE)],
        }
    }
}

impl KeyBindings {
    fn matches(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
        bindings
            .iter()
            .any(|k| k.code == key.code && k.modifiers == key.modifiers)
    }

    /// Check if a key matches quit binding.
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.quit, key)
    }

    /// Check if a key matches up binding.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.up, key)
    }

    /// Check if a key matches down binding.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.down, key)
    }

    /// Check if a key matches page-up binding.
    pub fn is_page_up(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.page_up, key)
    }

    /// Check if a key matches page-down binding.
    pub fn is_page_down(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.page_down, key)
    }

    /// Check if a key matches top binding.
    pub fn is_top(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.top, key)
    }

    /// Check if a key matches bottom binding.
    pub fn is_bottom(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.bottom, key)
    }

    /// Check if a key matches the direction toggle.
    pub fn is_toggle_direction(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.toggle_direction, key)
    }

    /// Check if a key matches the filter-mode toggle.
    pub fn is_toggle_mode(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.toggle_mode, key)
    }

    /// Check if a key matches the manual load-more binding.
    pub fn is_load_more(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.load_more, key)
    }

    /// Check if a key matches the help toggle.
    pub fn is_help(&self, key: &KeyEvent) -> bool {
        Self::matches(&self.help, key)
    }
}
