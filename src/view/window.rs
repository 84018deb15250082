//! Incremental reveal state for index-mode browsing.
//!
//! The controller tracks how many items are exposed from the active edge of
//! the collection and grows that count one page at a time as the user
//! scrolls toward the boundary. Growth requests are guarded: while a
//! request is pending (a fixed debounce cool-down), further requests are
//! ignored, so a burst of boundary signals coalesces into one growth step.

use std::time::{Duration, Instant};

use tracing::trace;

/// Reveal-count state machine for index-mode browsing.
///
/// Two states: `Idle` (no growth pending) and `Growing` (a growth step was
/// taken and its cool-down has not yet elapsed). `request_growth` while
/// growing or while exhausted is a no-op. Exhaustion is a steady state,
/// not terminal: re-initializing with a larger total resumes growth.
///
/// Invariant: `0 <= reveal_count <= total_items`.
#[derive(Debug)]
pub struct WindowController {
    total_items: usize,
    page_size: usize,
    reveal_count: usize,
    /// Cool-down deadline. Pending while `now < deadline`; the guard
    /// clears itself by expiring, regardless of later state changes.
    pending_until: Option<Instant>,
    debounce: Duration,
}

impl WindowController {
    /// Create a controller for an empty collection.
    ///
    /// Call [`initialize`](Self::initialize) once the collection size is
    /// known.
    #[must_use]
    pub fn new(page_size: usize, debounce: Duration) -> Self {
        Self {
            total_items: 0,
            page_size,
            reveal_count: 0,
            pending_until: None,
            debounce,
        }
    }

    /// Reset the window for a (possibly new) collection size.
    ///
    /// Sets `reveal_count = min(page_size, total_items)` and clears any
    /// pending growth. Call whenever the effective dataset size changes or
    /// index mode becomes active. Idempotent: repeated calls with identical
    /// arguments leave the state untouched, so callers may invoke this
    /// unconditionally before composing a view.
    pub fn initialize(&mut self, total_items: usize, page_size: usize) {
        if self.total_items == total_items && self.page_size == page_size {
            return;
        }
        trace!(total_items, page_size, "window reset");
        self.total_items = total_items;
        self.page_size = page_size;
        self.reveal_count = page_size.min(total_items);
        self.pending_until = None;
    }

    /// Request one growth step.
    ///
    /// No-op while a previous step's cool-down is pending, while the window
    /// is exhausted, or when `page_size` is zero (guards against growth
    /// loops that make no progress). Returns whether the window grew.
    pub fn request_growth(&mut self) -> bool {
        if self.page_size == 0 {
            return false;
        }
        if self.is_pending() || self.reveal_count >= self.total_items {
            return false;
        }

        // Mark pending before mutating so a re-entrant signal observes the
        // guard; single ownership of &mut self serializes the check-and-set.
        self.pending_until = Some(Instant::now() + self.debounce);
        self.reveal_count = (self.reveal_count + self.page_size).min(self.total_items);
        trace!(reveal_count = self.reveal_count, "window grew");
        true
    }

    /// Whether a growth step's cool-down is still in effect.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_until.is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Whether more items remain to reveal.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.reveal_count < self.total_items
    }

    /// Number of items currently exposed from the active edge.
    #[must_use]
    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// Size of the collection the window ranges over.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Items revealed per growth step.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
