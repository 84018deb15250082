//! Boundary-proximity adaptation.
//!
//! A load-more sentinel sits at one edge of the rendered list; when the
//! viewport comes within a configured proximity of it, the watcher fires a
//! callback that requests window growth. The window controller makes no
//! assumption about how the signal is produced: [`ViewportWatcher`] derives
//! it from scroll geometry each frame, and [`ManualTrigger`] is the
//! explicit load-more fallback for surfaces with no scroll signal at all.
//! Watchers fire level-triggered; the controller's pending guard coalesces
//! repeated signals into one growth step.

use std::cell::Cell;
use std::rc::Rc;

/// An edge of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Before the first rendered item.
    Start,
    /// After the last rendered item.
    End,
}

/// Callback invoked when the sentinel edge comes into proximity.
pub type BoundaryCallback = Box<dyn FnMut()>;

/// Watches one edge of the rendered list for boundary proximity.
///
/// Implementations must only invoke the callback while attached, and must
/// drop the previous callback on re-attach so a stale binding can never
/// fire. Attach the watcher only while index mode is active and the window
/// has more to reveal, and re-attach whenever the relevant edge or the
/// callback binding changes.
pub trait BoundaryWatcher {
    /// Attach to an edge. Replaces any previous attachment.
    fn attach(&mut self, edge: Edge, on_boundary: BoundaryCallback);

    /// Detach, dropping the callback.
    fn detach(&mut self);

    /// Whether the watcher currently holds an attachment.
    fn is_attached(&self) -> bool;
}

/// Scroll geometry of the rendered list, in rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportMetrics {
    /// First visible content row.
    pub offset: usize,
    /// Number of visible rows.
    pub height: usize,
    /// Total content rows, sentinel row included.
    pub content_rows: usize,
}

/// Polling watcher driven by per-frame scroll geometry.
///
/// The sentinel occupies one row at the watched edge. The proximity margin
/// extends the viewport toward that edge so the signal fires before the
/// sentinel actually scrolls into view; the threshold is the fraction of
/// the sentinel row that must intersect the extended viewport.
pub struct ViewportWatcher {
    margin_rows: usize,
    threshold: f64,
    attachment: Option<(Edge, BoundaryCallback)>,
}

impl std::fmt::Debug for ViewportWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportWatcher")
            .field("margin_rows", &self.margin_rows)
            .field("threshold", &self.threshold)
            .field("attached", &self.attachment.as_ref().map(|(e, _)| *e))
            .finish()
    }
}

impl ViewportWatcher {
    /// Create a watcher with the given proximity margin and intersection
    /// threshold.
    #[must_use]
    pub fn new(margin_rows: usize, threshold: f64) -> Self {
        Self {
            margin_rows,
            threshold,
            attachment: None,
        }
    }

    /// Feed one frame's scroll geometry; fires the callback when the
    /// sentinel intersects the margin-extended viewport.
    pub fn observe(&mut self, metrics: ViewportMetrics) {
        let Some((edge, on_boundary)) = self.attachment.as_mut() else {
            return;
        };
        if metrics.content_rows == 0 || metrics.height == 0 {
            return;
        }

        // A one-row sentinel either intersects the extended viewport or it
        // does not, so the fraction is 0.0 or 1.0; a zero threshold still
        // requires an actual intersection.
        let intersects = match edge {
            Edge::Start => metrics.offset <= self.margin_rows,
            Edge::End => metrics.offset + metrics.height + self.margin_rows >= metrics.content_rows,
        };
        let fraction = if intersects { 1.0 } else { 0.0 };
        if fraction >= self.threshold.max(f64::EPSILON) {
            on_boundary();
        }
    }
}

impl BoundaryWatcher for ViewportWatcher {
    fn attach(&mut self, edge: Edge, on_boundary: BoundaryCallback) {
        self.attachment = Some((edge, on_boundary));
    }

    fn detach(&mut self) {
        self.attachment = None;
    }

    fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }
}

/// Explicit load-more fallback.
///
/// Fires the callback on demand (a key binding, a button) so windowing
/// keeps working on platforms without a scroll-proximity primitive.
#[derive(Default)]
pub struct ManualTrigger {
    attachment: Option<(Edge, BoundaryCallback)>,
}

impl ManualTrigger {
    /// Create a detached trigger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the callback, if attached. Returns whether it fired.
    pub fn trigger(&mut self) -> bool {
        match self.attachment.as_mut() {
            Some((_, on_boundary)) => {
                on_boundary();
                true
            }
            None => false,
        }
    }
}

impl BoundaryWatcher for ManualTrigger {
    fn attach(&mut self, edge: Edge, on_boundary: BoundaryCallback) {
        self.attachment = Some((edge, on_boundary));
    }

    fn detach(&mut self) {
        self.attachment = None;
    }

    fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }
}

/// Shared latch set by a watcher callback and drained by the event loop.
///
/// Watcher callbacks cannot borrow the window controller directly (the
/// event loop already holds it), so the callback records the signal here
/// and the loop converts it into a growth request on its next pass. Each
/// call to [`callback`](Self::callback) produces a fresh binding, which is
/// what gets replaced on re-attach.
#[derive(Clone, Default)]
pub struct SignalLatch {
    fired: Rc<Cell<bool>>,
}

impl SignalLatch {
    /// Create an unfired latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a callback that sets the latch.
    #[must_use]
    pub fn callback(&self) -> BoundaryCallback {
        let fired = Rc::clone(&self.fired);
        Box::new(move || fired.set(true))
    }

    /// Drain the latch, returning whether it had fired.
    pub fn take(&self) -> bool {
        self.fired.replace(false)
    }
}
