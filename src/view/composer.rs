//! Slice selection: filter mode, scroll direction and window state combined.
//!
//! The composer is a pure function over the transcript: date mode restricts
//! the visible set by timestamp and bypasses windowing entirely; index mode
//! exposes the windowed edge of the full collection. In both modes the
//! rendered slice preserves original transcript order.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Message, Transcript};

use super::watcher::Edge;
use super::window::WindowController;

/// Which subsetting strategy is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Positional browsing through an incrementally revealed window.
    #[default]
    Index,
    /// Date-range restriction; the full filtered subset is shown.
    Date,
}

/// Which edge of the collection the window reveals from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Reveal from the start of the collection (oldest first).
    #[default]
    Forward,
    /// Reveal from the end of the collection (newest first).
    Reverse,
}

impl ScrollDirection {
    /// Toggle between forward and reverse.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// The edge of the rendered list that needs the load-more sentinel.
    #[must_use]
    pub fn sentinel_edge(self) -> Edge {
        match self {
            Self::Forward => Edge::End,
            Self::Reverse => Edge::Start,
        }
    }
}

/// An inclusive date range.
///
/// The lower bound is the start of `start`'s day; the upper bound is
/// exclusive at the start of the day after `end`, so the end date is fully
/// included. Either bound may be absent, meaning unbounded on that side.
/// Bounds are interpreted as UTC dates. A range with `start > end` matches
/// nothing, which is a valid (if degenerate) filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range with both bounds set.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether a timestamp falls inside the range.
    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            let lower = start.and_time(NaiveTime::MIN).and_utc();
            if t < lower {
                return false;
            }
        }
        if let Some(end) = self.end {
            // Exclusive upper bound at end + 1 day. A calendar-max end date
            // cannot be advanced and is treated as unbounded above.
            if let Some(after) = end.checked_add_days(Days::new(1)) {
                let upper = after.and_time(NaiveTime::MIN).and_utc();
                if t >= upper {
                    return false;
                }
            }
        }
        true
    }
}

/// Active filter configuration, supplied by the UI boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewFilter {
    /// Which subsetting strategy applies.
    pub mode: FilterMode,
    /// Date bounds, consulted only in date mode.
    pub range: DateRange,
    /// Which edge the window reveals from, consulted only in index mode.
    pub direction: ScrollDirection,
}

/// The composed view: the ordered slice to render plus summary info.
#[derive(Debug)]
pub struct ViewSlice<'a> {
    /// Messages to render, in original transcript order.
    pub messages: Vec<&'a Message>,
    /// Size of the effective subset the slice was cut from.
    pub total_count: usize,
    /// Whether the slice omits part of the effective subset.
    pub is_limited: bool,
    /// Whether the window can reveal more items. Always false in date mode.
    pub has_more: bool,
    /// Where the load-more sentinel belongs, when one is needed.
    pub sentinel: Option<Edge>,
}

impl ViewSlice<'_> {
    /// Number of messages in the rendered slice.
    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.messages.len()
    }
}

/// Compose the rendered slice for the current filter and window state.
///
/// Callers must keep the window initialized for the active subset size
/// (see [`WindowController::initialize`]); the composer only reads it.
#[must_use]
pub fn compose<'a>(
    transcript: &'a Transcript,
    filter: &ViewFilter,
    window: &WindowController,
) -> ViewSlice<'a> {
    match filter.mode {
        FilterMode::Date => {
            let messages: Vec<&Message> = transcript
                .messages()
                .iter()
                .filter(|m| filter.range.contains(m.timestamp))
                .collect();
            let total_count = messages.len();
            ViewSlice {
                messages,
                total_count,
                is_limited: false,
                has_more: false,
                sentinel: None,
            }
        }
        FilterMode::Index => {
            let all = transcript.messages();
            let total_count = all.len();
            let reveal = window.reveal_count().min(total_count);
            let slice = match filter.direction {
                ScrollDirection::Forward => &all[..reveal],
                // Last `reveal` items, still in ascending order.
                ScrollDirection::Reverse => &all[total_count - reveal..],
            };
            let has_more = window.has_more();
            ViewSlice {
                messages: slice.iter().collect(),
                total_count,
                is_limited: reveal != total_count,
                has_more,
                sentinel: has_more.then(|| filter.direction.sentinel_edge()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transcript;
    use chrono::TimeZone;
    use indexmap::IndexMap;
    use std::time::Duration;

    fn transcript(n: usize) -> Transcript {
        let messages = (0..n)
            .map(|i| Message {
                index: 0,
                author: Some(if i % 2 == 0 { "alice" } else { "bob" }.to_string()),
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                content: format!("message {i}"),
                extra: IndexMap::new(),
            })
            .collect();
        Transcript::from_messages(messages)
    }

    fn dated_transcript(days: &[(u32, &str)]) -> Transcript {
        let messages = days
            .iter()
            .map(|(day, content)| Message {
                index: 0,
                author: Some("alice".to_string()),
                timestamp: Utc.with_ymd_and_hms(2024, 3, *day, 12, 0, 0).unwrap(),
                content: (*content).to_string(),
                extra: IndexMap::new(),
            })
            .collect();
        Transcript::from_messages(messages)
    }

    fn window_for(t: &Transcript, page: usize) -> WindowController {
        let mut w = WindowController::new(page, Duration::ZERO);
        w.initialize(t.len(), page);
        w
    }

    fn index_filter(direction: ScrollDirection) -> ViewFilter {
        ViewFilter {
            mode: FilterMode::Index,
            range: DateRange::default(),
            direction,
        }
    }

    #[test]
    fn test_forward_renders_leading_slice() {
        let t = transcript(250);
        let w = window_for(&t, 100);
        let slice = compose(&t, &index_filter(ScrollDirection::Forward), &w);

        assert_eq!(slice.shown_count(), 100);
        assert_eq!(slice.total_count, 250);
        assert_eq!(slice.messages[0].index, 0);
        assert_eq!(slice.messages[99].index, 99);
        assert!(slice.is_limited);
        assert!(slice.has_more);
        assert_eq!(slice.sentinel, Some(Edge::End));
    }

    #[test]
    fn test_reverse_renders_trailing_slice_ascending() {
        let t = transcript(250);
        let w = window_for(&t, 100);
        let slice = compose(&t, &index_filter(ScrollDirection::Reverse), &w);

        assert_eq!(slice.shown_count(), 100);
        assert_eq!(slice.messages[0].index, 150);
        assert_eq!(slice.messages[99].index, 249);
        assert_eq!(slice.sentinel, Some(Edge::Start));
    }

    #[test]
    fn test_direction_switch_keeps_reveal_count() {
        let t = transcript(300);
        let mut w = window_for(&t, 100);
        assert!(w.request_growth());

        let forward = compose(&t, &index_filter(ScrollDirection::Forward), &w);
        let reverse = compose(&t, &index_filter(ScrollDirection::Reverse), &w);

        assert_eq!(forward.shown_count(), 200);
        assert_eq!(reverse.shown_count(), 200);
        assert_eq!(reverse.messages[0].index, 100);
    }

    #[test]
    fn test_exhausted_window_has_no_sentinel() {
        let t = transcript(50);
        let w = window_for(&t, 100);
        let slice = compose(&t, &index_filter(ScrollDirection::Forward), &w);

        assert_eq!(slice.shown_count(), 50);
        assert!(!slice.is_limited);
        assert!(!slice.has_more);
        assert_eq!(slice.sentinel, None);
    }

    #[test]
    fn test_date_mode_bypasses_windowing() {
        let t = dated_transcript(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        // Window deliberately tiny: date mode must ignore it.
        let w = window_for(&t, 1);
        let filter = ViewFilter {
            mode: FilterMode::Date,
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            ),
            direction: ScrollDirection::Forward,
        };
        let slice = compose(&t, &filter, &w);

        assert_eq!(slice.shown_count(), 2);
        assert_eq!(slice.total_count, 2);
        assert!(!slice.is_limited);
        assert!(!slice.has_more);
        assert_eq!(slice.sentinel, None);
        assert_eq!(slice.messages[0].content, "b");
    }

    #[test]
    fn test_date_end_is_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        // Last instant of the end date is in; start of the next day is out.
        let end_of_day = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 59).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        assert!(range.contains(end_of_day));
        assert!(!range.contains(next_day));
    }

    #[test]
    fn test_date_open_bounds() {
        let only_start = DateRange {
            start: Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
            end: None,
        };
        assert!(only_start.contains(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
        assert!(!only_start.contains(Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap()));

        let only_end = DateRange {
            start: None,
            end: Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
        };
        assert!(only_end.contains(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()));
        assert!(!only_end.contains(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let t = dated_transcript(&[(1, "a"), (2, "b")]);
        let w = window_for(&t, 100);
        let filter = ViewFilter {
            mode: FilterMode::Date,
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ),
            direction: ScrollDirection::Forward,
        };
        let slice = compose(&t, &filter, &w);
        assert_eq!(slice.shown_count(), 0);
        assert_eq!(slice.total_count, 0);
    }

    #[test]
    fn test_mode_switch_restores_full_collection_window() {
        let t = transcript(300);
        let w = window_for(&t, 100);

        // Mid-window in index mode.
        let slice = compose(&t, &index_filter(ScrollDirection::Forward), &w);
        assert_eq!(slice.shown_count(), 100);

        // Date mode shows the full filtered subset immediately.
        let date_filter = ViewFilter {
            mode: FilterMode::Date,
            range: DateRange::default(),
            direction: ScrollDirection::Forward,
        };
        let slice = compose(&t, &date_filter, &w);
        assert_eq!(slice.shown_count(), 300);
        assert!(!slice.is_limited);

        // Back to index: window state is created fresh from the full
        // collection size.
        let w = window_for(&t, 100);
        let slice = compose(&t, &index_filter(ScrollDirection::Forward), &w);
        assert_eq!(slice.shown_count(), 100);
        assert!(slice.has_more);
    }

    #[test]
    fn test_empty_collection_yields_empty_slice() {
        let t = Transcript::default();
        let w = window_for(&t, 100);
        let slice = compose(&t, &index_filter(ScrollDirection::Forward), &w);

        assert_eq!(slice.shown_count(), 0);
        assert!(!slice.has_more);
        assert_eq!(slice.sentinel, None);
    }

    #[test]
    fn test_zero_reveal_count_yields_empty_slice() {
        let t = transcript(10);
        // Uninitialized window: reveal count is zero.
        let w = WindowController::new(100, Duration::ZERO);
        let slice = compose(&t, &index_filter(ScrollDirection::Reverse), &w);
        assert_eq!(slice.shown_count(), 0);
        assert_eq!(slice.total_count, 10);
        assert!(slice.is_limited);
    }
}
