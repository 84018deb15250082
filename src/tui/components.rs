//! Reusable TUI components.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::DisplayConfig;
use crate::model::Message;
use crate::view::{Edge, FilterMode, ScrollDirection, ViewFilter, ViewSlice};

use super::theme::Theme;

/// Build the summary line for the current view, or `None` when the
/// transcript is empty (no summary is displayed then).
pub fn summary_line(
    slice: &ViewSlice<'_>,
    filter: &ViewFilter,
    transcript_empty: bool,
    theme: &Theme,
) -> Option<Line<'static>> {
    if transcript_empty {
        return None;
    }

    let text = match filter.mode {
        FilterMode::Index => {
            let mut text = format!(
                "Showing {} out of {} messages",
                slice.shown_count(),
                slice.total_count
            );
            if slice.has_more {
                let hint = match filter.direction {
                    ScrollDirection::Forward => " - Scroll down to load more",
                    ScrollDirection::Reverse => " - Scroll up to load more",
                };
                text.push_str(hint);
            }
            text
        }
        FilterMode::Date => {
            let start = filter
                .range
                .start
                .map_or("the beginning".to_string(), |d| d.to_string());
            let end = filter.range.end.map_or("the end".to_string(), |d| d.to_string());
            format!(
                "Showing messages from {start} to {end} ({} messages)",
                slice.shown_count()
            )
        }
    };

    Some(Line::from(Span::styled(text, theme.summary_style())))
}

/// The one-row load-more sentinel.
pub fn sentinel_line(edge: Edge, theme: &Theme) -> Line<'static> {
    let text = match edge {
        Edge::Start => "··· older messages ···",
        Edge::End => "··· more messages ···",
    };
    Line::from(Span::styled(text.to_string(), theme.sentinel_style()))
}

/// Render one message into display lines.
///
/// A header row carries the author (in its participant color) and the
/// timestamp; consecutive messages from the same author skip the header,
/// mirroring a compact chat layout.
pub fn message_lines(
    message: &Message,
    author_color: Color,
    same_author_as_previous: bool,
    display: &DisplayConfig,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !same_author_as_previous {
        let mut spans = vec![Span::styled(
            message.author_or_empty().to_string(),
            theme.author_style(author_color),
        )];
        if display.timestamps {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                message.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                theme.timestamp_style(),
            ));
        }
        lines.push(Line::from(spans));
    }

    let content = truncated(&message.content, display.truncate_at);
    for text_line in content.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {text_line}"),
            Style::default().fg(theme.foreground),
        )));
    }

    lines
}

/// Truncate long content, marking the cut.
fn truncated(text: &str, at: usize) -> String {
    if at == 0 || text.chars().count() <= at {
        return text.to_string();
    }
    let mut out: String = text.chars().take(at).collect();
    out.push('…');
    out
}

/// A status bar component.
pub struct StatusBar<'a> {
    left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new() -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
        }
    }

    /// Add left-aligned content.
    pub fn left(mut self, spans: Vec<Span<'a>>) -> Self {
        self.left = spans;
        self
    }

    /// Add right-aligned content.
    pub fn right(mut self, spans: Vec<Span<'a>>) -> Self {
        self.right = spans;
        self
    }

    /// Render the status bar.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let left_text: String = self.left.iter().map(|s| s.content.as_ref()).collect();
        let right_text: String = self.right.iter().map(|s| s.content.as_ref()).collect();

        let padding = (area.width as usize)
            .saturating_sub(left_text.len() + right_text.len())
            .max(1);
        let padding_str = " ".repeat(padding);

        let line = Line::from(vec![
            Span::raw(left_text),
            Span::raw(padding_str),
            Span::styled(right_text, Style::default().fg(Color::Gray)),
        ]);

        let paragraph = Paragraph::new(vec![line])
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));

        f.render_widget(paragraph, area);
    }
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DateRange;

    fn empty_slice() -> ViewSlice<'static> {
        ViewSlice {
            messages: Vec::new(),
            total_count: 0,
            is_limited: false,
            has_more: false,
            sentinel: None,
        }
    }

    #[test]
    fn test_no_summary_for_empty_transcript() {
        let filter = ViewFilter::default();
        let theme = Theme::dark();
        assert!(summary_line(&empty_slice(), &filter, true, &theme).is_none());
    }

    #[test]
    fn test_index_summary_mentions_counts() {
        let slice = ViewSlice {
            messages: Vec::new(),
            total_count: 250,
            is_limited: true,
            has_more: true,
            sentinel: Some(Edge::End),
        };
        let filter = ViewFilter::default();
        let theme = Theme::dark();
        let line = summary_line(&slice, &filter, false, &theme).unwrap();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("0 out of 250"));
        assert!(text.contains("load more"));
    }

    #[test]
    fn test_date_summary_mentions_range() {
        let slice = empty_slice();
        let filter = ViewFilter {
            mode: FilterMode::Date,
            range: DateRange {
                start: None,
                end: chrono::NaiveDate::from_ymd_opt(2024, 3, 2),
            },
            direction: ScrollDirection::Forward,
        };
        let theme = Theme::dark();
        let line = summary_line(&slice, &filter, false, &theme).unwrap();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("from the beginning to 2024-03-02"));
    }

    #[test]
    fn test_truncated_marks_cut() {
        assert_eq!(truncated("hello", 0), "hello");
        assert_eq!(truncated("hello", 10), "hello");
        assert_eq!(truncated("hello world", 5), "hello…");
    }
}
