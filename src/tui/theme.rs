//! TUI theming and colors.

use ratatui::style::{Color, Modifier, Style};

/// Application theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Name of the theme.
    pub name: String,
    /// Foreground color.
    pub foreground: Color,
    /// Primary accent color.
    pub primary: Color,
    /// Border color.
    pub border: Color,
    /// Summary line color.
    pub summary: Color,
    /// Timestamp color.
    pub timestamp: Color,
    /// Load-more sentinel color.
    pub sentinel: Color,
    /// Error color.
    pub error: Color,
    /// Palette rotated across participants for author headers.
    pub participants: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            foreground: Color::White,
            primary: Color::Cyan,
            border: Color::DarkGray,
            summary: Color::Gray,
            timestamp: Color::DarkGray,
            sentinel: Color::DarkGray,
            error: Color::Red,
            participants: vec![
                Color::Green,
                Color::Blue,
                Color::Magenta,
                Color::Yellow,
                Color::Cyan,
                Color::LightRed,
                Color::LightGreen,
                Color::LightBlue,
            ],
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            foreground: Color::Black,
            primary: Color::Blue,
            border: Color::Gray,
            summary: Color::DarkGray,
            timestamp: Color::Gray,
            sentinel: Color::Gray,
            error: Color::Red,
            participants: vec![
                Color::Green,
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Cyan,
            ],
        }
    }

    /// Create a high contrast theme.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            foreground: Color::White,
            primary: Color::Yellow,
            border: Color::White,
            summary: Color::White,
            timestamp: Color::White,
            sentinel: Color::Yellow,
            error: Color::Red,
            participants: vec![Color::Yellow, Color::Cyan, Color::Green, Color::Magenta],
        }
    }

    /// Get theme by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" | "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Stable color for the participant at the given position.
    pub fn participant_color(&self, position: usize) -> Color {
        self.participants[position % self.participants.len()]
    }

    /// Get style for borders.
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for the summary line.
    pub fn summary_style(&self) -> Style {
        Style::default().fg(self.summary)
    }

    /// Get style for timestamps.
    pub fn timestamp_style(&self) -> Style {
        Style::default().fg(self.timestamp)
    }

    /// Get style for the load-more sentinel row.
    pub fn sentinel_style(&self) -> Style {
        Style::default()
            .fg(self.sentinel)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for an author header.
    pub fn author_style(&self, color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Available themes list.
pub fn available_themes() -> Vec<&'static str> {
    vec!["dark", "light", "high-contrast"]
}
