//! Colors for the TUI

use ratatui::style::Color;

/// Theme colors for all UI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Borders
    pub border: Color,
    pub border_focused: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accents
    pub accent: Color,
    pub highlight_bg: Color,

    // Message colors
    pub user_fg: Color,
    pub ai_fg: Color,
    pub placeholder_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Default dark palette (Catppuccin Mocha tones)
    pub fn dark() -> Self {
        Self {
            border: Color::Rgb(49, 50, 68),
            border_focused: Color::Rgb(137, 180, 250),

            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            text_muted: Color::Rgb(108, 112, 134),

            accent: Color::Rgb(203, 166, 247),
            highlight_bg: Color::Rgb(69, 71, 90),

            user_fg: Color::Rgb(137, 180, 250),
            ai_fg: Color::Rgb(166, 227, 161),
            placeholder_fg: Color::Rgb(249, 226, 175),
        }
    }
}
