//! Color themes.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub highlight: Color,
    pub active: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            muted: Color::DarkGray,
            highlight: Color::Cyan,
            active: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            highlight: Color::Blue,
            active: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
        }
    }

    /// Border color for a panel depending on keyboard focus.
    pub fn border(&self, is_active: bool) -> Color {
        if is_active { self.active } else { self.muted }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
