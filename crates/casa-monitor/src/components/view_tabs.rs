//! View tabs component - generates title with inline tab selection.

use crate::app::ViewMode;
use crate::ui::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

pub struct ViewTabs;

impl ViewTabs {
    /// Generate a title Line with inline tab selection.
    /// Returns something like: " \[Listings\] Admin "
    pub fn title_line(view_mode: ViewMode, theme: &Theme) -> Line<'static> {
        let tabs = [("Listings", ViewMode::Listings), ("Admin", ViewMode::Admin)];

        let mut spans = vec![Span::raw(" ")];

        for (i, (name, mode)) in tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }

            if *mode == view_mode {
                spans.push(Span::styled(
                    format!("[{}]", name),
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    name.to_string(),
                    Style::default().fg(theme.muted),
                ));
            }
        }

        spans.push(Span::raw(" "));

        Line::from(spans)
    }
}
