//! Footer component with keyboard shortcuts and status messages.

use crate::app::ViewMode;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Footer {
    pub fn help_text(view_mode: ViewMode) -> &'static str {
        match view_mode {
            ViewMode::Listings => {
                "j/k:nav  enter:details  esc:close  /:search  c:city  p/P:price  b:rooms  0:reset  tab:admin  ?:help  q:quit"
            }
            ViewMode::Admin => {
                "j/k:nav  ^w:panel  t:follow  d:download  y:copy  tab:listings  ?:help  q:quit"
            }
        }
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view_mode: ViewMode,
        status_message: Option<&str>,
        theme: &Theme,
    ) {
        let version = format!("v{}", VERSION);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(version.len() as u16 + 1),
            ])
            .split(area);

        // Status message wins over help
        let left_content = match status_message {
            Some(msg) => Line::from(Span::styled(
                msg.to_string(),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                Self::help_text(view_mode),
                Style::default().fg(theme.muted),
            )),
        };

        frame.render_widget(Paragraph::new(left_content), chunks[0]);

        let version_paragraph = Paragraph::new(Line::from(Span::styled(
            version,
            Style::default().fg(theme.muted),
        )));
        frame.render_widget(version_paragraph, chunks[1]);
    }
}
