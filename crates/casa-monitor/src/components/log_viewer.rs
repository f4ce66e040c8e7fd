//! Log viewer component for a process's live output.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Scroll state for the log panel.
///
/// The lines themselves live on the process; this only tracks position.
#[derive(Debug, Clone)]
pub struct LogViewerState {
    /// Current scroll offset (0-indexed line number)
    pub scroll_offset: usize,
    /// Follow mode - keep the newest lines in view
    pub follow_mode: bool,
}

impl Default for LogViewerState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            follow_mode: true,
        }
    }
}

impl LogViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self, total: usize) {
        if total > 0 {
            self.scroll_offset = (self.scroll_offset + 1).min(total - 1);
        }
        self.follow_mode = false;
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.follow_mode = false;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.follow_mode = false;
    }

    pub fn scroll_to_bottom(&mut self, total: usize) {
        self.scroll_offset = total.saturating_sub(1);
        self.follow_mode = false;
    }

    pub fn toggle_follow(&mut self, total: usize) {
        let follow = !self.follow_mode;
        if follow {
            self.scroll_to_bottom(total);
        }
        self.follow_mode = follow;
    }

    /// First visible line for the given viewport height.
    pub fn start(&self, total: usize, viewport_height: usize) -> usize {
        if self.follow_mode {
            total.saturating_sub(viewport_height)
        } else {
            self.scroll_offset.min(total.saturating_sub(1))
        }
    }

    /// Get the visible slice of `lines` for the given viewport height.
    pub fn visible_lines<'a>(&self, lines: &'a [String], viewport_height: usize) -> &'a [String] {
        if lines.is_empty() {
            return &[];
        }
        let start = self.start(lines.len(), viewport_height);
        let end = (start + viewport_height).min(lines.len());
        &lines[start..end]
    }

    /// Get scroll position information.
    pub fn scroll_info(&self, total: usize, viewport_height: usize) -> String {
        if total == 0 {
            return "0/0".to_string();
        }
        format!("{}/{}", self.start(total, viewport_height) + 1, total)
    }
}

/// Log viewer component.
pub struct LogViewer;

impl LogViewer {
    /// Render a process's log lines as a panel.
    pub fn render_panel(
        frame: &mut Frame,
        area: Rect,
        process_id: Option<&str>,
        lines: &[String],
        state: &LogViewerState,
        is_active: bool,
        theme: &Theme,
    ) {
        let content_height = area.height.saturating_sub(2) as usize;

        let follow_indicator = if state.follow_mode { " [follow]" } else { "" };
        let title = match process_id {
            Some(id) => format!(" Logs: live output for {}{} ", id, follow_indicator),
            None => " Logs ".to_string(),
        };

        let visible = state.visible_lines(lines, content_height);

        let content: Vec<Line> = if process_id.is_none() {
            vec![Line::from(Span::styled(
                "Select a process to see its output",
                Style::default().fg(theme.muted),
            ))]
        } else if visible.is_empty() {
            vec![Line::from(Span::styled(
                "(waiting for log output...)",
                Style::default().fg(theme.muted),
            ))]
        } else {
            visible
                .iter()
                .map(|line| {
                    let style = if line.contains("Done") {
                        Style::default().fg(theme.success)
                    } else if line.contains("ERROR") || line.contains("Error") {
                        Style::default().fg(theme.error)
                    } else {
                        Style::default().fg(theme.foreground)
                    };
                    Line::from(Span::styled(line.as_str(), style))
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border(is_active)))
            .title(title)
            .title_style(Style::default().fg(theme.highlight))
            .title_bottom(format!(" {} ", state.scroll_info(lines.len(), content_height)));

        frame.render_widget(Paragraph::new(content).block(block), area);

        if lines.len() > content_height {
            let mut scrollbar_state = ScrollbarState::new(lines.len())
                .position(state.start(lines.len(), content_height));

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }
}
