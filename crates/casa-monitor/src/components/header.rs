//! Header component with progress bar.

use crate::app::ViewMode;
use crate::components::ViewTabs;
use crate::ui::Theme;
use casa_scrape::ProcessMonitor;
use casa_state::Dashboard;
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge},
};

pub struct Header;

impl Header {
    /// Render the header: view tabs, clock, and a gauge for the active view.
    ///
    /// The listings gauge shows how much of the collection the filters let
    /// through; the admin gauge shows finished processes.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view_mode: ViewMode,
        dashboard: &Dashboard,
        monitor: &ProcessMonitor,
        theme: &Theme,
    ) {
        let datetime = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let datetime_line = Line::from(Span::styled(datetime, Style::default().fg(theme.warning)))
            .alignment(Alignment::Right);

        let mut title = vec![Span::raw(" casa "), Span::styled("│", Style::default().fg(theme.muted))];
        title.extend(ViewTabs::title_line(view_mode, theme).spans);

        let (done, total, label) = match view_mode {
            ViewMode::Listings => {
                let total = dashboard.listings().len();
                if dashboard.is_loading() {
                    (0, total, "Loading listings…".to_string())
                } else {
                    let shown = dashboard.filtered_len();
                    (shown, total, format!("{}/{} listings", shown, total))
                }
            }
            ViewMode::Admin => {
                let counts = monitor.counts();
                let finished = counts.success + counts.failed;
                let label = format!(
                    "{}/{} done  {} running  {} failed",
                    finished, counts.total, counts.running, counts.failed
                );
                (finished, counts.total, label)
            }
        };

        let percent = if total > 0 {
            ((done as f64 / total as f64) * 100.0).min(100.0) as u16
        } else {
            0
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.muted))
                    .title(Line::from(title))
                    .title_top(datetime_line),
            )
            .gauge_style(Style::default().fg(theme.success))
            .percent(percent)
            .label(label);

        frame.render_widget(gauge, area);
    }
}
