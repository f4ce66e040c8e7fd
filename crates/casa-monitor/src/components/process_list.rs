//! Scrape process list.

use crate::ui::Theme;
use casa_scrape::{ProcessMonitor, ProcessStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct ProcessList;

pub fn status_color(status: ProcessStatus, theme: &Theme) -> Color {
    match status {
        ProcessStatus::Queued => theme.info,
        ProcessStatus::Running => theme.warning,
        ProcessStatus::Success => theme.success,
        ProcessStatus::Failed => theme.error,
    }
}

impl ProcessList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        monitor: &ProcessMonitor,
        is_active: bool,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border(is_active)))
            .title(format!(" Processes ({}) ", monitor.processes().len()));

        if monitor.processes().is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No scrape processes",
                Style::default().fg(theme.muted),
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = monitor
            .processes()
            .iter()
            .map(|process| {
                let style = Style::default().fg(status_color(process.status, theme));
                let progress = format!(" {:>3}%", (process.progress() * 100.0).round() as u16);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{} ", process.status.symbol()), style),
                        Span::styled(
                            process.title.as_str(),
                            Style::default().fg(theme.foreground),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled(
                            format!("  {} · {}", process.id, process.status.label()),
                            Style::default().fg(theme.muted),
                        ),
                        Span::styled(progress, style),
                    ]),
                ])
            })
            .collect();

        let selected = monitor
            .inspected_id()
            .and_then(|id| monitor.processes().iter().position(|p| p.id == id));

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.muted)
                .add_modifier(Modifier::BOLD),
        );

        let mut list_state = ListState::default();
        list_state.select(selected);

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
