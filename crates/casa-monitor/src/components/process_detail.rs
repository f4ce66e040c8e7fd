//! Inspected process panel: status, progress and screenshot preview.

use crate::components::process_list::status_color;
use crate::ui::Theme;
use crate::ui::format::{format_bytes, format_when};
use casa_scrape::{AdminProcess, Preview};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub struct ProcessDetail;

impl ProcessDetail {
    pub fn render(frame: &mut Frame, area: Rect, process: Option<&AdminProcess>, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(" Process ");

        let Some(process) = process else {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No process selected",
                Style::default().fg(theme.muted),
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let paragraph = Paragraph::new(build_detail_lines(process, theme)).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[0]);

        let max = process.kind().ceiling();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(status_color(process.status, theme)))
            .ratio(process.progress())
            .label(format!("{}/{} items", process.scraped_count.min(max), max));
        frame.render_widget(gauge, chunks[1]);
    }
}

pub fn preview_text(process: &AdminProcess) -> String {
    match process.preview() {
        Preview::Inline { mime, bytes } => format!("inline {} ({})", mime, format_bytes(bytes)),
        Preview::Remote(url) => url.to_string(),
        Preview::Placeholder => "No screenshot yet".to_string(),
    }
}

fn build_detail_lines<'a>(process: &'a AdminProcess, theme: &Theme) -> Vec<Line<'a>> {
    let label = |text: &'static str| Span::styled(format!("{:<10}", text), Style::default().fg(theme.muted));

    let mut lines = vec![
        Line::from(Span::styled(
            process.title.as_str(),
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            label("Status"),
            Span::styled(
                format!("{} {}", process.status.symbol(), process.status.label()),
                Style::default()
                    .fg(status_color(process.status, theme))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Step"),
            Span::styled(process.current_step.as_str(), Style::default().fg(theme.foreground)),
        ]),
        Line::from(vec![
            label("Scraped"),
            Span::styled(process.scraped_count.to_string(), Style::default().fg(theme.foreground)),
        ]),
        Line::from(vec![
            label("Started"),
            Span::styled(format_when(&process.started_at), Style::default().fg(theme.foreground)),
        ]),
        Line::from(vec![
            label("URL"),
            Span::styled(process.url.as_str(), Style::default().fg(theme.info)),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Preview"),
            Span::styled(preview_text(process), Style::default().fg(theme.foreground)),
        ]),
    ];

    if !process.screenshot_hint.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<10}", "")),
            Span::styled(
                process.screenshot_hint.as_str(),
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    lines
}
