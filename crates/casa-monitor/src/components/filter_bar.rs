//! Filter bar showing the active criteria and any field being edited.

use crate::app::FilterInput;
use crate::ui::Theme;
use crate::ui::format::format_usd;
use casa_core::{ALL_CITIES, FilterCriteria};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct FilterBar;

/// Upper price bound for display; an unbounded maximum reads "any".
fn max_price_text(max: u64) -> String {
    if max == u64::MAX {
        "any".to_string()
    } else {
        format_usd(max)
    }
}

fn rooms_text(count: u32) -> String {
    if count == 0 {
        "any".to_string()
    } else {
        format!("{}+", count)
    }
}

impl FilterBar {
    /// Label/value pairs describing the criteria, in display order.
    pub fn fields(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
        let query = if criteria.query.trim().is_empty() {
            "—".to_string()
        } else {
            format!("\"{}\"", criteria.query)
        };
        let city = if criteria.city == ALL_CITIES {
            "All cities".to_string()
        } else {
            criteria.city.clone()
        };

        vec![
            ("Search", query),
            ("City", city),
            (
                "Price",
                format!(
                    "{} – {}",
                    format_usd(criteria.min_price),
                    max_price_text(criteria.max_price)
                ),
            ),
            ("Beds", rooms_text(criteria.bedrooms)),
            ("Baths", rooms_text(criteria.bathrooms)),
        ]
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        criteria: &FilterCriteria,
        editing: Option<(FilterInput, &str)>,
        theme: &Theme,
    ) {
        let line = match editing {
            Some((field, buffer)) => Line::from(vec![
                Span::styled(
                    format!("{}: ", field.label()),
                    Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
                ),
                Span::styled(buffer.to_string(), Style::default().fg(theme.foreground)),
                Span::styled("▏", Style::default().fg(theme.active)),
                Span::styled(
                    "  enter:apply  esc:cancel",
                    Style::default().fg(theme.muted),
                ),
            ]),
            None => {
                let mut spans = Vec::new();
                for (i, (label, value)) in Self::fields(criteria).into_iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled("  │  ", Style::default().fg(theme.muted)));
                    }
                    spans.push(Span::styled(
                        format!("{}: ", label),
                        Style::default().fg(theme.muted),
                    ));
                    spans.push(Span::styled(value, Style::default().fg(theme.foreground)));
                }
                Line::from(spans)
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border(editing.is_some())))
            .title(" Filters ");

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
