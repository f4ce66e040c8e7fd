//! Results list for the filtered listings.

use crate::ui::Theme;
use crate::ui::format::{format_rooms, format_usd};
use casa_core::Listing;
use casa_state::Dashboard;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct ListingList;

impl ListingList {
    pub fn title(dashboard: &Dashboard) -> String {
        if dashboard.is_loading() {
            " Loading… ".to_string()
        } else {
            format!(" {} results ", dashboard.filtered_len())
        }
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        dashboard: &Dashboard,
        is_active: bool,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border(is_active)))
            .title(Self::title(dashboard));

        if dashboard.is_loading() {
            // Skeleton rows
            let rows: Vec<Line> = (0..area.height.saturating_sub(2) / 2)
                .map(|_| {
                    Line::from(Span::styled(
                        "░░░░░░░░  ░░░░░░░░░░░░░░░░",
                        Style::default().fg(theme.muted),
                    ))
                })
                .collect();
            frame.render_widget(Paragraph::new(rows).block(block), area);
            return;
        }

        if dashboard.filtered_len() == 0 {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No listings match these filters",
                Style::default().fg(theme.muted),
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let details_id = dashboard.effective_details_id();
        let items: Vec<ListItem> = dashboard
            .filtered()
            .map(|listing| list_item(listing, details_id == Some(listing.id.as_str()), theme))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        let mut list_state = ListState::default();
        list_state.select(dashboard.selected_position());

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

fn list_item<'a>(listing: &'a Listing, is_open: bool, theme: &Theme) -> ListItem<'a> {
    let marker = if is_open { "▶ " } else { "  " };
    let first = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.active)),
        Span::styled(
            format_usd(listing.price_usd),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} bd · {} ba · {:.0} m²",
                format_rooms(listing.bedrooms),
                format_rooms(listing.bathrooms),
                listing.area_m2
            ),
            Style::default().fg(theme.muted),
        ),
    ]);
    let second = Line::from(vec![
        Span::raw("  "),
        Span::styled(listing.title.as_str(), Style::default().fg(theme.foreground)),
        Span::styled(
            format!("  {}", listing.location()),
            Style::default().fg(theme.muted),
        ),
    ]);
    ListItem::new(vec![first, second])
}
