//! Details panel for the listing opened from the map or results.

use crate::ui::Theme;
use crate::ui::format::{format_rooms, format_usd};
use casa_core::{Listing, Operation};
use casa_state::Dashboard;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct ListingDetail;

impl ListingDetail {
    pub fn render(frame: &mut Frame, area: Rect, dashboard: &Dashboard, theme: &Theme) {
        let content = if dashboard.is_loading() {
            vec![Line::from(Span::styled(
                "Loading…",
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            ))]
        } else {
            match dashboard.details_listing() {
                Some(listing) => build_detail_lines(listing, theme),
                None => vec![
                    Line::from(Span::styled(
                        "Select a listing",
                        Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Click a listing on the map or in the results (enter) to see its details.",
                        Style::default().fg(theme.muted),
                    )),
                ],
            }
        };

        let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.muted))
                .title(" Details "),
        );

        frame.render_widget(paragraph, area);
    }
}

fn build_detail_lines<'a>(listing: &'a Listing, theme: &Theme) -> Vec<Line<'a>> {
    let operation_color = match listing.operation {
        Operation::Sale => theme.highlight,
        Operation::Rent => theme.info,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", listing.operation.label()),
                Style::default().fg(operation_color).add_modifier(Modifier::REVERSED),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", listing.property_type.label()),
                Style::default().fg(theme.muted).add_modifier(Modifier::REVERSED),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            listing.title.as_str(),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(listing.location(), Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled(
            format_usd(listing.price_usd),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let facts = [
        ("Bedrooms", format_rooms(listing.bedrooms)),
        ("Bathrooms", format_rooms(listing.bathrooms)),
        ("Area", format!("{:.0} m²", listing.area_m2)),
        ("Coordinates", format!("{:.4}, {:.4}", listing.lat, listing.lng)),
    ];
    for (label, value) in facts {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", label), Style::default().fg(theme.muted)),
            Span::styled(value, Style::default().fg(theme.foreground)),
        ]));
    }

    if let Some(ref url) = listing.image_url {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Photo       ", Style::default().fg(theme.muted)),
            Span::styled(url.as_str(), Style::default().fg(theme.info)),
        ]));
    }

    lines
}
