//! Map panel plotting the filtered listings over Venezuela.

use crate::ui::{MarkerCache, MarkerKey, Theme};
use casa_state::Dashboard;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Map, MapResolution},
    },
};

/// Longitude bounds of the plotted region.
pub const LNG_BOUNDS: [f64; 2] = [-73.6, -59.8];
/// Latitude bounds of the plotted region.
pub const LAT_BOUNDS: [f64; 2] = [0.7, 12.6];

/// A marker ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub lng: f64,
    pub lat: f64,
    pub glyph: &'static str,
    pub style: Style,
}

pub struct ListingMap;

impl ListingMap {
    /// Markers for the visible listings, selected one last so it draws on top.
    pub fn markers(dashboard: &Dashboard, cache: &mut MarkerCache) -> Vec<PlacedMarker> {
        let selected_id = dashboard.effective_selected_id();
        let mut placed: Vec<(bool, PlacedMarker)> = dashboard
            .filtered()
            .map(|listing| {
                let selected = selected_id == Some(listing.id.as_str());
                let marker = cache.get(MarkerKey {
                    property_type: listing.property_type,
                    operation: listing.operation,
                    selected,
                });
                (
                    selected,
                    PlacedMarker {
                        lng: listing.lng,
                        lat: listing.lat,
                        glyph: marker.glyph,
                        style: marker.style,
                    },
                )
            })
            .collect();
        placed.sort_by_key(|(selected, _)| *selected);
        placed.into_iter().map(|(_, m)| m).collect()
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        dashboard: &Dashboard,
        cache: &mut MarkerCache,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(" Map ");

        if dashboard.is_loading() {
            let loading = Paragraph::new(Line::from(Span::styled(
                "Loading map…",
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            )))
            .block(block);
            frame.render_widget(loading, area);
            return;
        }

        let markers = Self::markers(dashboard, cache);
        let coastline = theme.muted;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(LNG_BOUNDS)
            .y_bounds(LAT_BOUNDS)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: coastline,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                for marker in &markers {
                    ctx.print(
                        marker.lng,
                        marker.lat,
                        Span::styled(marker.glyph, marker.style),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casa_core::{Listing, Operation, PropertyType};

    fn listing(id: &str, property_type: PropertyType, operation: Operation) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {id}"),
            city: "Caracas".to_string(),
            state: "Distrito Capital".to_string(),
            price_usd: 100_000,
            bedrooms: 2,
            bathrooms: 1,
            area_m2: 90.0,
            lat: 10.5,
            lng: -66.9,
            operation,
            property_type,
            image_url: None,
        }
    }

    #[test]
    fn test_markers_follow_filter_and_selection() {
        let mut dashboard = Dashboard::new(vec![
            listing("a", PropertyType::Apartment, Operation::Sale),
            listing("b", PropertyType::House, Operation::Rent),
            listing("c", PropertyType::Terrain, Operation::Sale),
        ]);
        dashboard.set_loading(false);
        dashboard.select_listing("b");

        let mut cache = MarkerCache::new();
        let markers = ListingMap::markers(&dashboard, &mut cache);
        assert_eq!(markers.len(), 3);
        // Selected marker drawn last
        assert_eq!(markers[2].glyph, "⌂");
        assert!(markers[2].style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(cache.len(), 3);

        // Same keys again: cache does not grow
        ListingMap::markers(&dashboard, &mut cache);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_loading_has_no_highlight() {
        let dashboard = Dashboard::new(vec![listing("a", PropertyType::House, Operation::Sale)]);
        let mut cache = MarkerCache::new();
        let markers = ListingMap::markers(&dashboard, &mut cache);
        assert_eq!(markers.len(), 1);
        assert!(!markers[0].style.add_modifier.contains(Modifier::REVERSED));
    }
}
