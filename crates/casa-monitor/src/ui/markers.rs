//! Map marker styles.

use casa_core::{Operation, PropertyType};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Everything a marker's look depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerKey {
    pub property_type: PropertyType,
    pub operation: Operation,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub glyph: &'static str,
    pub style: Style,
}

/// Grow-only cache of marker styles.
///
/// The key space is 4 property types x 2 operations x selected, so entries
/// are never evicted.
#[derive(Debug, Default)]
pub struct MarkerCache {
    entries: HashMap<MarkerKey, MarkerStyle>,
}

impl MarkerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: MarkerKey) -> &MarkerStyle {
        self.entries.entry(key).or_insert_with(|| build_style(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_style(key: MarkerKey) -> MarkerStyle {
    let glyph = match key.property_type {
        PropertyType::Apartment => "▣",
        PropertyType::House => "⌂",
        PropertyType::Terrain => "▒",
        PropertyType::Business => "$",
    };

    let color = match key.operation {
        Operation::Sale => Color::Cyan,
        Operation::Rent => Color::Magenta,
    };

    let style = if key.selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(color)
    };

    MarkerStyle { glyph, style }
}
