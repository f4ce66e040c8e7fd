//! Listing records.

use serde::{Deserialize, Serialize};

/// Whether a property is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sale,
    Rent,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sale => "For sale",
            Self::Rent => "For rent",
        }
    }
}

/// Property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Terrain,
    Business,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Terrain => "Terrain",
            Self::Business => "Business",
        }
    }
}

/// A single real-estate property record.
///
/// Listings are loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier
    pub id: String,

    pub title: String,
    pub city: String,
    pub state: String,

    /// Asking price (or monthly rent) in whole US dollars
    pub price_usd: u64,

    #[serde(default)]
    pub bedrooms: u32,

    #[serde(default)]
    pub bathrooms: u32,

    /// Built or lot area in square meters
    pub area_m2: f64,

    pub lat: f64,
    pub lng: f64,

    pub operation: Operation,
    pub property_type: PropertyType,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing {
    /// Space-joined title, city and state, lowercased for free-text search.
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.title, self.city, self.state).to_lowercase()
    }

    /// "City, State" line used by cards and popups.
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}
