//! Filter criteria and the listing predicate.

use crate::listing::Listing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// City value meaning "no city constraint".
pub const ALL_CITIES: &str = "All";

/// Default upper price bound.
pub const DEFAULT_MAX_PRICE: u64 = 400_000;

/// Minimum price choices offered by the search bar.
pub const MIN_PRICE_PRESETS: [u64; 6] = [0, 50_000, 75_000, 100_000, 150_000, 250_000];

/// Maximum price choices offered by the search bar.
pub const MAX_PRICE_PRESETS: [u64; 5] = [DEFAULT_MAX_PRICE, 75_000, 100_000, 150_000, 250_000];

/// (bedrooms, bathrooms) minimums offered by the search bar.
pub const ROOM_PRESETS: [(u32, u32); 6] = [(0, 0), (1, 1), (2, 1), (2, 2), (3, 2), (4, 3)];

/// User-controlled filter state.
///
/// Replaced wholesale on every edit. `min_price > max_price` is allowed and
/// simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search over title, city and state
    pub query: String,
    /// Exact city, or [`ALL_CITIES`]
    pub city: String,
    /// Inclusive lower price bound
    pub min_price: u64,
    /// Inclusive upper price bound
    pub max_price: u64,
    /// Minimum bedrooms, 0 = any
    pub bedrooms: u32,
    /// Minimum bathrooms, 0 = any
    pub bathrooms: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            city: ALL_CITIES.to_string(),
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            bedrooms: 0,
            bathrooms: 0,
        }
    }
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_price(mut self, min_price: u64, max_price: u64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_rooms(mut self, bedrooms: u32, bathrooms: u32) -> Self {
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    /// Normalized search needle, or `None` when the query is blank.
    fn needle(&self) -> Option<String> {
        let query = self.query.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        }
    }
}

/// Evaluate the filter predicate for one listing.
///
/// A listing matches when every constraint holds: city, both price bounds,
/// bedroom and bathroom minimums, and the free-text query.
pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    if criteria.city != ALL_CITIES && listing.city != criteria.city {
        return false;
    }
    if listing.price_usd < criteria.min_price || listing.price_usd > criteria.max_price {
        return false;
    }
    if criteria.bedrooms > 0 && listing.bedrooms < criteria.bedrooms {
        return false;
    }
    if criteria.bathrooms > 0 && listing.bathrooms < criteria.bathrooms {
        return false;
    }

    match criteria.needle() {
        Some(needle) => listing.search_haystack().contains(&needle),
        None => true,
    }
}

/// City choices: [`ALL_CITIES`] followed by the distinct cities, sorted.
pub fn city_options(listings: &[Listing]) -> Vec<String> {
    let cities: BTreeSet<&str> = listings.iter().map(|l| l.city.as_str()).collect();
    std::iter::once(ALL_CITIES)
        .chain(cities)
        .map(String::from)
        .collect()
}

fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Coerce text into a lower-bound threshold (min price, bedrooms, bathrooms).
///
/// Blank or non-numeric input yields 0 (no constraint). Negative values clamp
/// to 0 and fractions round up.
pub fn coerce_lower(input: &str) -> u64 {
    match parse_number(input) {
        Some(v) if v > 0.0 => v.ceil() as u64,
        _ => 0,
    }
}

/// Coerce text into an upper price bound.
///
/// Blank or non-numeric input yields `u64::MAX` (no constraint). Negative
/// values clamp to 0 and fractions round down.
pub fn coerce_upper(input: &str) -> u64 {
    match parse_number(input) {
        Some(v) if v > 0.0 => v.floor() as u64,
        Some(_) => 0,
        None => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{Operation, PropertyType};

    fn listing(id: &str, title: &str, city: &str, price: u64, beds: u32, baths: u32) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            city: city.to_string(),
            state: "Miranda".to_string(),
            price_usd: price,
            bedrooms: beds,
            bathrooms: baths,
            area_m2: 90.0,
            lat: 10.4,
            lng: -66.9,
            operation: Operation::Sale,
            property_type: PropertyType::Apartment,
            image_url: None,
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", "Apartamento en Las Mercedes", "Caracas", 120_000, 2, 2),
            listing("b", "Casa en Lechería", "Barcelona", 310_000, 4, 3),
            listing("c", "Terreno en Mérida", "Mérida", 45_000, 0, 0),
            listing("d", "Oficina Los Mercedes Plaza", "Valencia", 80_000, 0, 1),
        ]
    }

    /// Re-evaluate each rule independently and AND them together.
    fn by_rules(l: &Listing, c: &FilterCriteria) -> bool {
        let city = c.city == ALL_CITIES || l.city == c.city;
        let min = l.price_usd >= c.min_price;
        let max = l.price_usd <= c.max_price;
        let beds = c.bedrooms == 0 || l.bedrooms >= c.bedrooms;
        let baths = c.bathrooms == 0 || l.bathrooms >= c.bathrooms;
        let q = c.query.trim().to_lowercase();
        let query = q.is_empty()
            || format!("{} {} {}", l.title, l.city, l.state)
                .to_lowercase()
                .contains(&q);
        city && min && max && beds && baths && query
    }

    #[test]
    fn test_default_criteria_returns_everything_in_order() {
        let listings = sample();
        let criteria = FilterCriteria::default();
        let ids: Vec<&str> = listings
            .iter()
            .filter(|l| matches(l, &criteria))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_trimmed() {
        let listings = sample();
        let criteria = FilterCriteria::default().with_query("  MERCEDES ");
        let ids: Vec<&str> = listings
            .iter()
            .filter(|l| matches(l, &criteria))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_query_spans_title_city_and_state() {
        let l = listing("x", "Quinta", "Caracas", 1, 0, 0);
        assert!(matches(&l, &FilterCriteria::default().with_query("quinta caracas")));
        assert!(matches(&l, &FilterCriteria::default().with_query("caracas miranda")));
        assert!(!matches(&l, &FilterCriteria::default().with_query("valencia")));
    }

    #[test]
    fn test_city_filter() {
        let listings = sample();
        let criteria = FilterCriteria::default().with_city("Barcelona");
        let hits: Vec<_> = listings.iter().filter(|l| matches(l, &criteria)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let l = listing("x", "t", "c", 100_000, 0, 0);
        assert!(matches(&l, &FilterCriteria::default().with_price(100_000, 100_000)));
        assert!(!matches(&l, &FilterCriteria::default().with_price(100_001, 400_000)));
        assert!(!matches(&l, &FilterCriteria::default().with_price(0, 99_999)));
    }

    #[test]
    fn test_inverted_price_bounds_match_nothing() {
        let listings = sample();
        let criteria = FilterCriteria::default().with_price(300_000, 50_000);
        assert!(listings.iter().all(|l| !matches(l, &criteria)));
    }

    #[test]
    fn test_zero_room_minimums_are_unconstrained() {
        let terrain = listing("t", "Terreno", "Mérida", 10_000, 0, 0);
        assert!(matches(&terrain, &FilterCriteria::default()));
        assert!(!matches(&terrain, &FilterCriteria::default().with_rooms(1, 0)));
        assert!(!matches(&terrain, &FilterCriteria::default().with_rooms(0, 1)));
    }

    #[test]
    fn test_matches_agrees_with_rules() {
        let listings = sample();
        let grid = [
            FilterCriteria::default(),
            FilterCriteria::default().with_city("Caracas").with_rooms(2, 2),
            FilterCriteria::default().with_price(50_000, 150_000),
            FilterCriteria::default().with_query("en"),
            FilterCriteria::default().with_query("plaza").with_rooms(0, 1),
            FilterCriteria::default().with_rooms(3, 1).with_city("Nowhere"),
        ];
        for criteria in &grid {
            for l in &listings {
                assert_eq!(matches(l, criteria), by_rules(l, criteria), "{criteria:?} / {}", l.id);
            }
        }
    }

    #[test]
    fn test_city_options_sorted_with_all_first() {
        let options = city_options(&sample());
        assert_eq!(options, vec!["All", "Barcelona", "Caracas", "Mérida", "Valencia"]);
        assert_eq!(city_options(&[]), vec!["All"]);
    }

    #[test]
    fn test_coerce_lower() {
        assert_eq!(coerce_lower("50000"), 50_000);
        assert_eq!(coerce_lower(" 2 "), 2);
        assert_eq!(coerce_lower("2.5"), 3);
        assert_eq!(coerce_lower("-4"), 0);
        assert_eq!(coerce_lower(""), 0);
        assert_eq!(coerce_lower("abc"), 0);
        assert_eq!(coerce_lower("1e3"), 1000);
    }

    #[test]
    fn test_coerce_upper() {
        assert_eq!(coerce_upper("150000"), 150_000);
        assert_eq!(coerce_upper("99.9"), 99);
        assert_eq!(coerce_upper("-1"), 0);
        assert_eq!(coerce_upper(""), u64::MAX);
        assert_eq!(coerce_upper("lots"), u64::MAX);
        assert_eq!(coerce_upper("1e30"), u64::MAX);
    }

    #[test]
    fn test_non_numeric_bounds_are_permissive() {
        let listings = sample();
        let criteria =
            FilterCriteria::default().with_price(coerce_lower("?"), coerce_upper("?"));
        assert_eq!(listings.iter().filter(|l| matches(l, &criteria)).count(), 4);
    }
}
