//! Real-estate listing model for casa.
//!
//! Holds the listing records, the filter predicate evaluated over them and
//! the identity-resolution rule shared by the dashboard and the admin console.

pub mod data;
pub mod filter;
pub mod listing;
pub mod resolve;

pub use data::{DataError, load_listings, parse_listings};
pub use filter::{
    ALL_CITIES, DEFAULT_MAX_PRICE, FilterCriteria, MAX_PRICE_PRESETS, MIN_PRICE_PRESETS,
    ROOM_PRESETS, city_options, coerce_lower, coerce_upper, matches,
};
pub use listing::{Listing, Operation, PropertyType};
pub use resolve::{Identified, resolve_effective};
