//! Listing seed loading.

use crate::listing::Listing;
use camino::Utf8Path;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate listing id: {0}")]
    DuplicateId(String),
}

/// Parse a JSON array of listings, keeping file order.
pub fn parse_listings(content: &str) -> Result<Vec<Listing>, DataError> {
    let listings: Vec<Listing> = serde_json::from_str(content)?;

    let mut seen = HashSet::with_capacity(listings.len());
    for listing in &listings {
        if !seen.insert(listing.id.as_str()) {
            return Err(DataError::DuplicateId(listing.id.clone()));
        }
    }

    Ok(listings)
}

/// Load listings from a JSON file.
pub fn load_listings(path: &Utf8Path) -> Result<Vec<Listing>, DataError> {
    let content = fs::read_to_string(path)?;
    let listings = parse_listings(&content)?;
    tracing::debug!(count = listings.len(), %path, "loaded listings");
    Ok(listings)
}
