//! Dashboard view state for casa.
//!
//! Keeps the filtered listings, the map/list highlight and the details panel
//! consistent with each other under filter and selection changes.

pub mod dashboard;
pub mod selection;

pub use dashboard::{Dashboard, DashboardView, derive_view};
pub use selection::SelectionState;
