//! Shared rendering helpers.

pub mod format;
pub mod markers;
pub mod theme;

pub use markers::{MarkerCache, MarkerKey, MarkerStyle};
pub use theme::Theme;
