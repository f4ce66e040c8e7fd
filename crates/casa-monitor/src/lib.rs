//! Terminal front end for casa: listings dashboard and scrape admin console.

pub mod app;
pub mod components;
pub mod ui;

pub use app::{ActivePanel, App, FilterInput, ViewMode};
pub use ui::Theme;
