//! TUI components.

pub mod filter_bar;
pub mod footer;
pub mod header;
pub mod listing_detail;
pub mod listing_list;
pub mod listing_map;
pub mod log_viewer;
pub mod process_detail;
pub mod process_list;
pub mod view_tabs;

pub use filter_bar::FilterBar;
pub use footer::Footer;
pub use header::Header;
pub use listing_detail::ListingDetail;
pub use listing_list::ListingList;
pub use listing_map::ListingMap;
pub use log_viewer::{LogViewer, LogViewerState};
pub use process_detail::ProcessDetail;
pub use process_list::ProcessList;
pub use view_tabs::ViewTabs;
