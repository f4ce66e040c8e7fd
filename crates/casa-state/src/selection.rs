//! Raw selection state.

use serde::{Deserialize, Serialize};

/// What the user last picked.
///
/// `selected_id` drives the map and list highlight, `details_id` drives the
/// details panel. Opening couples them, closing only clears details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_id: Option<String>,
    pub details_id: Option<String>,
}

impl SelectionState {
    /// Highlight a listing and open its details.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.details_id = Some(id.clone());
        self.selected_id = Some(id);
    }

    /// Close the details panel, keeping the highlight.
    pub fn close_details(&mut self) {
        self.details_id = None;
    }
}
