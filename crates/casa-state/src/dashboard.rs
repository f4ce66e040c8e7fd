//! Listing selection coordinator.

use crate::selection::SelectionState;
use casa_core::{FilterCriteria, Listing, city_options, matches, resolve_effective};

/// Derived dashboard state, borrowed from the listing collection.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    /// Matching listings in source order
    pub filtered: Vec<&'a Listing>,
    /// Highlighted listing, always a member of `filtered` when set
    pub effective_selected_id: Option<&'a str>,
    /// Listing shown in the details panel, always a member of `filtered` when set
    pub effective_details_id: Option<&'a str>,
}

/// Derive the dashboard view from ground truth.
///
/// While loading, both effective identities are `None`. Otherwise selection
/// falls back to the first visible listing, details does not.
pub fn derive_view<'a>(
    listings: &'a [Listing],
    criteria: &FilterCriteria,
    selection: &SelectionState,
    is_loading: bool,
) -> DashboardView<'a> {
    let filtered: Vec<&'a Listing> = listings.iter().filter(|l| matches(l, criteria)).collect();

    let (effective_selected_id, effective_details_id) = if is_loading {
        (None, None)
    } else {
        (
            resolve_effective(&filtered, selection.selected_id.as_deref(), true)
                .and_then(|id| find_id(&filtered, id)),
            resolve_effective(&filtered, selection.details_id.as_deref(), false)
                .and_then(|id| find_id(&filtered, id)),
        )
    };

    DashboardView {
        filtered,
        effective_selected_id,
        effective_details_id,
    }
}

/// Re-borrow an identity from the listing itself so it outlives `filtered`.
fn find_id<'a>(filtered: &[&'a Listing], id: &str) -> Option<&'a str> {
    filtered
        .iter()
        .find(|l| l.id == id)
        .map(|l| l.id.as_str())
}

/// Owned dashboard state with a cached view.
///
/// Every mutation recomputes the whole view; collections are small.
#[derive(Debug, Clone)]
pub struct Dashboard {
    listings: Vec<Listing>,
    criteria: FilterCriteria,
    selection: SelectionState,
    is_loading: bool,
    cities: Vec<String>,
    filtered: Vec<usize>, // Indices into `listings`
    effective_selected_id: Option<String>,
    effective_details_id: Option<String>,
}

impl Dashboard {
    /// Create a dashboard in the loading state with default criteria.
    pub fn new(listings: Vec<Listing>) -> Self {
        let mut dashboard = Self {
            cities: city_options(&listings),
            listings,
            criteria: FilterCriteria::default(),
            selection: SelectionState::default(),
            is_loading: true,
            filtered: Vec::new(),
            effective_selected_id: None,
            effective_details_id: None,
        };
        dashboard.recompute();
        dashboard
    }

    fn recompute(&mut self) {
        let view = derive_view(
            &self.listings,
            &self.criteria,
            &self.selection,
            self.is_loading,
        );

        self.effective_selected_id = view.effective_selected_id.map(String::from);
        self.effective_details_id = view.effective_details_id.map(String::from);
        self.filtered = self
            .listings
            .iter()
            .enumerate()
            .filter(|(_, l)| matches(l, &self.criteria))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            visible = self.filtered.len(),
            selected = ?self.effective_selected_id,
            details = ?self.effective_details_id,
            "dashboard recomputed"
        );
    }

    /// Borrow the current derived view.
    pub fn view(&self) -> DashboardView<'_> {
        derive_view(
            &self.listings,
            &self.criteria,
            &self.selection,
            self.is_loading,
        )
    }

    /// Replace the listing collection (e.g. after a reload).
    pub fn set_listings(&mut self, listings: Vec<Listing>) {
        self.cities = city_options(&listings);
        self.listings = listings;
        self.recompute();
    }

    /// Replace the filter criteria wholesale.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn reset_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Highlight a listing and open its details.
    pub fn select_listing(&mut self, id: &str) {
        self.selection.select(id);
        self.recompute();
    }

    /// Close the details panel; the highlight stays.
    pub fn close_details(&mut self) {
        self.selection.close_details();
        self.recompute();
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
        self.recompute();
    }

    /// Select the visible listing `offset` positions away from the current
    /// highlight, wrapping around.
    pub fn step_selection(&mut self, offset: isize) {
        if self.is_loading || self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as isize;
        let current = self.selected_position().unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        let id = self.listings[self.filtered[next]].id.clone();
        self.select_listing(&id);
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// "All" followed by the distinct cities, sorted.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Matching listings in source order.
    pub fn filtered(&self) -> impl Iterator<Item = &Listing> {
        self.filtered.iter().map(|&i| &self.listings[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn effective_selected_id(&self) -> Option<&str> {
        self.effective_selected_id.as_deref()
    }

    pub fn effective_details_id(&self) -> Option<&str> {
        self.effective_details_id.as_deref()
    }

    /// Position of the highlighted listing within the filtered results.
    pub fn selected_position(&self) -> Option<usize> {
        let id = self.effective_selected_id.as_deref()?;
        self.filtered().position(|l| l.id == id)
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        let id = self.effective_selected_id.as_deref()?;
        self.filtered().find(|l| l.id == id)
    }

    pub fn details_listing(&self) -> Option<&Listing> {
        let id = self.effective_details_id.as_deref()?;
        self.filtered().find(|l| l.id == id)
    }
}
