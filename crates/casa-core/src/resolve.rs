//! Identity resolution against a visible collection.

use crate::listing::Listing;

/// Anything addressed by a string identity.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Listing {
    fn id(&self) -> &str {
        &self.id
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

/// Resolve a candidate identity against `items`.
///
/// Returns the candidate when it names a member of `items`. Otherwise returns
/// the first member's identity if `allow_fallback` is set, else `None`. An
/// empty collection always resolves to `None`.
pub fn resolve_effective<'a, T: Identified>(
    items: &'a [T],
    candidate: Option<&str>,
    allow_fallback: bool,
) -> Option<&'a str> {
    if let Some(wanted) = candidate {
        if let Some(hit) = items.iter().find(|item| item.id() == wanted) {
            return Some(hit.id());
        }
    }

    if allow_fallback {
        items.first().map(|item| item.id())
    } else {
        None
    }
}
