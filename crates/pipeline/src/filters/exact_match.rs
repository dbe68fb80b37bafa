//! Exact-match filters for the selectable text columns.
//!
//! Operator, bus type, route and region share one implementation; the
//! [`TextField`] picks which column and which selector are compared.

use crate::criteria::{FilterCriteria, Selector};
use crate::traits::Filter;
use data_loader::Listing;

/// Text columns that can be pinned to a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Operator,
    BusType,
    Route,
    State,
}

impl TextField {
    fn value(self, listing: &Listing) -> Option<&str> {
        match self {
            TextField::Operator => Some(listing.busname.as_str()),
            TextField::BusType => Some(listing.bustype.as_str()),
            TextField::Route => Some(listing.route_name.as_str()),
            TextField::State => listing.state.as_deref(),
        }
    }

    fn selector(self, criteria: &FilterCriteria) -> &Selector<String> {
        match self {
            TextField::Operator => &criteria.operator,
            TextField::BusType => &criteria.bus_type,
            TextField::Route => &criteria.route,
            TextField::State => &criteria.state,
        }
    }
}

/// Keeps listings whose column equals the selected value exactly.
///
/// ## Algorithm
/// Unconstrained selector: pass everything through. Otherwise a
/// case-sensitive string comparison; listings without the column (no
/// region) never match a concrete value.
pub struct ExactMatchFilter {
    field: TextField,
}

impl ExactMatchFilter {
    pub fn new(field: TextField) -> Self {
        Self { field }
    }
}

impl Filter for ExactMatchFilter {
    fn name(&self) -> &str {
        match self.field {
            TextField::Operator => "OperatorFilter",
            TextField::BusType => "BusTypeFilter",
            TextField::Route => "RouteFilter",
            TextField::State => "StateFilter",
        }
    }

    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        let selector = self.field.selector(criteria);
        if selector.is_unconstrained() {
            return listings;
        }
        listings
            .into_iter()
            .filter(|listing| selector.matches(self.field.value(listing)))
            .collect()
    }
}
