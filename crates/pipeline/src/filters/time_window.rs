//! Filters for the departure and arrival time-of-day selectors.

use crate::criteria::{FilterCriteria, TimeWindow};
use crate::traits::Filter;
use chrono::NaiveTime;
use data_loader::Listing;

/// Which end of the trip a window applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Departing,
    Reaching,
}

impl TimeField {
    fn value(self, listing: &Listing) -> NaiveTime {
        match self {
            TimeField::Departing => listing.departing_time,
            TimeField::Reaching => listing.reaching_time,
        }
    }

    fn window(self, criteria: &FilterCriteria) -> Option<TimeWindow> {
        match self {
            TimeField::Departing => criteria.departing,
            TimeField::Reaching => criteria.reaching,
        }
    }
}

/// Keeps listings whose departure (or arrival) falls inside the selected window.
///
/// Missing times were loaded as midnight, which no named window contains, so
/// such listings only survive when this criterion is unset.
pub struct TimeWindowFilter {
    field: TimeField,
}

impl TimeWindowFilter {
    pub fn new(field: TimeField) -> Self {
        Self { field }
    }
}

impl Filter for TimeWindowFilter {
    fn name(&self) -> &str {
        match self.field {
            TimeField::Departing => "DepartingTimeFilter",
            TimeField::Reaching => "ReachingTimeFilter",
        }
    }

    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        let Some(window) = self.field.window(criteria) else {
            return listings;
        };
        listings
            .into_iter()
            .filter(|listing| window.contains(self.field.value(listing)))
            .collect()
    }
}
