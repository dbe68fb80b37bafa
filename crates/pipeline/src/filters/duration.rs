//! Filter for the coarse duration selector.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Listing;

/// Keeps listings whose free-text duration contains one of the bucket's tokens.
///
/// No parsing happens here: "13 hours" matches the "3 hours" token.
pub struct DurationFilter;

impl Filter for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        let Some(bucket) = criteria.duration else {
            return listings;
        };
        listings
            .into_iter()
            .filter(|listing| bucket.matches(&listing.duration))
            .collect()
    }
}
