//! Filter for the categorical price selector.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Listing;

/// Keeps listings whose price falls in the selected [`PriceBucket`](crate::PriceBucket).
///
/// Boundary handling lives in `PriceBucket::contains`: 500 belongs to
/// "250-500" only and 1000 to "500-1000" only.
pub struct PriceBucketFilter;

impl Filter for PriceBucketFilter {
    fn name(&self) -> &str {
        "PriceBucketFilter"
    }

    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        let Some(bucket) = criteria.price_bucket else {
            return listings;
        };
        listings
            .into_iter()
            .filter(|listing| bucket.contains(listing.price))
            .collect()
    }
}
