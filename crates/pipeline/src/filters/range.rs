//! Inclusive range filters for the slider-style numeric criteria.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Listing;

/// Numeric columns with a range criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Price,
    StarRating,
    SeatsAvailable,
}

/// Keeps listings with `lo <= value <= hi` for one numeric column.
///
/// ## Algorithm
/// 1. Look up the range for this column in the criteria
/// 2. If there is none, keep every listing
/// 3. Otherwise keep listings whose value lies within the range, bounds included
pub struct RangeFilter {
    field: NumericField,
}

impl RangeFilter {
    pub fn new(field: NumericField) -> Self {
        Self { field }
    }

    fn keeps(&self, listing: &Listing, criteria: &FilterCriteria) -> bool {
        match self.field {
            NumericField::Price => criteria
                .price_range
                .is_none_or(|r| r.contains(listing.price)),
            NumericField::StarRating => criteria
                .star_rating
                .is_none_or(|r| r.contains(listing.star_rating)),
            NumericField::SeatsAvailable => criteria
                .seats_available
                .is_none_or(|r| r.contains(listing.seats_available)),
        }
    }

    fn is_active(&self, criteria: &FilterCriteria) -> bool {
        match self.field {
            NumericField::Price => criteria.price_range.is_some(),
            NumericField::StarRating => criteria.star_rating.is_some(),
            NumericField::SeatsAvailable => criteria.seats_available.is_some(),
        }
    }
}

impl Filter for RangeFilter {
    fn name(&self) -> &str {
        match self.field {
            NumericField::Price => "PriceRangeFilter",
            NumericField::StarRating => "StarRatingFilter",
            NumericField::SeatsAvailable => "SeatsAvailableFilter",
        }
    }

    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        if !self.is_active(criteria) {
            return listings;
        }
        listings
            .into_iter()
            .filter(|listing| self.keeps(listing, criteria))
            .collect()
    }
}
