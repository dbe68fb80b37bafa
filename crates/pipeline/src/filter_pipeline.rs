//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::criteria::FilterCriteria;
use crate::filters::*;
use crate::traits::Filter;
use data_loader::Listing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExactMatchFilter::new(TextField::Operator))
///     .add_filter(PriceBucketFilter)
///     .add_filter(TimeWindowFilter::new(TimeField::Departing));
///
/// let filtered = pipeline.apply(listings, &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline with one filter per criterion, in dashboard order.
    pub fn standard() -> Self {
        Self::from_filters(Self::standard_filters())
    }

    /// The filters [`FilterPipeline::standard`] is made of.
    pub fn standard_filters() -> Vec<Box<dyn Filter>> {
        vec![
            Box::new(ExactMatchFilter::new(TextField::Operator)),
            Box::new(ExactMatchFilter::new(TextField::BusType)),
            Box::new(ExactMatchFilter::new(TextField::Route)),
            Box::new(ExactMatchFilter::new(TextField::State)),
            Box::new(PriceBucketFilter),
            Box::new(RangeFilter::new(NumericField::Price)),
            Box::new(RangeFilter::new(NumericField::StarRating)),
            Box::new(RangeFilter::new(NumericField::SeatsAvailable)),
            Box::new(DurationFilter),
            Box::new(TimeWindowFilter::new(TimeField::Departing)),
            Box::new(TimeWindowFilter::new(TimeField::Reaching)),
        ]
    }

    pub fn from_filters(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the listings.
    ///
    /// ## Algorithm
    /// 1. Start with the input listings
    /// 2. For each filter in order:
    ///    a. Stop early once nothing is left
    ///    b. Apply the filter, logging input and output counts
    /// 3. Return the surviving listings in their original order
    pub fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing> {
        let mut current = listings;
        for filter in &self.filters {
            if current.is_empty() {
                tracing::debug!("No listings left, skipping {}", filter.name());
                break;
            }
            let input_count = current.len();
            current = filter.apply(current, criteria);
            tracing::debug!(
                "Filter applied: {} ({} -> {})",
                filter.name(),
                input_count,
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the standard pipeline over a snapshot.
///
/// The snapshot is left untouched; the survivors are returned as a new Vec.
pub fn apply(dataset: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    FilterPipeline::standard().apply(dataset.to_vec(), criteria)
}
