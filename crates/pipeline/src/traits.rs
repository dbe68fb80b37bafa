//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to listing sets.

use crate::criteria::FilterCriteria;
use data_loader::Listing;

/// Core trait for filtering listings.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Contract
/// - A filter only ever removes listings; it never adds, reorders or edits them
/// - A filter whose criterion is unconstrained returns its input untouched
/// - Filters take ownership of the Vec<Listing> and return a filtered Vec
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of listings.
    ///
    /// # Arguments
    /// * `listings` - The listings to filter (takes ownership)
    /// * `criteria` - The user's selections for this pass
    fn apply(&self, listings: Vec<Listing>, criteria: &FilterCriteria) -> Vec<Listing>;
}
