//! ListingIndex building and validation.
//!
//! - Fetch rows through a [`ListingSource`]
//! - Build the facet lists used by selectors
//! - Drop rows whose price or rating is out of range, keep the rest
//! - Validate the snapshot invariants before it is handed out

use crate::error::{DataLoadError, Result};
use crate::source::{CsvListingSource, ListingSource};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

impl ListingIndex {
    /// Fetch all rows from `source` and build a validated snapshot.
    pub fn load(source: &dyn ListingSource) -> Result<Self> {
        let start = Instant::now();
        let listings = source.fetch()?;
        let index = Self::from_listings(listings)?;
        tracing::info!(
            "Loaded {} listings from {} in {:?}",
            index.len(),
            source.name(),
            start.elapsed()
        );
        Ok(index)
    }

    /// Shorthand for loading a CSV export of the table
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        Self::load(&CsvListingSource::new(path))
    }

    /// Build a snapshot from rows already in memory.
    ///
    /// A row with a missing, negative or out-of-range price or rating is
    /// skipped with a warning. Duplicate ids still reject the whole snapshot.
    pub fn from_listings(listings: Vec<Listing>) -> Result<Self> {
        let mut index = ListingIndex::new();
        let mut skipped = 0;
        for listing in listings {
            match check_listing(&listing) {
                Ok(()) => index.insert_listing(listing),
                Err(err) => {
                    tracing::warn!("Skipping listing {}: {}", listing.id, err);
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            tracing::warn!("Skipped {} listings with invalid values", skipped);
        }
        index.validate()?;
        index.build_facets();
        Ok(index)
    }

    /// Collect the distinct values of every selectable column.
    ///
    /// The four columns are independent, so they are scanned in parallel.
    pub fn build_facets(&mut self) {
        let listings = &self.listings;
        let ((operators, bus_types), (routes, states)) = rayon::join(
            || {
                rayon::join(
                    || distinct(listings.par_iter().map(|l| Some(l.busname.as_str()))),
                    || distinct(listings.par_iter().map(|l| Some(l.bustype.as_str()))),
                )
            },
            || {
                rayon::join(
                    || distinct(listings.par_iter().map(|l| Some(l.route_name.as_str()))),
                    || distinct(listings.par_iter().map(|l| l.state.as_deref())),
                )
            },
        );

        self.facets = Facets {
            operators,
            bus_types,
            routes,
            states,
        };
    }

    /// Validate snapshot invariants
    ///
    /// - ids are unique
    /// - every row passes [`check_listing`]
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.listings.len());
        for listing in &self.listings {
            if !seen.insert(listing.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate listing id {}",
                    listing.id
                )));
            }
            check_listing(listing)?;
        }
        Ok(())
    }
}

/// Row invariants: price is finite and >= 0, star rating is within [1.0, 5.0].
pub fn check_listing(listing: &Listing) -> Result<()> {
    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err(DataLoadError::InvalidValue {
            field: "price".to_string(),
            value: listing.price.to_string(),
        });
    }
    if !(1.0..=5.0).contains(&listing.star_rating) {
        return Err(DataLoadError::InvalidValue {
            field: "star_rating".to_string(),
            value: listing.star_rating.to_string(),
        });
    }
    Ok(())
}

/// Distinct non-empty values in first-seen order.
///
/// The parallel iterator is indexed, so `collect` keeps source order and the
/// de-duplication pass stays sequential.
fn distinct<'a>(values: impl IndexedParallelIterator<Item = Option<&'a str>>) -> Vec<String> {
    let collected: Vec<Option<&str>> = values.collect();
    let mut seen = HashSet::new();
    collected
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
