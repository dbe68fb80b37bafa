//! Core domain types for the bus route table.
//!
//! A [`Listing`] is one row of the `bus_routes` table. A [`ListingIndex`]
//! is the immutable snapshot of all rows a session works against, together
//! with the facet lists used to populate selectors.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Primary key of a row in the bus route table
pub type ListingId = u32;

/// Time substituted for missing or unparseable departure/arrival values.
pub const DEFAULT_TIME: NaiveTime = NaiveTime::MIN;

// =============================================================================
// Listing
// =============================================================================

/// One bus-route row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub route_name: String,
    pub route_link: String,
    /// Operator name
    pub busname: String,
    /// e.g. "AC Sleeper (2+1)"
    pub bustype: String,
    pub departing_time: NaiveTime,
    /// Free text as scraped, e.g. "2 hours 30 min"
    pub duration: String,
    pub reaching_time: NaiveTime,
    pub price: f64,
    /// Absent source values are stored as 0
    pub seats_available: u32,
    /// 1.0 to 5.0
    pub star_rating: f64,
    /// Region; only one variant of the table carries it
    pub state: Option<String>,
}

// =============================================================================
// Facets and Bounds
// =============================================================================

/// Distinct values of each selectable column, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub operators: Vec<String>,
    pub bus_types: Vec<String>,
    pub routes: Vec<String>,
    pub states: Vec<String>,
}

/// Inclusive `[min, max]` of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Fold a column into its bounds. `None` for an empty column.
    pub fn of(values: impl IntoIterator<Item = T>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Bounds { min: v, max: v }),
            Some(b) => Some(Bounds {
                min: if v < b.min { v } else { b.min },
                max: if v > b.max { v } else { b.max },
            }),
        })
    }
}

// =============================================================================
// ListingIndex - the session snapshot
// =============================================================================

/// Read-only snapshot of the bus route table.
///
/// Built once per session (see [`ListingIndex::load`]) and never mutated
/// afterwards; filtering always starts from [`ListingIndex::listings`].
#[derive(Debug, Default)]
pub struct ListingIndex {
    pub(crate) listings: Vec<Listing>,
    pub(crate) facets: Facets,
}

impl ListingIndex {
    /// Creates a new, empty ListingIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows, in source order
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Look up a row by its primary key
    pub fn get_listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Selector values; empty until [`ListingIndex::build_facets`] has run
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn price_bounds(&self) -> Option<Bounds<f64>> {
        Bounds::of(self.listings.iter().map(|l| l.price))
    }

    pub fn rating_bounds(&self) -> Option<Bounds<f64>> {
        Bounds::of(self.listings.iter().map(|l| l.star_rating))
    }

    pub fn seat_bounds(&self) -> Option<Bounds<u32>> {
        Bounds::of(self.listings.iter().map(|l| l.seats_available))
    }

    /// Append a row. Only used while building a snapshot.
    pub fn insert_listing(&mut self, listing: Listing) {
        self.listings.push(listing);
    }
}
