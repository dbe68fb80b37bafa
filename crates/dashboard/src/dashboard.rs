//! # Dashboard Session
//!
//! This module coordinates one user session:
//! 1. Fetch the listing snapshot once through the injected source
//! 2. Expose selector options (facets and numeric bounds)
//! 3. For every interaction, run the filter pipeline over the snapshot
//! 4. Turn the survivors into display cards
//!
//! Data-access failures never escape [`Dashboard::query`]: they become
//! [`DashboardView::DataUnavailable`] and the pipeline is skipped.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::{Bounds, CachedSource, Listing, ListingId, ListingIndex, ListingSource};
use pipeline::{DurationBucket, FilterCriteria, FilterPipeline, PriceBucket, TimeWindow};

/// One display card per surviving listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: ListingId,
    pub operator: String,
    pub bus_type: String,
    pub route: String,
    pub route_link: String,
    /// `HH:MM:SS`
    pub departing: String,
    pub reaching: String,
    pub duration: String,
    pub seats_available: u32,
    pub price: f64,
    pub star_rating: f64,
    pub state: Option<String>,
}

impl From<&Listing> for ListingCard {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            operator: listing.busname.clone(),
            bus_type: listing.bustype.clone(),
            route: listing.route_name.clone(),
            route_link: listing.route_link.clone(),
            departing: listing.departing_time.format("%H:%M:%S").to_string(),
            reaching: listing.reaching_time.format("%H:%M:%S").to_string(),
            duration: listing.duration.clone(),
            seats_available: listing.seats_available,
            price: listing.price,
            star_rating: listing.star_rating,
            state: listing.state.clone(),
        }
    }
}

/// What the user sees after an interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// The table couldn't be loaded, or it was empty
    DataUnavailable { reason: String },
    /// Data is fine but nothing satisfies the criteria
    NoMatches,
    Matches { cards: Vec<ListingCard> },
}

impl DashboardView {
    pub fn cards(&self) -> &[ListingCard] {
        match self {
            DashboardView::Matches { cards } => cards,
            _ => &[],
        }
    }
}

/// Values for populating the selectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub operators: Vec<String>,
    pub bus_types: Vec<String>,
    pub routes: Vec<String>,
    pub states: Vec<String>,
    pub price_buckets: Vec<&'static str>,
    pub durations: Vec<&'static str>,
    pub time_windows: Vec<&'static str>,
    pub price: Option<Bounds<f64>>,
    pub star_rating: Option<Bounds<f64>>,
    pub seats_available: Option<Bounds<u32>>,
}

impl FilterOptions {
    fn from_index(index: &ListingIndex) -> Self {
        let facets = index.facets().clone();
        Self {
            operators: facets.operators,
            bus_types: facets.bus_types,
            routes: facets.routes,
            states: facets.states,
            price_buckets: PriceBucket::ALL.iter().map(|b| b.label()).collect(),
            durations: DurationBucket::ALL.iter().map(|d| d.label()).collect(),
            time_windows: TimeWindow::ALL.iter().map(|w| w.label()).collect(),
            price: index.price_bounds(),
            star_rating: index.rating_bounds(),
            seats_available: index.seat_bounds(),
        }
    }
}

/// One user session over a listing source
pub struct Dashboard<S> {
    source: CachedSource<S>,
    filter_pipeline: FilterPipeline,
}

impl<S: ListingSource> Dashboard<S> {
    /// Create a dashboard; nothing is fetched until the first call that needs data.
    pub fn new(source: S) -> Self {
        Self {
            source: CachedSource::new(source),
            filter_pipeline: FilterPipeline::standard(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Selector options for the current snapshot
    pub fn options(&self) -> Result<FilterOptions> {
        let index = self.snapshot()?;
        Ok(FilterOptions::from_index(&index))
    }

    /// Main entry point: run one filtering pass
    pub fn query(&self, criteria: &FilterCriteria) -> DashboardView {
        let start_time = Instant::now();

        let index = match self.snapshot() {
            Ok(index) => index,
            Err(err) => {
                warn!("Skipping filters, data unavailable: {:#}", err);
                return DashboardView::DataUnavailable {
                    reason: format!("{:#}", err),
                };
            }
        };

        let matches = self.filter_pipeline.apply(index.listings().to_vec(), criteria);
        info!(
            "Filtered {} listings down to {} in {:.2?}",
            index.len(),
            matches.len(),
            start_time.elapsed()
        );

        if matches.is_empty() {
            DashboardView::NoMatches
        } else {
            DashboardView::Matches {
                cards: matches.iter().map(ListingCard::from).collect(),
            }
        }
    }

    /// The cached snapshot; an empty table counts as a failure
    fn snapshot(&self) -> Result<Arc<ListingIndex>> {
        let index = self
            .source
            .snapshot()
            .with_context(|| format!("Failed to load bus routes from {}", self.source.name()))?;
        if index.is_empty() {
            bail!("No bus routes found in {}", self.source.name());
        }
        Ok(index)
    }
}
