//! Dashboard crate for the bus route explorer.
//!
//! This crate contains the session orchestrator that ties the data source,
//! the filter pipeline and the display model together.

pub mod dashboard;

pub use dashboard::{Dashboard, DashboardView, FilterOptions, ListingCard};
