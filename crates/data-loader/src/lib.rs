//! # Data Loader Crate
//!
//! Loads the bus route table into an immutable in-memory snapshot.
//!
//! ## Main Components
//!
//! - **types**: `Listing`, `ListingIndex`, facets and bounds
//! - **parser**: CSV export parsing and cell normalisation
//! - **source**: the `ListingSource` data-access trait and its implementations
//! - **index**: snapshot building and validation
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CachedSource, CsvListingSource};
//!
//! let source = CachedSource::new(CsvListingSource::new("data/bus_routes.csv"));
//! let index = source.snapshot()?;
//!
//! println!("{} listings, {} operators", index.len(), index.facets().operators.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod source;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use source::{CachedSource, CsvListingSource, ListingSource, StaticSource};
pub use types::{
    // Type aliases and constants
    ListingId,
    DEFAULT_TIME,
    // Core types
    Listing,
    ListingIndex,
    Facets,
    Bounds,
};
