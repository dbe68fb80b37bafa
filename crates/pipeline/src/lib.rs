//! Filtering of bus route listings.
//!
//! This crate provides:
//! - FilterCriteria and the bucket/selector/range types it is built from
//! - Filter trait and one implementation per criterion
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Every filter reads its own field of the criteria and narrows the listing
//! set. Filters are combined by logical AND, so their order does not change
//! the result; the pipeline stops as soon as nothing is left.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterCriteria, PriceBucket, TimeWindow};
//!
//! let criteria = FilterCriteria::new()
//!     .with_operator("Orange Tours")
//!     .with_price_bucket(PriceBucket::Budget)
//!     .with_departing(TimeWindow::Night);
//!
//! let matches = pipeline::apply(index.listings(), &criteria);
//! ```

pub mod criteria;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

#[cfg(test)]
mod fixtures;

// Re-export main types
pub use criteria::{
    is_unconstrained_label, parse_optional, DurationBucket, FilterCriteria, InclusiveRange,
    PriceBucket, Selector, TimeWindow,
};
pub use error::CriteriaError;
pub use filter_pipeline::{apply, FilterPipeline};
pub use traits::Filter;
