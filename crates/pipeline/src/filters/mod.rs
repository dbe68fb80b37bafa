//! Filter implementations for the listing pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duration;
pub mod exact_match;
pub mod price_bucket;
pub mod range;
pub mod time_window;

// Re-export for convenience
pub use duration::DurationFilter;
pub use exact_match::{ExactMatchFilter, TextField};
pub use price_bucket::PriceBucketFilter;
pub use range::{NumericField, RangeFilter};
pub use time_window::{TimeField, TimeWindowFilter};
