//! Data-access seam for the bus route table.
//!
//! The rest of the workspace never talks to storage directly: it is handed a
//! [`ListingSource`] and asks it for rows. [`CachedSource`] adds the
//! fetch-once behaviour sessions rely on.

use crate::error::Result;
use crate::parser;
use crate::types::{Listing, ListingIndex};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Anything that can produce the full bus route table.
pub trait ListingSource: Send + Sync {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    /// Fetch every row. Called once per snapshot.
    fn fetch(&self) -> Result<Vec<Listing>>;
}

/// Reads a headered CSV export of the table.
#[derive(Debug, Clone)]
pub struct CsvListingSource {
    path: PathBuf,
    name: String,
}

impl CsvListingSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("csv:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for CsvListingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<Listing>> {
        parser::parse_listings_file(&self.path)
    }
}

/// Serves a fixed set of rows from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    listings: Vec<Listing>,
}

impl StaticSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl ListingSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

/// Loads a snapshot on first use and keeps it for the life of the value.
///
/// There is no invalidation, refresh or expiry. A failed load is not
/// remembered, so the next call tries the inner source again.
pub struct CachedSource<S> {
    inner: S,
    snapshot: Mutex<Option<Arc<ListingIndex>>>,
}

impl<S: ListingSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            snapshot: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// The cached snapshot, loading it if this is the first successful call.
    pub fn snapshot(&self) -> Result<Arc<ListingIndex>> {
        let mut slot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(ListingIndex::load(&self.inner)?);
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Whether a snapshot has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
