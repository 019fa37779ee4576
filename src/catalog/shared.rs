//! Lazily built, atomically replaceable catalog cache.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::core::item::RawItemRecord;

use super::store::{read_snapshot, CatalogCache, CatalogError, SnapshotFormat};

/// Supplier of catalog snapshots (a database export, a file, a fixture)
pub trait CatalogSource: Send + Sync {
    /// Produce the current rows of the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    fn snapshot(&self) -> Result<Vec<RawItemRecord>, CatalogError>;
}

impl CatalogSource for Vec<RawItemRecord> {
    fn snapshot(&self) -> Result<Vec<RawItemRecord>, CatalogError> {
        Ok(self.clone())
    }
}

/// Snapshot file on disk, re-read on every build
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
    pub format: SnapshotFormat,
}

impl FileSource {
    /// File source with the format detected from the extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SnapshotFormat::detect(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }
}

impl CatalogSource for FileSource {
    fn snapshot(&self) -> Result<Vec<RawItemRecord>, CatalogError> {
        read_snapshot(&self.path, self.format)
    }
}

/// A catalog cache built once on first access and swapped whole on rebuild
///
/// Readers get an `Arc` to an immutable snapshot; a rebuild never touches a
/// snapshot someone is still reading.
pub struct SharedCatalog<S> {
    source: S,
    current: RwLock<Option<Arc<CatalogCache>>>,
}

impl<S: CatalogSource> SharedCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// The current cache, building it if this is the first access
    ///
    /// Concurrent first accesses build exactly once.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the first build fails; a later call
    /// will try again.
    pub fn get(&self) -> Result<Arc<CatalogCache>, CatalogError> {
        {
            let slot = self.read_slot();
            if let Some(cache) = slot.as_ref() {
                return Ok(Arc::clone(cache));
            }
        }

        let mut slot = self.write_slot();
        if let Some(cache) = slot.as_ref() {
            return Ok(Arc::clone(cache));
        }
        let cache = Arc::new(self.build()?);
        *slot = Some(Arc::clone(&cache));
        Ok(cache)
    }

    /// Build a fresh cache from the source and swap it in
    ///
    /// The previous cache stays valid for anyone holding it.
    ///
    /// # Errors
    ///
    /// Returns the source's error; the previous cache is kept in that case.
    pub fn rebuild(&self) -> Result<Arc<CatalogCache>, CatalogError> {
        let cache = Arc::new(self.build()?);
        *self.write_slot() = Some(Arc::clone(&cache));
        info!(items = cache.len(), "swapped in rebuilt catalog cache");
        Ok(cache)
    }

    /// Whether a cache has been built yet
    pub fn is_loaded(&self) -> bool {
        self.read_slot().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn build(&self) -> Result<CatalogCache, CatalogError> {
        Ok(CatalogCache::build(self.source.snapshot()?))
    }

    // The slot only ever holds a complete Arc, so a poisoned lock still
    // guards consistent data.
    fn read_slot(&self) -> RwLockReadGuard<'_, Option<Arc<CatalogCache>>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<Arc<CatalogCache>>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
