//! High-level entry point tying the catalog and the matching engine together.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::shared::{CatalogSource, SharedCatalog};
use crate::catalog::store::{CatalogCache, CatalogError};
use crate::core::item::ItemRecord;
use crate::matching::batch::{match_batch, BatchEntry};
use crate::matching::engine::{MatchCandidate, MatchOptions, MatchingConfig, MatchingEngine};
use crate::matching::report::MatchReport;
use crate::matching::variations::WearVariationResolver;
use crate::utils::validation::ConfigError;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Matches detected text against a lazily loaded catalog
///
/// The catalog is built from `source` on first use and shared by every call,
/// including calls from other threads. [`ItemMatcher::rebuild`] reloads it.
///
/// ```
/// use skin_solver::{ItemMatcher, MatchOptions, RawItemRecord};
///
/// let matcher = ItemMatcher::new(vec![
///     RawItemRecord::named("AK-47 | Redline (Field-Tested)"),
///     RawItemRecord::named("AWP | Asiimov (Field-Tested)"),
/// ]);
/// let report = matcher
///     .match_with_confidence("AK47 Redline FT", &MatchOptions::default())
///     .unwrap();
/// assert_eq!(
///     report.best_match.unwrap().name,
///     "AK-47 | Redline (Field-Tested)"
/// );
/// ```
pub struct ItemMatcher<S> {
    catalog: SharedCatalog<S>,
    config: MatchingConfig,
}

impl<S: CatalogSource> ItemMatcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, MatchingConfig::default())
    }

    pub fn with_config(source: S, config: MatchingConfig) -> Self {
        Self {
            catalog: SharedCatalog::new(source),
            config,
        }
    }

    /// The current catalog, loading it on first use
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be loaded.
    pub fn catalog(&self) -> Result<Arc<CatalogCache>, CatalogError> {
        self.catalog.get()
    }

    /// Reload the catalog from its source
    ///
    /// Calls already running finish against the catalog they started with.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the reload fails; the previous catalog stays in use.
    pub fn rebuild(&self) -> Result<Arc<CatalogCache>, CatalogError> {
        self.catalog.rebuild()
    }

    /// Ranked candidates for `text`
    ///
    /// # Errors
    ///
    /// Fails on invalid options before the catalog is touched, or if the
    /// catalog cannot be loaded.
    pub fn find_matches(
        &self,
        text: &str,
        options: &MatchOptions,
    ) -> Result<Vec<MatchCandidate>, MatchError> {
        self.check(options)?;
        let catalog = self.catalog()?;
        let engine = MatchingEngine::with_config(&catalog, self.config.clone());
        Ok(engine.find_matches(text, options)?)
    }

    /// Match `text` and classify the result
    ///
    /// # Errors
    ///
    /// Same as [`ItemMatcher::find_matches`].
    pub fn match_with_confidence(
        &self,
        text: &str,
        options: &MatchOptions,
    ) -> Result<MatchReport, MatchError> {
        self.check(options)?;
        let catalog = self.catalog()?;
        let engine = MatchingEngine::with_config(&catalog, self.config.clone());
        let matches = engine.find_matches(text, options)?;
        Ok(MatchReport::classify(matches, &catalog))
    }

    /// Clean and match many detected strings in parallel
    ///
    /// # Errors
    ///
    /// Same as [`ItemMatcher::find_matches`].
    pub fn match_batch<T>(
        &self,
        texts: &[T],
        options: &MatchOptions,
    ) -> Result<Vec<BatchEntry>, MatchError>
    where
        T: AsRef<str> + Sync,
    {
        self.check(options)?;
        let catalog = self.catalog()?;
        let engine = MatchingEngine::with_config(&catalog, self.config.clone());
        Ok(match_batch(&engine, texts, options)?)
    }

    /// Every wear tier of `item` in the current catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be loaded.
    pub fn variations(&self, item: &Arc<ItemRecord>) -> Result<Vec<Arc<ItemRecord>>, CatalogError> {
        let catalog = self.catalog()?;
        Ok(WearVariationResolver::new(&catalog).variations(item))
    }

    fn check(&self, options: &MatchOptions) -> Result<(), ConfigError> {
        options.validate()?;
        self.config.weights.validate()
    }
}
