//! # skin-solver
//!
//! A library for identifying game items from text read off screenshots.
//!
//! OCR output is noisy: digits stand in for letters, wear suffixes are cut
//! off, separators vanish. `skin-solver` normalizes that text and matches it
//! against a catalog of known items named `weapon | skin (wear)`, returning
//! ranked candidates, a confidence level and every wear tier of the best match.
//!
//! ## Features
//!
//! - **OCR-tolerant normalization**: Digit substitution, punctuation and filler stripping
//! - **Cascading strategies**: Cheap containment prefilters before a fuzzy full scan
//! - **Explainable scores**: Sequence, token and containment signals per comparison
//! - **Wear variations**: All tiers of an item, Factory New to Battle-Scarred
//! - **Shared catalog**: Built once, read from many threads, swapped whole on rebuild
//!
//! ## Example
//!
//! ```rust
//! use skin_solver::{CatalogCache, ItemRecord, MatchOptions, MatchReport, MatchingEngine};
//!
//! let catalog = CatalogCache::from_items([
//!     ItemRecord::new("1", "AK-47 | Redline (Field-Tested)"),
//!     ItemRecord::new("2", "AK-47 | Redline (Minimal Wear)"),
//!     ItemRecord::new("3", "AWP | Asiimov (Field-Tested)"),
//! ]);
//!
//! let engine = MatchingEngine::new(&catalog);
//! let matches = engine.find_matches("AK47 Redline FT", &MatchOptions::default()).unwrap();
//! let report = MatchReport::classify(matches, &catalog);
//!
//! let best = report.best_match.unwrap();
//! assert_eq!(best.skin_name, "Redline");
//! assert_eq!(report.wear_variations.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog cache, snapshot I/O and the shared lazily built catalog
//! - [`core`]: Item records, wear tiers and result classification types
//! - [`matching`]: Matching engine, similarity scoring, reports and batches
//! - [`parsing`]: Normalization, name parsing, OCR cleanup and TSV snapshots
//! - [`matcher`]: [`ItemMatcher`], the all-in-one entry point
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matcher;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::shared::{CatalogSource, FileSource, SharedCatalog};
pub use catalog::store::{CatalogCache, CatalogError, LoadDiagnostics};
pub use core::item::{ItemRecord, RawItemRecord};
pub use core::types::*;
pub use matcher::{ItemMatcher, MatchError};
pub use matching::engine::{
    CascadeWeights, MatchCandidate, MatchOptions, MatchStrategy, MatchingConfig, MatchingEngine,
};
pub use matching::report::MatchReport;
pub use utils::validation::ConfigError;
