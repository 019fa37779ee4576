//! Item matching engine and scoring algorithms.
//!
//! This module provides the core matching functionality:
//!
//! - [`engine::MatchingEngine`]: Main entry point for finding item matches
//! - [`scoring::SimilarityBreakdown`]: Similarity signals between two normalized strings
//! - [`report::MatchReport`]: Confidence, best match and wear variations for a query
//! - [`batch::match_batch`]: Parallel matching of many detected strings
//!
//! ## Matching Algorithm
//!
//! Strategies are tried in order until one keeps a candidate:
//!
//! 1. **Token prefilter**: Base names containing the query's significant tokens, score boosted
//! 2. **Component prefilter**: Base names containing the parsed weapon and skin
//! 3. **Exhaustive**: Every item, best of full name, base name and weighted components
//!
//! ## Scoring
//!
//! The similarity of two normalized strings combines:
//!
//! - **Sequence**: Ratcliff/Obershelp ratio of matching character runs (50%)
//! - **Token**: Best of Jaccard and Dice over word sets (30%)
//! - **Containment**: Length ratio when one string contains the other (20%)
//!
//! ## Example
//!
//! ```rust
//! use skin_solver::{CatalogCache, ItemRecord, MatchOptions, MatchingEngine};
//!
//! let catalog = CatalogCache::from_items([
//!     ItemRecord::new("1", "Negev | Bulkhead (Factory New)"),
//!     ItemRecord::new("2", "AWP | Asiimov (Field-Tested)"),
//! ]);
//!
//! let engine = MatchingEngine::new(&catalog);
//! let options = MatchOptions::default().with_max_results(3);
//! for m in engine.find_matches("Negev Bu1khead", &options).unwrap() {
//!     println!("{}: {:.1}% ({:?})", m.item.name, m.score * 100.0, m.strategy);
//! }
//! ```

pub mod batch;
pub mod engine;
pub mod report;
pub mod scoring;
pub mod variations;
