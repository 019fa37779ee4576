//! Command-line interface for skin-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **identify**: Match one piece of detected text against the catalog
//! - **batch**: Clean and match every line of a file of detected text
//! - **score**: Show the similarity breakdown between two strings
//! - **catalog**: List, summarize, inspect or export a catalog snapshot
//!
//! ## Usage
//!
//! ```text
//! # Identify one detected string
//! skin-solver identify "AK47 Redline FT" --catalog items.json
//!
//! # Match every line of an OCR dump, in parallel
//! skin-solver batch detections.txt --catalog items.tsv --format json
//!
//! # Pipe from the detector
//! ocr-detect screenshot.png | skin-solver batch - --catalog items.json
//!
//! # Why do two names score the way they do?
//! skin-solver score "AWP Asimov" "AWP | Asiimov (Field-Tested)"
//!
//! # All wear tiers of an item
//! skin-solver catalog variations "AWP | Asiimov (Field-Tested)" --catalog items.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::shared::{CatalogSource, FileSource};
use crate::catalog::store::{CatalogCache, SnapshotFormat};
use crate::matching::engine::{
    CascadeWeights, MatchOptions, MatchingConfig, DEFAULT_MAX_RESULTS, DEFAULT_THRESHOLD,
};

pub mod batch;
pub mod catalog;
pub mod identify;
pub mod score;

#[derive(Parser)]
#[command(name = "skin-solver")]
#[command(version)]
#[command(about = "Match noisy OCR text against a catalog of game items")]
#[command(
    long_about = "skin-solver identifies game items from text read off screenshots.\n\nDetected text is normalized and matched against a catalog snapshot with a cascade of strategies:\n- Token containment for clean reads\n- Weapon and skin containment for partial reads\n- Fuzzy similarity over the whole catalog as a last resort\n\nEvery match comes with a confidence level and the other wear tiers of the same item."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the catalog item named by a piece of detected text
    Identify(identify::IdentifyArgs),

    /// Identify every line of a file of detected text
    Batch(batch::BatchArgs),

    /// Score the similarity of two strings
    Score(score::ScoreArgs),

    /// Inspect a catalog snapshot
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Where the catalog snapshot comes from
#[derive(Args, Clone, Debug)]
pub struct CatalogOpts {
    /// Catalog snapshot (JSON, TSV or CSV)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Snapshot format (detected from the file extension by default)
    #[arg(long, value_enum)]
    pub catalog_format: Option<SnapshotFormat>,
}

impl CatalogOpts {
    pub fn source(&self) -> FileSource {
        let source = FileSource::new(&self.catalog);
        match self.catalog_format {
            Some(format) => source.with_format(format),
            None => source,
        }
    }

    /// Read and index the snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    pub fn load(&self, verbose: bool) -> anyhow::Result<CatalogCache> {
        let catalog = CatalogCache::build(self.source().snapshot()?);
        if verbose {
            report_load(&catalog);
        }
        Ok(catalog)
    }
}

/// Print catalog load diagnostics to stderr
pub fn report_load(catalog: &CatalogCache) {
    let diagnostics = catalog.diagnostics();
    eprintln!(
        "Loaded catalog with {} items ({} rows skipped)",
        diagnostics.loaded,
        diagnostics.skipped()
    );
}

/// Matching options shared by `identify` and `batch`
#[derive(Args, Clone, Debug)]
pub struct MatchArgs {
    /// Number of matches to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Minimum similarity for a candidate, within [0, 1]
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    // === Cascade tuning ===
    /// Multiplier for candidates containing every significant token
    #[arg(long, default_value_t = 1.2)]
    pub token_boost: f64,

    /// Weight of the weapon score in component comparison
    #[arg(long, default_value_t = 0.4)]
    pub weapon_weight: f64,

    /// Weight of the skin score in component comparison
    #[arg(long, default_value_t = 0.6)]
    pub skin_weight: f64,
}

impl MatchArgs {
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            max_results: self.max_results,
            threshold: self.threshold,
        }
    }

    #[must_use]
    pub fn config(&self) -> MatchingConfig {
        MatchingConfig {
            weights: CascadeWeights {
                token_boost: self.token_boost,
                weapon_weight: self.weapon_weight,
                skin_weight: self.skin_weight,
            },
        }
    }
}
