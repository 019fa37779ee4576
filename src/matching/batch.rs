//! Matching many detected strings at once.
//!
//! One screenshot usually yields several detected regions. Each is cleaned
//! and matched independently, so the batch is spread over the rayon pool;
//! results still come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::matching::engine::{MatchOptions, MatchingEngine};
use crate::matching::report::MatchReport;
use crate::parsing::ocr::clean_detected_text;
use crate::utils::validation::ConfigError;

/// What happened to one detected string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// At least one candidate cleared the threshold
    Found,
    NotFound,
    /// Nothing was left after cleanup
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub original: String,
    pub cleaned: String,
    pub status: BatchStatus,
    pub report: MatchReport,
}

/// Clean and match every string in `texts`
///
/// # Errors
///
/// Returns a `ConfigError` if the options or the engine's weights are invalid;
/// nothing is matched in that case.
pub fn match_batch<T>(
    engine: &MatchingEngine<'_>,
    texts: &[T],
    options: &MatchOptions,
) -> Result<Vec<BatchEntry>, ConfigError>
where
    T: AsRef<str> + Sync,
{
    options.validate()?;
    engine.config().weights.validate()?;

    texts
        .par_iter()
        .map(|text| match_one(engine, text.as_ref(), options))
        .collect()
}

fn match_one(
    engine: &MatchingEngine<'_>,
    original: &str,
    options: &MatchOptions,
) -> Result<BatchEntry, ConfigError> {
    let cleaned = clean_detected_text(original);
    if cleaned.is_empty() {
        return Ok(BatchEntry {
            original: original.to_string(),
            cleaned,
            status: BatchStatus::Empty,
            report: MatchReport::no_match(),
        });
    }

    let matches = engine.find_matches(&cleaned, options)?;
    let report = MatchReport::classify(matches, engine.catalog());
    let status = if report.is_match() {
        BatchStatus::Found
    } else {
        BatchStatus::NotFound
    };

    Ok(BatchEntry {
        original: original.to_string(),
        cleaned,
        status,
        report,
    })
}
