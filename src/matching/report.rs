use std::sync::Arc;

use serde::Serialize;

use crate::catalog::store::CatalogCache;
use crate::core::item::ItemRecord;
use crate::core::types::{Confidence, MatchStatus};
use crate::matching::engine::MatchCandidate;
use crate::matching::variations::WearVariationResolver;

/// Item type whose listing never goes past the best match
const SINGLE_RESULT_ITEM_TYPE: &str = "graffiti";

/// Outcome of matching one piece of detected text
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub status: MatchStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    /// Score of the best match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Candidates in ranked order
    pub matches: Vec<MatchCandidate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<Arc<ItemRecord>>,

    /// Every wear tier of the best match, Factory New first
    pub wear_variations: Vec<Arc<ItemRecord>>,
}

impl MatchReport {
    /// Report for text that matched nothing
    #[must_use]
    pub fn no_match() -> Self {
        Self {
            status: MatchStatus::NoMatch,
            confidence: None,
            score: None,
            matches: Vec::new(),
            best_match: None,
            wear_variations: Vec::new(),
        }
    }

    /// Classify ranked candidates into a report
    ///
    /// The first candidate is taken as the best match; its score sets the
    /// confidence and its wear variations are looked up in `catalog`.
    #[must_use]
    pub fn classify(matches: Vec<MatchCandidate>, catalog: &CatalogCache) -> Self {
        let Some(best) = matches.first() else {
            return Self::no_match();
        };

        let best_item = Arc::clone(&best.item);
        let score = best.score;
        let wear_variations = WearVariationResolver::new(catalog).variations(&best_item);

        Self {
            status: MatchStatus::Matched,
            confidence: Some(Confidence::from_score(score)),
            score: Some(score),
            matches,
            best_match: Some(best_item),
            wear_variations,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.status == MatchStatus::Matched
    }

    /// Flatten the report into display rows
    ///
    /// Each match is listed with a tier from its own score. Wear variations of
    /// the best match that are not already listed follow with tier
    /// `Variation` and score 0. Graffiti only ever lists the best match.
    #[must_use]
    pub fn listing(&self) -> Vec<ListingEntry> {
        let mut entries: Vec<ListingEntry> = self
            .matches
            .iter()
            .map(|m| ListingEntry {
                item: Arc::clone(&m.item),
                score: m.score,
                tier: ListingTier::from(Confidence::from_score(m.score)),
            })
            .collect();

        let single_result = self
            .best_match
            .as_ref()
            .is_some_and(|best| best.item_type.eq_ignore_ascii_case(SINGLE_RESULT_ITEM_TYPE));
        if single_result {
            entries.truncate(1);
            return entries;
        }

        for variation in &self.wear_variations {
            if !entries.iter().any(|e| same_record(&e.item, variation)) {
                entries.push(ListingEntry {
                    item: Arc::clone(variation),
                    score: 0.0,
                    tier: ListingTier::Variation,
                });
            }
        }

        entries
    }

    /// Listing restricted to one item type (case-insensitive), or the full
    /// listing when `item_type` is `None`
    #[must_use]
    pub fn listing_for(&self, item_type: Option<&str>) -> Vec<ListingEntry> {
        let entries = self.listing();
        match item_type {
            Some(wanted) => entries
                .into_iter()
                .filter(|e| e.item.item_type.eq_ignore_ascii_case(wanted))
                .collect(),
            None => entries,
        }
    }
}

fn same_record(a: &Arc<ItemRecord>, b: &Arc<ItemRecord>) -> bool {
    Arc::ptr_eq(a, b) || (!a.id.is_empty() && a.id == b.id)
}

/// One row of a report listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    pub item: Arc<ItemRecord>,
    pub score: f64,
    pub tier: ListingTier,
}

/// Confidence of a listed row, or `Variation` for wear variations that were
/// not matched themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTier {
    High,
    Medium,
    Low,
    Variation,
}

impl From<Confidence> for ListingTier {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::High => Self::High,
            Confidence::Medium => Self::Medium,
            Confidence::Low => Self::Low,
        }
    }
}

impl std::fmt::Display for ListingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
            Self::Variation => write!(f, "VARIATION"),
        }
    }
}
