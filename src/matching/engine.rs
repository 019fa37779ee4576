use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::CatalogCache;
use crate::core::item::ItemRecord;
use crate::matching::scoring::similarity;
use crate::parsing::name::{parse_item_name, ParsedName};
use crate::parsing::normalize::{normalize, tokens};
use crate::utils::validation::{
    validate_max_results, validate_threshold, validate_weight, ConfigError,
};

/// Default number of candidates returned per query
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default minimum score for a candidate to be kept
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Tokens this short are treated as OCR noise by the token prefilter
const NOISE_TOKEN_MAX_CHARS: usize = 2;

/// The token prefilter looks at no more than this many significant tokens
const MAX_SIGNIFICANT_TOKENS: usize = 2;

/// A catalog item scored against a query
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub item: Arc<ItemRecord>,

    /// Similarity in [0, 1]
    pub score: f64,

    /// Which stage of the cascade produced this candidate
    pub strategy: MatchStrategy,
}

/// Per-call options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Maximum number of candidates to return (at least 1)
    pub max_results: usize,
    /// Minimum score to keep a candidate, within [0, 1]
    pub threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if `threshold` is outside [0, 1] or
    /// `max_results` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.threshold)?;
        validate_max_results(self.max_results)?;
        Ok(())
    }
}

/// Empirical constants of the cascade. Tunable; nothing depends on their
/// exact values for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeWeights {
    /// Multiplier rewarding candidates that contain every significant token
    pub token_boost: f64,
    /// Weight of the weapon score in the component comparison
    pub weapon_weight: f64,
    /// Weight of the skin score in the component comparison
    pub skin_weight: f64,
}

impl Default for CascadeWeights {
    fn default() -> Self {
        Self {
            token_boost: 1.2,
            weapon_weight: 0.4, // skin names discriminate better than weapons
            skin_weight: 0.6,
        }
    }
}

impl CascadeWeights {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeight` for a negative or non-finite weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_weight("token_boost", self.token_boost)?;
        validate_weight("weapon_weight", self.weapon_weight)?;
        validate_weight("skin_weight", self.skin_weight)?;
        Ok(())
    }
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: CascadeWeights,
}

/// A query prepared for matching
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub normalized: String,
    /// Parsed from the raw text, which still has the punctuation the parser needs
    pub parsed: ParsedName,
    weapon_normalized: String,
    skin_normalized: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let parsed = parse_item_name(raw);
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
            weapon_normalized: normalize(&parsed.weapon),
            skin_normalized: normalize(&parsed.skin),
            parsed,
        }
    }

    /// The first tokens longer than two characters, at most two of them
    pub fn significant_tokens(&self) -> Vec<&str> {
        tokens(&self.normalized)
            .filter(|t| t.chars().count() > NOISE_TOKEN_MAX_CHARS)
            .take(MAX_SIGNIFICANT_TOKENS)
            .collect()
    }
}

/// Stages of the matching cascade, cheapest and most precise first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Base names containing every significant query token
    TokenPrefilter,
    /// Base names containing both the parsed weapon and skin
    ComponentPrefilter,
    /// Every record, best of full, base and component similarity
    Exhaustive,
}

impl MatchStrategy {
    /// Tried in order until one yields a candidate
    pub const CASCADE: [Self; 3] = [
        Self::TokenPrefilter,
        Self::ComponentPrefilter,
        Self::Exhaustive,
    ];

    /// Candidates this strategy keeps for `query`, in catalog order
    #[must_use]
    pub fn candidates(
        self,
        query: &Query,
        catalog: &CatalogCache,
        threshold: f64,
        weights: &CascadeWeights,
    ) -> Vec<MatchCandidate> {
        let finder = CandidateFinder::new(catalog);
        let keep = |item: &Arc<ItemRecord>, score: f64| {
            (score >= threshold).then(|| MatchCandidate {
                item: Arc::clone(item),
                score,
                strategy: self,
            })
        };

        match self {
            Self::TokenPrefilter => {
                let significant = query.significant_tokens();
                finder
                    .base_name_contains_all(&significant)
                    .filter_map(|item| {
                        let base = similarity(&query.normalized, &item.base_normalized);
                        keep(item, (base * weights.token_boost).min(1.0))
                    })
                    .collect()
            }
            Self::ComponentPrefilter => {
                if !query.parsed.has_components() {
                    return Vec::new();
                }
                let needles = [
                    query.weapon_normalized.as_str(),
                    query.skin_normalized.as_str(),
                ];
                finder
                    .base_name_contains_all(&needles)
                    .filter_map(|item| {
                        keep(item, similarity(&query.normalized, &item.base_normalized))
                    })
                    .collect()
            }
            Self::Exhaustive => catalog
                .items()
                .iter()
                .filter_map(|item| {
                    let full = similarity(&query.normalized, &item.normalized);
                    let base = similarity(&query.normalized, &item.base_normalized);
                    let component = component_similarity(query, item, weights);
                    keep(item, full.max(base).max(component))
                })
                .collect(),
        }
    }
}

/// Weighted weapon/skin similarity, or 0 unless both sides score above 0
fn component_similarity(query: &Query, item: &ItemRecord, weights: &CascadeWeights) -> f64 {
    if !query.parsed.has_components() {
        return 0.0;
    }

    let weapon = similarity(&query.weapon_normalized, &item.weapon_normalized);
    let skin = similarity(&query.skin_normalized, &item.skin_normalized);
    if weapon > 0.0 && skin > 0.0 {
        weights.weapon_weight * weapon + weights.skin_weight * skin
    } else {
        0.0
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    catalog: &'a CatalogCache,
    /// Configuration including cascade weights
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(catalog: &'a CatalogCache) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(catalog: &'a CatalogCache, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a CatalogCache {
        self.catalog
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find the best matching items for a piece of detected text
    ///
    /// Empty or whitespace-only text yields no candidates. Candidates come
    /// from the first strategy in [`MatchStrategy::CASCADE`] that keeps any,
    /// sorted by score descending with catalog order kept among ties.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the options or the configured weights are invalid.
    pub fn find_matches(
        &self,
        text: &str,
        options: &MatchOptions,
    ) -> Result<Vec<MatchCandidate>, ConfigError> {
        options.validate()?;
        self.config.weights.validate()?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::new(text);
        let mut matches = MatchStrategy::CASCADE
            .into_iter()
            .find_map(|strategy| {
                let found = strategy.candidates(
                    &query,
                    self.catalog,
                    options.threshold,
                    &self.config.weights,
                );
                if found.is_empty() {
                    return None;
                }
                debug!(
                    query = %query.raw,
                    ?strategy,
                    candidates = found.len(),
                    "strategy produced candidates"
                );
                Some(found)
            })
            .unwrap_or_default();

        // Stable sort keeps catalog order among equal scores
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(options.max_results);

        Ok(matches)
    }

    /// Find the single best match
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configured weights are invalid.
    pub fn find_best_match(&self, text: &str) -> Result<Option<MatchCandidate>, ConfigError> {
        let options = MatchOptions::default().with_max_results(1);
        Ok(self.find_matches(text, &options)?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_catalog() -> CatalogCache {
        CatalogCache::from_items([
            ItemRecord::new("1", "AK-47 | Redline (Field-Tested)"),
            ItemRecord::new("2", "AWP | Asiimov (Field-Tested)"),
            ItemRecord::new("3", "M4A4 | Howl (Factory New)"),
            ItemRecord::new("4", "Negev | Bulkhead (Factory New)"),
            ItemRecord::new("5", "Glock-18 | Fade (Factory New)"),
        ])
    }

    #[test]
    fn test_ocr_noise_finds_redline() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine
            .find_matches("AK47 Redline FT", &MatchOptions::default())
            .unwrap();
        assert!(!matches.is_empty());
        assert_eq!(matches[0].item.name, "AK-47 | Redline (Field-Tested)");
        assert!(matches[0].score >= 0.4);
        assert_eq!(matches[0].strategy, MatchStrategy::Exhaustive);
    }

    #[test]
    fn test_token_prefilter_boosts_and_caps() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine
            .find_matches("AWP | Asiimov", &MatchOptions::default())
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].strategy, MatchStrategy::TokenPrefilter);
        assert!((matches[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_significant_token_uses_token_stage() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let matches = engine.find_matches("Howl", &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.name, "M4A4 | Howl (Factory New)");
        assert_eq!(matches[0].strategy, MatchStrategy::TokenPrefilter);
        // 1.2 x (0.5 x 8/13 + 0.3 x 2/3 + 0.2 x 4/9)
        assert!((matches[0].score - 0.7159).abs() < 1e-3);
    }

    #[test]
    fn test_component_prefilter_when_tokens_are_short() {
        let catalog = CatalogCache::from_items([
            ItemRecord::new("1", "AK-47 | Hot Rod (Factory New)"),
            ItemRecord::new("2", "M4A4 | Howl (Factory New)"),
        ]);
        let engine = MatchingEngine::new(&catalog);

        // Every token is two characters or fewer, so the token stage has nothing to go on
        let options = MatchOptions::default().with_threshold(0.3);
        let matches = engine.find_matches("AK | Ho", &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.id.0, "1");
        assert_eq!(matches[0].strategy, MatchStrategy::ComponentPrefilter);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        assert!(engine.find_matches("", &MatchOptions::default()).unwrap().is_empty());
        assert!(engine.find_matches("  \t", &MatchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let result = engine.find_matches("", &MatchOptions::default().with_threshold(1.5));
        assert_eq!(result.unwrap_err(), ConfigError::InvalidThreshold(1.5));

        let result = engine.find_matches("AWP", &MatchOptions::default().with_max_results(0));
        assert_eq!(result.unwrap_err(), ConfigError::InvalidMaxResults);
    }

    #[test]
    fn test_invalid_weights_fail_fast() {
        let catalog = make_test_catalog();
        let config = MatchingConfig {
            weights: CascadeWeights {
                token_boost: -1.0,
                ..CascadeWeights::default()
            },
        };
        let engine = MatchingEngine::with_config(&catalog, config);
        assert!(matches!(
            engine.find_matches("AWP", &MatchOptions::default()),
            Err(ConfigError::InvalidWeight { name: "token_boost", .. })
        ));
    }

    #[test]
    fn test_max_results_limits_output() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let options = MatchOptions::default().with_threshold(0.0).with_max_results(2);
        let matches = engine.find_matches("zzzz qqqq", &options).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = CatalogCache::from_items([
            ItemRecord::new("a", "AWP | Asiimov (Field-Tested)"),
            ItemRecord::new("b", "AWP | Asiimov (Minimal Wear)"),
            ItemRecord::new("c", "AWP | Asiimov (Battle-Scarred)"),
        ]);
        let engine = MatchingEngine::new(&catalog);

        let matches = engine
            .find_matches("AWP Asiimov", &MatchOptions::default())
            .unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.item.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nothing_above_threshold() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let options = MatchOptions::default().with_threshold(0.95);
        assert!(engine.find_matches("qwxz", &options).unwrap().is_empty());
    }

    #[test]
    fn test_significant_tokens() {
        let query = Query::new("ak 47 | x Redline Vulcan");
        assert_eq!(query.significant_tokens(), vec!["redline", "vulcan"]);
        assert_eq!(Query::new("mp9 ak").significant_tokens(), vec!["mp9"]);
    }

    #[test]
    fn test_find_best_match() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);

        let best = engine.find_best_match("Negev Bulkhead").unwrap();
        assert_eq!(best.unwrap().item.id.0, "4");
    }

    #[test]
    fn test_deterministic() {
        let catalog = make_test_catalog();
        let engine = MatchingEngine::new(&catalog);
        let options = MatchOptions::default().with_threshold(0.1);

        let first = engine.find_matches("Gl0ck Fad3", &options).unwrap();
        let second = engine.find_matches("Gl0ck Fad3", &options).unwrap();
        let key = |m: &Vec<MatchCandidate>| {
            m.iter()
                .map(|c| (c.item.id.clone(), c.score.to_bits()))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&first), key(&second));
    }
}
