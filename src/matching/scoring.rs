use std::collections::HashSet;

use serde::Serialize;

/// Weight of character-level sequence similarity
pub const SEQUENCE_WEIGHT: f64 = 0.50;
/// Weight of token-set overlap
pub const TOKEN_WEIGHT: f64 = 0.30;
/// Weight of substring containment
pub const CONTAINMENT_WEIGHT: f64 = 0.20;

/// Safely convert usize to f64 for ratio calculations
///
/// Strings compared here are item names, far below the range where f64
/// loses integer precision.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// The three similarity signals between two normalized strings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    /// Matched character runs over total length
    pub sequence: f64,

    /// Best of Jaccard and Dice over whitespace token sets
    pub token: f64,

    /// Length ratio when one string contains the other, else 0
    pub containment: f64,

    /// Weighted combination of the above, in [0, 1]
    pub combined: f64,
}

impl SimilarityBreakdown {
    /// Calculate all signals; everything is 0 when either input is empty
    #[must_use]
    pub fn calculate(a: &str, b: &str) -> Self {
        if a.is_empty() || b.is_empty() {
            return Self {
                sequence: 0.0,
                token: 0.0,
                containment: 0.0,
                combined: 0.0,
            };
        }

        let sequence = sequence_ratio(a, b);
        let token = token_similarity(a, b);
        let containment = containment_score(a, b);
        let combined = (SEQUENCE_WEIGHT * sequence
            + TOKEN_WEIGHT * token
            + CONTAINMENT_WEIGHT * containment)
            .clamp(0.0, 1.0);

        Self {
            sequence,
            token,
            containment,
            combined,
        }
    }
}

/// Similarity of two normalized strings in [0, 1]
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityBreakdown::calculate(a, b).combined
}

/// Ratcliff/Obershelp ratio: `2 * M / (len(a) + len(b))` where M counts the
/// characters in the longest common block plus, recursively, the blocks to
/// its left and right.
///
/// Block selection on ties depends on argument order, so the pair is put in
/// a canonical order first to keep the ratio symmetric.
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let total = first.len() + second.len();
    if total == 0 {
        return 1.0;
    }
    count_to_f64(2 * matching_characters(&first, &second)) / count_to_f64(total)
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_characters(&a[..i], &b[..j])
        + matching_characters(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block as `(start_a, start_b, size)`.
/// The earliest block in `a`, then in `b`, wins among equal sizes.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j + 1] = length of the common run ending at a[i - 1], b[j]
    let mut lengths = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut next = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let size = lengths[j] + 1;
                next[j + 1] = size;
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            }
        }
        lengths = next;
    }

    best
}

/// Token overlap: the larger of Jaccard and Dice over whitespace token sets
#[must_use]
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = count_to_f64(tokens_a.intersection(&tokens_b).count());
    let union = count_to_f64(tokens_a.union(&tokens_b).count());

    let jaccard = intersection / union;
    let dice = 2.0 * intersection / count_to_f64(tokens_a.len() + tokens_b.len());
    jaccard.max(dice)
}

/// `min(len) / max(len)` when one string is a substring of the other, else 0
#[must_use]
pub fn containment_score(a: &str, b: &str) -> f64 {
    if !(a.contains(b) || b.contains(a)) {
        return 0.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 0.0;
    }
    count_to_f64(len_a.min(len_b)) / count_to_f64(longest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_sequence_ratio_known_values() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < EPSILON);
        assert!((sequence_ratio("abc", "xyz") - 0.0).abs() < EPSILON);
        assert!((sequence_ratio("redline", "redline") - 1.0).abs() < EPSILON);
        // " redline" + "ak" + "47" = 12 matched of 28 total characters
        assert!((sequence_ratio("ak47 redline ft", "ak 47 redline") - 24.0 / 28.0).abs() < EPSILON);
    }

    #[test]
    fn test_longest_common_block_prefers_earliest() {
        let a: Vec<char> = "abxab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (0, 0, 2));
    }

    #[test]
    fn test_token_similarity() {
        // intersection 1, union 3: jaccard 1/3, dice 2/4
        assert!((token_similarity("awp asiimov", "awp dragon") - 0.5).abs() < EPSILON);
        assert!((token_similarity("awp", "") - 0.0).abs() < EPSILON);
        assert!((token_similarity("a b", "b a") - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_containment() {
        assert!((containment_score("redline", "redline ft") - 0.7).abs() < EPSILON);
        assert!((containment_score("ak 47 redline", "awp") - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert!((similarity("", "awp") - 0.0).abs() < EPSILON);
        assert!((similarity("awp", "") - 0.0).abs() < EPSILON);
        assert!((similarity("", "") - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_breakdown_weights() {
        let b = SimilarityBreakdown::calculate("redline ft", "redline");
        let expected = 0.5 * b.sequence + 0.3 * b.token + 0.2 * b.containment;
        assert!((b.combined - expected).abs() < EPSILON);
        assert!((b.containment - 0.7).abs() < EPSILON);
    }

    proptest! {
        #[test]
        fn prop_self_similarity_is_maximal(s in "[a-z0-9]{1,10}( [a-z0-9]{1,10}){0,4}") {
            prop_assert!((similarity(&s, &s) - 1.0).abs() < EPSILON);
        }

        #[test]
        fn prop_similarity_is_symmetric(a in "[a-e ]{0,16}", b in "[a-e ]{0,16}") {
            prop_assert!((similarity(&a, &b) - similarity(&b, &a)).abs() < EPSILON);
        }

        #[test]
        fn prop_similarity_is_bounded(a in "[ -~]{0,24}", b in "[ -~]{0,24}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
