//! Canonicalization of catalog names and OCR output before comparison.
//!
//! The normalizer is pure, deterministic and idempotent:
//!
//! 1. empty input yields an empty string
//! 2. lowercase
//! 3. substitute digits OCR commonly confuses with letters (`0→o`, `1→l`, `5→s`, `8→b`)
//! 4. replace every character that is neither alphanumeric nor whitespace with a space
//! 5. remove wear-tier phrases
//! 6. remove filler words (`skin`, `weapon`, `case`, `item`, `collection`)
//! 7. collapse whitespace and trim
//!
//! Removal works on substrings, so a removal can splice together a new
//! occurrence (`"skskinin"`). Steps 5-7 repeat until nothing changes.

use crate::core::types::Wear;

/// Digits OCR engines routinely produce in place of letters
const OCR_DIGIT_SUBSTITUTIONS: [(char, char); 4] = [('0', 'o'), ('1', 'l'), ('5', 's'), ('8', 'b')];

/// Words that show up around item names on screen but never help identify one
pub const FILLER_WORDS: [&str; 5] = ["skin", "weapon", "case", "item", "collection"];

/// Normalize text for comparison
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(substitute_ocr_digit)
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut current = cleaned;
    loop {
        let next = collapse_whitespace(&strip_noise_phrases(&current));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Split normalized text into whitespace-delimited tokens
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

fn substitute_ocr_digit(c: char) -> char {
    OCR_DIGIT_SUBSTITUTIONS
        .iter()
        .find(|(digit, _)| *digit == c)
        .map_or(c, |(_, letter)| *letter)
}

/// Wear labels in the form they take after punctuation is replaced:
/// "Field-Tested" becomes "field tested".
fn wear_phrases() -> impl Iterator<Item = String> {
    Wear::ALL
        .into_iter()
        .map(|w| w.label().to_lowercase().replace('-', " "))
}

fn strip_noise_phrases(text: &str) -> String {
    let mut out = text.to_string();
    for phrase in wear_phrases() {
        out = out.replace(&phrase, "");
    }
    for word in FILLER_WORDS {
        out = out.replace(word, "");
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_catalog_name() {
        assert_eq!(normalize("Negev | Bulkhead (Factory New)"), "negev bulkhead");
        assert_eq!(normalize("AK-47 | Redline (Field-Tested)"), "ak 47 redline");
        assert_eq!(normalize("AWP | Asiimov (Battle-Scarred)"), "awp asiimov");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("|()"), "");
    }

    #[test]
    fn test_ocr_digit_substitution() {
        assert_eq!(normalize("N3GEV | BULKH3AD"), "n3gev bulkh3ad");
        assert_eq!(normalize("A5IIMOV"), "asiimov");
        assert_eq!(normalize("R3DL1NE"), "r3dllne");
        assert_eq!(normalize("C0BALT"), "cobalt");
        assert_eq!(normalize("8LUE"), "blue");
    }

    #[test]
    fn test_filler_words_removed() {
        assert_eq!(normalize("Weapon Case 3"), "3");
        assert_eq!(normalize("Item: Howl Skin"), "howl");
        assert_eq!(normalize("Chroma Collection"), "chroma");
    }

    #[test]
    fn test_removal_repeats_until_stable() {
        assert_eq!(normalize("skskinin howl"), "howl");
        assert_eq!(normalize("factory factory new new"), "");
    }

    #[test]
    fn test_every_wear_tier_is_stripped() {
        for wear in Wear::ALL {
            let hyphenated = format!("AK-47 | Redline ({})", wear.label());
            assert_eq!(normalize(&hyphenated), "ak 47 redline", "{hyphenated}");
        }
        assert_eq!(normalize("AWP Asiimov Well Worn"), "awp asiimov");
        assert_eq!(normalize("AWP Asiimov battle-scarred"), "awp asiimov");
    }

    #[test]
    fn test_wear_phrase_with_ocr_digit() {
        // "Fie1d-Tested" only becomes a wear phrase after digit substitution
        assert_eq!(normalize("Redline Fie1d-Tested"), "redline");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "[ -~]{0,48}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_is_idempotent_on_item_like_text(
            s in "(skin|case|item|factory|new|field|tested|wear|minimal|[a-z0-9]{1,6}| |-|\\|){0,12}"
        ) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_output_is_clean(s in "[ -~]{0,48}") {
            let out = normalize(&s);
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!out.contains("  "));
            prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c == ' '));
        }
    }
}
