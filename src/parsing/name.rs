//! Decomposition of item names into weapon, skin and wear.

use serde::Serialize;
use tracing::debug;

/// Components of an item name. Empty strings mean "not determinable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    /// Weapon or category, e.g. "AK-47"
    pub weapon: String,
    /// Skin or variant name, e.g. "Redline"
    pub skin: String,
    /// Raw wear suffix without parentheses, e.g. "Field-Tested"
    pub wear: Option<String>,
}

impl ParsedName {
    /// Both weapon and skin were recovered
    #[must_use]
    pub fn has_components(&self) -> bool {
        !self.weapon.is_empty() && !self.skin.is_empty()
    }
}

/// Parse an item name such as `"Negev | Bulkhead (Factory New)"`.
///
/// A trailing parenthesized group is taken as the wear. The rest is split on
/// the first `|`; without a pipe it falls back to the first whitespace, and
/// a single word becomes the weapon with an empty skin.
#[must_use]
pub fn parse_item_name(name: &str) -> ParsedName {
    let mut rest = name.trim();
    if rest.is_empty() {
        return ParsedName::default();
    }

    let mut wear = None;
    if let Some(body) = rest.strip_suffix(')') {
        if let Some(open) = body.find('(') {
            let label = &body[open + 1..];
            if !label.is_empty() {
                wear = Some(label.to_string());
            }
            rest = body[..open].trim();
        }
    }

    let (weapon, skin) = if let Some((weapon, skin)) = rest.split_once('|') {
        (weapon.trim(), skin.trim())
    } else if let Some((weapon, skin)) = rest.split_once(char::is_whitespace) {
        debug!(name, "no '|' separator, splitting on first whitespace");
        (weapon, skin.trim())
    } else {
        (rest, "")
    };

    ParsedName {
        weapon: weapon.to_string(),
        skin: skin.to_string(),
        wear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_name() {
        let parsed = parse_item_name("AK-47 | Redline (Field-Tested)");
        assert_eq!(parsed.weapon, "AK-47");
        assert_eq!(parsed.skin, "Redline");
        assert_eq!(parsed.wear.as_deref(), Some("Field-Tested"));
        assert!(parsed.has_components());
    }

    #[test]
    fn test_parse_single_word() {
        let parsed = parse_item_name("Negev");
        assert_eq!(parsed.weapon, "Negev");
        assert_eq!(parsed.skin, "");
        assert_eq!(parsed.wear, None);
        assert!(!parsed.has_components());
    }

    #[test]
    fn test_parse_whitespace_fallback() {
        let parsed = parse_item_name("AK47 Redline FT");
        assert_eq!(parsed.weapon, "AK47");
        assert_eq!(parsed.skin, "Redline FT");
        assert_eq!(parsed.wear, None);
    }

    #[test]
    fn test_parse_splits_on_first_pipe_only() {
        let parsed = parse_item_name("Sticker | Team | Katowice 2014");
        assert_eq!(parsed.weapon, "Sticker");
        assert_eq!(parsed.skin, "Team | Katowice 2014");
    }

    #[test]
    fn test_parse_non_canonical_wear() {
        let parsed = parse_item_name("Sticker | Crown (Foil)");
        assert_eq!(parsed.weapon, "Sticker");
        assert_eq!(parsed.skin, "Crown");
        assert_eq!(parsed.wear.as_deref(), Some("Foil"));
    }

    #[test]
    fn test_parse_unicode_name() {
        let parsed = parse_item_name("★ Karambit | Doppler (Factory New)");
        assert_eq!(parsed.weapon, "★ Karambit");
        assert_eq!(parsed.skin, "Doppler");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_item_name(""), ParsedName::default());
        assert_eq!(parse_item_name("   "), ParsedName::default());
    }

    #[test]
    fn test_parse_case_name() {
        let parsed = parse_item_name("Chroma 2 Case");
        assert_eq!(parsed.weapon, "Chroma");
        assert_eq!(parsed.skin, "2 Case");
    }
}
