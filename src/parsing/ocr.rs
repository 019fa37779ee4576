//! Cleanup of raw detector output before it reaches the matcher.
//!
//! Detection pipelines label their regions ("Item 3: ...") and leave markers
//! such as `[OCR failed]` where a crop could not be read. Neither is part of
//! an item name.

use once_cell::sync::Lazy;
use regex::Regex;

static ITEM_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Item \d+:\s*").expect("item label pattern is valid"));
static BRACKET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]\n]*\]").expect("bracket marker pattern is valid"));

/// Strip detector labels and markers from a detected string
#[must_use]
pub fn clean_detected_text(text: &str) -> String {
    let collapsed = collapse(text);
    let unlabeled = ITEM_LABEL.replace(&collapsed, "");
    let unmarked = BRACKET_MARKER.replace_all(&unlabeled, "");
    collapse(&unmarked)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
