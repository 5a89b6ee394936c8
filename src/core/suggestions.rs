//! Suggestion-chip labels.
//!
//! The backend numbers its suggested questions ("1. ...", "- ...", "2) ...").
//! Chips show the question alone.

/// Strips leading digits, dashes, dots and whitespace. The remainder is kept verbatim.
pub fn chip_label(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_ascii_digit() || c == '-' || c == '.' || c.is_whitespace())
}

/// Derives chip labels for a suggestion list, in order.
pub fn chip_labels(raw: &[String]) -> Vec<String> {
    raw.iter().map(|s| chip_label(s).to_string()).collect()
}
