//! Transcript judging: the comparison policy between a spoken transcript
//! and a target word.
//!
//! Both sides are whitespace-trimmed and case-folded, then compared for
//! exact equality. No fuzzy or partial matching.

/// Normalize text for comparison: trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether a transcript counts as a correct reading of the target.
#[must_use]
pub fn matches(target: &str, transcript: &str) -> bool {
    normalize(target) == normalize(transcript)
}
