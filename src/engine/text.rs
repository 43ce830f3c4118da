//! Text helpers shared by the engine passes.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Pagination stamps such as "Page 3 of 12".
fn pagination_regex() -> &'static Regex {
    static PAGINATION: OnceLock<Regex> = OnceLock::new();
    PAGINATION.get_or_init(|| {
        Regex::new(r"(?i)^\s*page\s+\d+\s+of\s+\d+\s*$").expect("pagination pattern is valid")
    })
}

/// Check if the text is a "Page N of M" stamp.
pub fn is_pagination(text: &str) -> bool {
    pagination_regex().is_match(text)
}

/// Check if the text contains at least one letter.
pub fn has_alphabetic(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// Round a size to the nearest multiple of `quantum`, ties to even.
///
/// A 14.25pt run therefore lands on 14.0 and a 14.75pt run on 15.0.
pub fn quantize(size: f32, quantum: f32) -> f32 {
    let scaled = size / quantum;
    let steps = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    steps * quantum
}

/// NFC-normalize and collapse whitespace runs to single spaces.
pub fn normalize_title(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}
