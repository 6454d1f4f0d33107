//! Text normalization for merchant name and city fields.
//!
//! The BR Code standard restricts these fields to a small uppercase ASCII
//! alphabet. Human-supplied text ("São Paulo", "Açaí do João") is decomposed,
//! stripped of diacritics, and filtered down to `[A-Z0-9 ]`.

use unicode_normalization::UnicodeNormalization;

/// Normalizes arbitrary text into the character set the standard permits.
///
/// Steps: uppercase, NFD-decompose, drop combining marks, drop anything
/// outside `[A-Z0-9 ]`, trim. Always succeeds; fully-invalid input yields
/// an empty string, which the caller must treat as a missing value.
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .to_uppercase()
        .nfd()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    filtered.trim().to_string()
}
