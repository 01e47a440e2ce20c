//! Input normalization.

use deunicode::deunicode;

/// Lowercase and trim.
#[inline]
pub fn fold_case(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lowercase, strip diacritics and trim.
///
/// Used for breed labels so that "Pastor Alemán" and "pastor aleman" compare
/// equal.
pub fn fold_label(text: &str) -> String {
    deunicode(text).to_lowercase().trim().to_string()
}
