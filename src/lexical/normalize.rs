// Word normalization — strips diacritics and case so translations can be
// compared on their base letters.
//
// "Liście" -> "liscie", "légume" -> "legume". Letters without a canonical
// decomposition (e.g. "ł", "ß") are kept as they are.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, decompose (NFD), and drop every combining mark.
///
/// Lowercasing happens before decomposition so that case mappings which
/// introduce combining marks (e.g. "İ" -> "i̇") are stripped too, which keeps
/// the function idempotent. Empty input normalizes to the empty string.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .nfd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}
