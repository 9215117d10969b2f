// Edit distance — Wagner-Fischer dynamic programming with unit costs.
//
// Distances are counted in Unicode scalar values, not bytes, so "ł" and "l"
// differ by one substitution like any other pair of letters.

use super::normalize::normalize;
use super::traits::{Levenshtein, StringMetric};

/// Minimum number of single-character insertions, deletions, and
/// substitutions that turn `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP table: prev[j] = distance(a[..i], b[..j])
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance divided by the longer string's length, in [0, 1].
///
/// Operates on the strings exactly as given. Two empty strings are at
/// distance 0.
pub fn length_normalized_distance(a: &str, b: &str) -> f64 {
    Levenshtein.normalized(a, b)
}

/// Length-normalized edit distance between the normalized forms of two words.
///
/// Both operands go through [`normalize`] first so that accents and case do
/// not count as edits when comparing across languages.
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    length_normalized_distance(&normalize(a), &normalize(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitten_sitting() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert!((normalized_distance("kitten", "sitting") - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_is_zero() {
        assert_eq!(edit_distance("maison", "maison"), 0);
        assert_eq!(normalized_distance("maison", "maison"), 0.0);
    }

    #[test]
    fn test_empty_operand() {
        assert_eq!(edit_distance("", "hund"), 4);
        assert_eq!(edit_distance("hund", ""), 4);
        assert_eq!(length_normalized_distance("", ""), 0.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(edit_distance("łza", "lza"), 1);
        assert!((length_normalized_distance("łza", "lza") - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_ignores_accents_and_case() {
        assert_eq!(normalized_distance("Légume", "legume"), 0.0);
        // The raw form still sees two edits
        assert!(length_normalized_distance("Légume", "legume") > 0.0);
    }

    #[test]
    fn test_completely_different_is_one() {
        assert_eq!(normalized_distance("abc", "xyz"), 1.0);
    }
}
