// String metric trait — swap-ready abstraction over the distance function.
//
// The indexers only need "how far apart are these two normalized words";
// Levenshtein is the default, but another metric (e.g. a weighted or
// phonetic one) can be plugged in without touching the aggregation code.

use super::distance::edit_distance;

/// A distance between two already-normalized words.
pub trait StringMetric {
    /// Raw distance in edit operations.
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Distance scaled into [0, 1] by the longer word's length.
    /// Two empty words are at distance 0.
    fn normalized(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            0.0
        } else {
            self.distance(a, b) as f64 / max_len as f64
        }
    }
}

/// Classic unit-cost Levenshtein distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl StringMetric for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        edit_distance(a, b)
    }
}
