// Lexical primitives — word normalization and edit distance.

pub mod distance;
pub mod normalize;
pub mod traits;

pub use distance::{edit_distance, length_normalized_distance, normalized_distance};
pub use normalize::normalize;
pub use traits::{Levenshtein, StringMetric};
