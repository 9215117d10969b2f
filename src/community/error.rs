use thiserror::Error;

/// Errors returned when topic profiles cannot be clustered meaningfully.
#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    /// Fewer than two topics to cluster.
    #[error("need at least 2 topics to detect communities, found {found}")]
    TooFewTopics {
        /// Number of topics supplied.
        found: usize,
    },

    /// A topic's profile has a different number of language pairs.
    #[error(
        "topic {topic:?} has {found} language pairs, expected {expected}; \
         topics must share the same language coverage"
    )]
    DimensionMismatch {
        /// Offending topic.
        topic: String,
        /// Pair count of the first topic.
        expected: usize,
        /// Pair count of this topic.
        found: usize,
    },

    /// A topic's profile covers different language pairs than the first topic.
    #[error("topic {topic:?} covers language pairs {found:?}, expected {expected:?}")]
    MisalignedProfile {
        /// Offending topic.
        topic: String,
        /// Pair keys of the first topic.
        expected: Vec<String>,
        /// Pair keys of this topic.
        found: Vec<String>,
    },
}
