// Proximity graph types shared by the topic, global, and word-level exports.
//
// Edge weight is a similarity: 1 - mean normalized distance, so 1.0 means
// the languages spell these words identically and 0.0 means nothing in
// common.

use serde::{Deserialize, Serialize};

use super::pairs::{round4, LanguagePair, RunningStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    /// Spread of the contributing distances (population standard deviation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    /// Number of word pairs behind this edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
}

impl GraphEdge {
    /// Edge between two nodes from aggregated distance statistics.
    /// Returns `None` when no sample contributed.
    pub fn from_stats(
        source: impl Into<String>,
        target: impl Into<String>,
        stats: &RunningStats,
    ) -> Option<Self> {
        let mean = stats.mean()?;
        Some(Self {
            source: source.into(),
            target: target.into(),
            weight: round4(1.0 - mean),
            std_dev: stats.std_dev().map(round4),
            samples: Some(stats.count()),
        })
    }

    /// Edge for a single word-level distance.
    pub fn from_distance(
        source: impl Into<String>,
        target: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: round4(1.0 - distance),
            std_dev: None,
            samples: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Node id of a language inside a topic graph ("animals_en").
///
/// Namespacing keeps ids unique when every topic graph is merged into one
/// document.
pub fn topic_node_id(topic: &str, lang: &str) -> String {
    format!("{topic}_{lang}")
}

/// Recover the language code from a topic-namespaced node id.
/// Ids without the topic prefix are returned whole.
pub fn language_of<'a>(topic: &str, node_id: &'a str) -> &'a str {
    node_id
        .strip_prefix(topic)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|lang| !lang.is_empty())
        .unwrap_or(node_id)
}

/// The language pair an edge of a topic graph connects, in edge order.
pub fn edge_languages(topic: &str, edge: &GraphEdge) -> LanguagePair {
    LanguagePair::new(
        language_of(topic, &edge.source),
        language_of(topic, &edge.target),
    )
}
