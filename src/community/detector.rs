// Community detection — groups topics whose language-pair proximity
// profiles look alike.
//
// Each topic's profile is the vector of its edge weights ordered by
// canonical pair key. Profiles are compared by cosine distance, clustered
// with average linkage, and the dendrogram is cut with a two-branch policy:
//
//   1. cut at the 70th percentile of merge distances;
//   2. if that yields fewer than 2 clusters, re-cut into exactly 2;
//      if it yields more than min(n - 1, 6), re-cut into exactly that many.
//
// With two topics there is nothing to cluster, so each gets its own
// community.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use super::error::ClusterError;
use super::linkage::{count_clusters, pairwise_cosine, percentile, Dendrogram};
use crate::analysis::graph::edge_languages;
use crate::analysis::pairs::round4;
use crate::analysis::topic_proximity::TopicGraphs;

/// A topic's edge weights, sorted by canonical language-pair key.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicProfile {
    pub topic: String,
    pub pairs: Vec<(String, f64)>,
}

impl TopicProfile {
    pub fn weights(&self) -> Vec<f64> {
        self.pairs.iter().map(|(_, w)| *w).collect()
    }

    fn keys(&self) -> Vec<String> {
        self.pairs.iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Extract one profile per topic graph, in topic-name order.
pub fn topic_profiles(graphs: &TopicGraphs) -> Vec<TopicProfile> {
    graphs
        .iter()
        .map(|(topic, graph)| {
            let mut pairs: Vec<(String, f64)> = graph
                .edges
                .iter()
                .map(|edge| (edge_languages(topic, edge).key().to_string(), edge.weight))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            TopicProfile {
                topic: topic.clone(),
                pairs,
            }
        })
        .collect()
}

/// A group of topics with its language pairs ranked by mean weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    /// Cluster label, starting at 1
    pub id: usize,
    pub topics: Vec<String>,
    /// (canonical pair, mean weight across member topics), highest first
    pub ranked_pairs: Vec<(String, f64)>,
}

/// Serialized as `{"community_id": id, "<pair>": [topics...], ...}` with the
/// pairs in rank order. Every pair maps to the full member list.
impl Serialize for Community {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.ranked_pairs.len()))?;
        map.serialize_entry("community_id", &self.id)?;
        for (pair, _) in &self.ranked_pairs {
            map.serialize_entry(pair, &self.topics)?;
        }
        map.end()
    }
}

/// The communities document, keyed as `{"topic_communities": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunityReport {
    pub topic_communities: Vec<Community>,
}

/// Clustering policy knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityDetector {
    /// Percentile of merge distances used as the cut threshold (default 70)
    pub cut_percentile: f64,
    /// Upper bound on the number of communities (default 6)
    pub max_communities: usize,
}

impl Default for CommunityDetector {
    fn default() -> Self {
        Self {
            cut_percentile: 70.0,
            max_communities: 6,
        }
    }
}

impl CommunityDetector {
    /// Cluster the topic graphs into communities.
    pub fn detect(&self, graphs: &TopicGraphs) -> Result<Vec<Community>, ClusterError> {
        let profiles = topic_profiles(graphs);
        let labels = self.cluster_labels(&profiles)?;
        let communities = build_communities(&profiles, &labels);

        info!(
            topics = profiles.len(),
            communities = communities.len(),
            "Community detection complete"
        );
        Ok(communities)
    }

    /// One cluster label (1-based) per profile.
    pub fn cluster_labels(&self, profiles: &[TopicProfile]) -> Result<Vec<usize>, ClusterError> {
        validate_profiles(profiles)?;
        let n = profiles.len();

        if n <= 2 {
            // Cosine distances and percentiles are meaningless on two points
            return Ok((1..=n).collect());
        }

        let vectors: Vec<Vec<f64>> = profiles.iter().map(TopicProfile::weights).collect();
        let tree = Dendrogram::average_linkage(&pairwise_cosine(&vectors));

        let threshold = percentile(&tree.merge_distances(), self.cut_percentile);
        let labels = tree.cut_at_distance(threshold);
        let count = count_clusters(&labels);
        let upper = (n - 1).min(self.max_communities).max(2);

        debug!(threshold, count, upper, "Percentile cut");

        Ok(if count < 2 {
            tree.cut_into(2)
        } else if count > upper {
            tree.cut_into(upper)
        } else {
            labels
        })
    }
}

/// Convenience wrapper with the default policy.
pub fn detect_communities(graphs: &TopicGraphs) -> Result<Vec<Community>, ClusterError> {
    CommunityDetector::default().detect(graphs)
}

fn validate_profiles(profiles: &[TopicProfile]) -> Result<(), ClusterError> {
    let Some(first) = profiles.first() else {
        return Err(ClusterError::TooFewTopics { found: 0 });
    };
    if profiles.len() < 2 {
        return Err(ClusterError::TooFewTopics {
            found: profiles.len(),
        });
    }

    let expected = first.keys();
    for profile in &profiles[1..] {
        if profile.pairs.len() != expected.len() {
            return Err(ClusterError::DimensionMismatch {
                topic: profile.topic.clone(),
                expected: expected.len(),
                found: profile.pairs.len(),
            });
        }
        let found = profile.keys();
        if found != expected {
            return Err(ClusterError::MisalignedProfile {
                topic: profile.topic.clone(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn build_communities(profiles: &[TopicProfile], labels: &[usize]) -> Vec<Community> {
    let mut members: BTreeMap<usize, Vec<&TopicProfile>> = BTreeMap::new();
    for (profile, &label) in profiles.iter().zip(labels) {
        members.entry(label).or_default().push(profile);
    }

    members
        .into_iter()
        .map(|(id, group)| {
            let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
            for profile in &group {
                for (pair, weight) in &profile.pairs {
                    let slot = sums.entry(pair.as_str()).or_default();
                    slot.0 += weight;
                    slot.1 += 1;
                }
            }

            let mut ranked_pairs: Vec<(String, f64)> = sums
                .into_iter()
                .map(|(pair, (sum, count))| (pair.to_string(), round4(sum / count as f64)))
                .collect();
            // BTreeMap order already breaks ties by pair key; sort is stable
            ranked_pairs.sort_by(|a, b| b.1.total_cmp(&a.1));

            Community {
                id,
                topics: group.iter().map(|p| p.topic.clone()).collect(),
                ranked_pairs,
            }
        })
        .collect()
}
