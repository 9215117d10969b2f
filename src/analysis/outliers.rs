// Outlier detection — word pairs far more distant than their topic's norm.
//
// The baseline for a (topic, language pair) is the topic graph's mean
// distance, 1 - edge weight. A word pair is flagged when
//
//   distance > multiplier * baseline   and   baseline >= min_topic_distance
//
// The floor keeps near-identical language pairs (baseline close to zero)
// from turning every small spelling difference into a huge ratio.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::graph::edge_languages;
use super::pairs::{round4, serialize_round4, LanguagePair};
use super::topic_proximity::TopicGraphs;
use super::word_distance::WordPairDistance;

/// Tunable thresholds for the outlier rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierParams {
    /// How many times the topic baseline a distance must exceed (default 2.5)
    pub multiplier: f64,
    /// Baselines below this are too small to divide by (default 0.01)
    pub min_topic_distance: f64,
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self {
            multiplier: 2.5,
            min_topic_distance: 0.01,
        }
    }
}

/// A flagged word pair. Only topic, pair, words, and distance are persisted;
/// the baseline and ratio are kept in memory for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub topic: String,
    pub language_pair: LanguagePair,
    pub word_pair: (String, String),
    #[serde(serialize_with = "serialize_round4")]
    pub distance: f64,
    #[serde(skip)]
    pub topic_distance: f64,
    #[serde(skip)]
    pub ratio: f64,
}

/// The outliers document, keyed as `{"outliers": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub outliers: Vec<Outlier>,
}

/// Baseline mean distance per (topic, "a-b"), stored under both orderings.
#[derive(Debug, Clone, Default)]
pub struct BaselineIndex {
    baselines: HashMap<(String, String), f64>,
}

impl BaselineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from topic proximity graphs.
    pub fn from_topic_graphs(graphs: &TopicGraphs) -> Self {
        let mut index = Self::new();
        for (topic, graph) in graphs {
            for edge in &graph.edges {
                let pair = edge_languages(topic, edge);
                index.insert(topic, &pair, round4(1.0 - edge.weight));
            }
        }
        index
    }

    pub fn insert(&mut self, topic: &str, pair: &LanguagePair, topic_distance: f64) {
        self.baselines
            .insert((topic.to_string(), pair.to_string()), topic_distance);
        self.baselines
            .insert((topic.to_string(), pair.reversed().to_string()), topic_distance);
    }

    /// Baseline for a topic and pair, trying the reverse order on a miss.
    pub fn lookup(&self, topic: &str, pair: &LanguagePair) -> Option<f64> {
        self.baselines
            .get(&(topic.to_string(), pair.to_string()))
            .or_else(|| {
                self.baselines
                    .get(&(topic.to_string(), pair.reversed().to_string()))
            })
            .copied()
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

/// The outlier rule on its own.
pub fn is_outlier(distance: f64, topic_distance: f64, params: &OutlierParams) -> bool {
    topic_distance >= params.min_topic_distance && distance > params.multiplier * topic_distance
}

/// Flag anomalous word pairs, most anomalous (highest ratio) first.
///
/// Records whose topic/pair has no baseline are logged and skipped.
pub fn detect_outliers(
    records: &[WordPairDistance],
    baselines: &BaselineIndex,
    params: &OutlierParams,
) -> Vec<Outlier> {
    let mut outliers = Vec::new();
    let mut missing = 0usize;

    for record in records {
        let Some(topic_distance) = baselines.lookup(&record.topic, &record.language_pair) else {
            warn!(
                topic = %record.topic,
                pair = %record.language_pair,
                "No topic baseline for word pair, skipping"
            );
            missing += 1;
            continue;
        };

        if !is_outlier(record.distance, topic_distance, params) {
            continue;
        }

        outliers.push(Outlier {
            topic: record.topic.clone(),
            language_pair: record.language_pair.clone(),
            word_pair: record.word_pair.clone(),
            distance: record.distance,
            topic_distance,
            ratio: record.distance / topic_distance,
        });
    }

    // Stable: equal ratios keep record order
    outliers.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

    info!(
        records = records.len(),
        outliers = outliers.len(),
        missing_baselines = missing,
        multiplier = params.multiplier,
        "Outlier detection complete"
    );
    outliers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str, a: &str, b: &str, distance: f64) -> WordPairDistance {
        WordPairDistance {
            topic: topic.to_string(),
            language_pair: LanguagePair::new(a, b),
            word_pair: ("x".to_string(), "y".to_string()),
            distance,
        }
    }

    #[test]
    fn test_rule_fires_above_multiplier() {
        let params = OutlierParams::default();
        assert!(is_outlier(0.8, 0.1, &params));
        assert!(!is_outlier(0.25, 0.1, &params));
    }

    #[test]
    fn test_rule_respects_floor() {
        let params = OutlierParams::default();
        assert!(!is_outlier(0.8, 0.005, &params));
        assert!(is_outlier(0.8, 0.01, &params));
    }

    #[test]
    fn test_ratio_and_ordering() {
        let mut baselines = BaselineIndex::new();
        baselines.insert("animals", &LanguagePair::new("en", "de"), 0.1);
        baselines.insert("animals", &LanguagePair::new("en", "fr"), 0.2);

        let records = vec![
            record("animals", "en", "fr", 0.9),
            record("animals", "en", "de", 0.8),
            record("animals", "en", "de", 0.2),
        ];
        let outliers = detect_outliers(&records, &baselines, &OutlierParams::default());
        assert_eq!(outliers.len(), 2);
        assert_eq!(outliers[0].language_pair.to_string(), "en-de");
        assert!((outliers[0].ratio - 8.0).abs() < 1e-9);
        assert!((outliers[1].ratio - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_works_in_either_order() {
        let mut baselines = BaselineIndex::new();
        baselines.insert("t", &LanguagePair::new("fr", "en"), 0.3);
        assert_eq!(baselines.lookup("t", &LanguagePair::new("en", "fr")), Some(0.3));
        assert_eq!(baselines.lookup("t", &LanguagePair::new("fr", "en")), Some(0.3));
        assert_eq!(baselines.lookup("other", &LanguagePair::new("fr", "en")), None);
    }

    #[test]
    fn test_missing_baseline_is_skipped() {
        let outliers = detect_outliers(
            &[record("unknown", "en", "fr", 1.0)],
            &BaselineIndex::new(),
            &OutlierParams::default(),
        );
        assert!(outliers.is_empty());
    }

    #[test]
    fn test_serialized_outlier_drops_ratio() {
        let outlier = Outlier {
            topic: "t".to_string(),
            language_pair: LanguagePair::new("en", "de"),
            word_pair: ("mouse".to_string(), "Maus".to_string()),
            distance: 0.4,
            topic_distance: 0.1,
            ratio: 4.0,
        };
        let json = serde_json::to_value(&outlier).unwrap();
        assert!(json.get("ratio").is_none());
        assert!(json.get("topic_distance").is_none());
        assert_eq!(json["language_pair"], "en-de");
    }
}
