// Topic-level proximity — mean word distance per language pair, per topic.
//
// Each topic becomes its own small graph: one node per active language
// (namespaced "topic_lang") and one edge per language pair with at least one
// contributing word pair. Pairs without data are left out rather than given
// a zero weight.

use std::collections::BTreeMap;

use tracing::info;

use super::graph::{topic_node_id, GraphEdge, GraphNode, ProximityGraph};
use super::pairs::{unordered_pairs, PairAccumulator};
use super::word_distance::WordPairDistance;
use crate::corpus::Corpus;

/// Topic name -> that topic's proximity graph.
pub type TopicGraphs = BTreeMap<String, ProximityGraph>;

/// Aggregate word-level distances into one graph per topic.
///
/// Topics that appear more than once in the corpus are merged: their
/// language sets are unioned and their records pooled.
pub fn aggregate_topics(corpus: &Corpus, records: &[WordPairDistance]) -> TopicGraphs {
    // Active languages per topic, first-seen order, merged across duplicates
    let mut languages: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for topic in &corpus.topics {
        let langs = languages.entry(topic.topic.as_str()).or_default();
        for lang in topic.active_languages() {
            if !langs.contains(&lang) {
                langs.push(lang);
            }
        }
    }

    let mut accumulators: BTreeMap<&str, PairAccumulator> = BTreeMap::new();
    for record in records {
        accumulators
            .entry(record.topic.as_str())
            .or_default()
            .record(&record.language_pair, record.distance);
    }

    let empty = PairAccumulator::new();
    let graphs: TopicGraphs = languages
        .into_iter()
        .map(|(topic, langs)| {
            let acc = accumulators.get(topic).unwrap_or(&empty);
            (topic.to_string(), build_topic_graph(topic, &langs, acc))
        })
        .collect();

    info!(
        topics = graphs.len(),
        edges = graphs.values().map(|g| g.edges.len()).sum::<usize>(),
        "Topic proximity aggregation complete"
    );
    graphs
}

fn build_topic_graph(topic: &str, languages: &[String], acc: &PairAccumulator) -> ProximityGraph {
    let nodes = languages
        .iter()
        .map(|lang| GraphNode {
            id: topic_node_id(topic, lang),
        })
        .collect();

    let edges = unordered_pairs(languages)
        .into_iter()
        .filter_map(|pair| {
            let stats = acc.get(&pair.key())?;
            GraphEdge::from_stats(
                topic_node_id(topic, &pair.first),
                topic_node_id(topic, &pair.second),
                stats,
            )
        })
        .collect();

    ProximityGraph { nodes, edges }
}
