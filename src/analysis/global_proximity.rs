// Corpus-wide language proximity.
//
// Pools every word-level distance across all topics per language pair and
// emits a single graph: one node per language, one edge per pair with data.
// The language set is the union over the whole corpus, the same policy the
// topic aggregator applies per topic.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::graph::{GraphEdge, GraphNode, ProximityGraph};
use super::pairs::{unordered_pairs, PairAccumulator};
use super::word_distance::WordPairDistance;
use crate::corpus::Corpus;

/// The global proximity document, keyed as `{"language": graph}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalProximity {
    pub language: ProximityGraph,
}

pub fn aggregate_global(corpus: &Corpus, records: &[WordPairDistance]) -> GlobalProximity {
    let languages = corpus.languages();

    let mut acc = PairAccumulator::new();
    for record in records {
        acc.record(&record.language_pair, record.distance);
    }

    let nodes = languages
        .iter()
        .map(|lang| GraphNode { id: lang.clone() })
        .collect();

    let edges: Vec<GraphEdge> = unordered_pairs(&languages)
        .into_iter()
        .filter_map(|pair| {
            let stats = acc.get(&pair.key())?;
            GraphEdge::from_stats(pair.first, pair.second, stats)
        })
        .collect();

    info!(
        languages = languages.len(),
        edges = edges.len(),
        samples = records.len(),
        "Global proximity aggregation complete"
    );

    GlobalProximity {
        language: ProximityGraph { nodes, edges },
    }
}
