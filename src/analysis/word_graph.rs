// Per-word graphs for the visualization front end.
//
// One small graph per anchor word: nodes are the word's translations
// ("word_lang"), edges carry 1 - distance for every language pair that has
// both translations. The anchor is the entry's word in the topic's first
// active language (or the first language that has a word).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::graph::{GraphEdge, GraphNode};
use super::word_distance::entry_distances;
use crate::corpus::{Corpus, WordEntry};
use crate::lexical::{Levenshtein, StringMetric};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGraph {
    pub topic: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Anchor word -> its translation graph.
pub type WordGraphs = BTreeMap<String, WordGraph>;

pub fn build_word_graphs(corpus: &Corpus) -> WordGraphs {
    build_word_graphs_with(corpus, &Levenshtein)
}

pub fn build_word_graphs_with<M: StringMetric + ?Sized>(corpus: &Corpus, metric: &M) -> WordGraphs {
    let mut graphs = WordGraphs::new();

    for topic in &corpus.topics {
        let languages = topic.active_languages();
        for entry in &topic.words {
            let Some(anchor) = anchor_word(&languages, entry) else {
                continue;
            };
            if graphs.contains_key(anchor) {
                debug!(topic = %topic.topic, anchor, "Duplicate anchor word, keeping first");
                continue;
            }

            let nodes = languages
                .iter()
                .filter_map(|lang| {
                    entry.get(lang).map(|word| GraphNode {
                        id: word_node_id(word, lang),
                    })
                })
                .collect();

            let edges = entry_distances(&topic.topic, &languages, entry, metric)
                .into_iter()
                .map(|record| {
                    GraphEdge::from_distance(
                        word_node_id(&record.word_pair.0, &record.language_pair.first),
                        word_node_id(&record.word_pair.1, &record.language_pair.second),
                        record.distance,
                    )
                })
                .collect();

            graphs.insert(
                anchor.to_string(),
                WordGraph {
                    topic: topic.topic.clone(),
                    nodes,
                    edges,
                },
            );
        }
    }

    info!(anchors = graphs.len(), "Word graph export complete");
    graphs
}

fn anchor_word<'a>(languages: &[String], entry: &'a WordEntry) -> Option<&'a str> {
    languages.iter().find_map(|lang| entry.get(lang))
}

fn word_node_id(word: &str, lang: &str) -> String {
    format!("{word}_{lang}")
}
