// Word-level distance indexing.
//
// For every topic, every word entry, and every unordered pair of the topic's
// active languages where both sides have a word, emit one record carrying
// the original spellings and the normalized distance between them.
// Missing translations are skipped silently.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::pairs::{serialize_round4, unordered_pairs, LanguagePair};
use crate::corpus::{Corpus, WordEntry};
use crate::lexical::{normalize, Levenshtein, StringMetric};

/// Normalized distance between one word's translations in two languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPairDistance {
    pub topic: String,
    pub language_pair: LanguagePair,
    /// Original (pre-normalization) spellings, in `language_pair` order
    pub word_pair: (String, String),
    /// Length-normalized edit distance in [0, 1]. Kept at full precision in
    /// memory so aggregates round once; written with 4 decimals.
    #[serde(serialize_with = "serialize_round4")]
    pub distance: f64,
}

/// Index every word pair in the corpus with the default Levenshtein metric.
pub fn index_word_distances(corpus: &Corpus) -> Vec<WordPairDistance> {
    index_with(corpus, &Levenshtein)
}

/// Index every word pair in the corpus with a custom metric.
pub fn index_with<M: StringMetric + ?Sized>(corpus: &Corpus, metric: &M) -> Vec<WordPairDistance> {
    let mut records = Vec::new();

    for topic in &corpus.topics {
        let languages = topic.active_languages();
        let before = records.len();
        for entry in &topic.words {
            records.extend(entry_distances(&topic.topic, &languages, entry, metric));
        }
        debug!(
            topic = %topic.topic,
            languages = languages.len(),
            records = records.len() - before,
            "Indexed topic"
        );
    }

    info!(
        topics = corpus.topics.len(),
        records = records.len(),
        "Word distance indexing complete"
    );
    records
}

/// Distance records for a single word entry across `languages`.
pub fn entry_distances<M: StringMetric + ?Sized>(
    topic: &str,
    languages: &[String],
    entry: &WordEntry,
    metric: &M,
) -> Vec<WordPairDistance> {
    unordered_pairs(languages)
        .into_iter()
        .filter_map(|pair| {
            let original_a = entry.get(&pair.first)?;
            let original_b = entry.get(&pair.second)?;

            let a = normalize(original_a);
            let b = normalize(original_b);
            if a.is_empty() || b.is_empty() {
                return None;
            }

            Some(WordPairDistance {
                topic: topic.to_string(),
                word_pair: (original_a.to_string(), original_b.to_string()),
                language_pair: pair,
                distance: metric.normalized(&a, &b),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TopicEntry;

    fn corpus() -> Corpus {
        Corpus::new(vec![TopicEntry::new(
            "Nature",
            vec![
                WordEntry::new()
                    .with("en", "leaves")
                    .with("pl", "Liście")
                    .with("fr", "feuilles"),
                WordEntry::new().with("en", "tree").with("pl", ""),
            ],
        )])
    }

    #[test]
    fn test_emits_one_record_per_available_pair() {
        let records = index_word_distances(&corpus());
        // entry 1: en-pl, en-fr, pl-fr; entry 2: nothing (pl empty, fr absent)
        assert_eq!(records.len(), 3);
        let pairs: Vec<String> = records.iter().map(|r| r.language_pair.to_string()).collect();
        assert_eq!(pairs, vec!["en-pl", "en-fr", "pl-fr"]);
    }

    #[test]
    fn test_keeps_original_spelling() {
        let records = index_word_distances(&corpus());
        assert_eq!(records[0].word_pair, ("leaves".to_string(), "Liście".to_string()));
        assert_eq!(records[0].topic, "nature");
    }

    #[test]
    fn test_distance_uses_normalized_forms() {
        let corpus = Corpus::new(vec![TopicEntry::new(
            "food",
            vec![WordEntry::new().with("fr", "Légume").with("es", "legume")],
        )]);
        let records = index_word_distances(&corpus);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance, 0.0);
    }

    #[test]
    fn test_skips_words_that_normalize_to_empty() {
        // A lone combining mark normalizes to nothing
        let corpus = Corpus::new(vec![TopicEntry::new(
            "marks",
            vec![WordEntry::new().with("en", "a").with("xx", "\u{0301}")],
        )]);
        assert!(index_word_distances(&corpus).is_empty());
    }

    #[test]
    fn test_serializes_flat_record() {
        let record = WordPairDistance {
            topic: "animals".to_string(),
            language_pair: LanguagePair::new("en", "de"),
            word_pair: ("mouse".to_string(), "Maus".to_string()),
            distance: 0.4,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"topic":"animals","language_pair":"en-de","word_pair":["mouse","Maus"],"distance":0.4}"#
        );
    }

    #[test]
    fn test_distance_kept_at_full_precision_until_written() {
        let long = "a".repeat(32);
        let near = format!("{}b", "a".repeat(31));
        let corpus = Corpus::new(vec![TopicEntry::new(
            "t",
            vec![WordEntry::new().with("en", long).with("de", near)],
        )]);
        let records = index_word_distances(&corpus);
        assert_eq!(records[0].distance, 1.0 / 32.0);

        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["distance"], 0.0312);
    }
}
