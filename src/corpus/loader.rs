// Corpus loading — reads the translated corpus from JSON.
//
// Two document shapes are accepted:
//   - the flat list: [ { "topic": ..., "words": [ { "en": ..., "fr": ... } ] } ]
//   - the translator envelope: { "source_language": "en", "topics": [
//       { "topic": ..., "words": [ { "original": ..., "translations": {..} } ] } ] }
// The envelope is flattened so the original word becomes the source-language
// entry, placed ahead of the translations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::models::{Corpus, TopicEntry, WordEntry};

#[derive(Deserialize)]
struct TranslatorEnvelope {
    source_language: String,
    topics: Vec<EnvelopeTopic>,
}

#[derive(Deserialize)]
struct EnvelopeTopic {
    topic: String,
    #[serde(default)]
    words: Vec<EnvelopeWord>,
}

#[derive(Deserialize)]
struct EnvelopeWord {
    original: String,
    #[serde(default)]
    translations: WordEntry,
}

/// Read and parse a corpus file. Missing or malformed input is fatal.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let corpus =
        parse_corpus(&text).with_context(|| format!("Invalid corpus {}", path.display()))?;

    info!(
        path = %path.display(),
        topics = corpus.topics.len(),
        words = corpus.word_count(),
        "Loaded corpus"
    );
    Ok(corpus)
}

/// Parse a corpus from JSON text in either accepted shape.
pub fn parse_corpus(text: &str) -> Result<Corpus> {
    let value: Value = serde_json::from_str(text).context("Corpus is not valid JSON")?;

    let is_envelope = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("topics"));

    let topics = if value.is_array() {
        let raw: Vec<TopicEntry> =
            serde_json::from_value(value).context("Malformed topic list")?;
        raw.into_iter()
            .map(|t| TopicEntry::new(&t.topic, t.words))
            .collect()
    } else if is_envelope {
        let envelope: TranslatorEnvelope =
            serde_json::from_value(value).context("Malformed translator envelope")?;
        flatten_envelope(envelope)
    } else {
        anyhow::bail!("Expected a list of topics or an object with a \"topics\" field");
    };

    Ok(Corpus::new(topics))
}

fn flatten_envelope(envelope: TranslatorEnvelope) -> Vec<TopicEntry> {
    let source = envelope.source_language;
    envelope
        .topics
        .into_iter()
        .map(|topic| {
            let words = topic
                .words
                .into_iter()
                .map(|word| {
                    let mut entry = WordEntry::new().with(source.as_str(), word.original);
                    for (lang, translated) in word.translations.iter() {
                        if lang != source {
                            entry.insert(lang, translated);
                        }
                    }
                    entry
                })
                .collect();
            TopicEntry::new(&topic.topic, words)
        })
        .collect()
}
