// Corpus data model — topics, their word entries, and per-language words.
//
// A word entry maps language codes to the word in that language. Entries in
// the same topic may advertise different subsets of languages, so the set of
// languages a topic covers is the union over all of its entries, kept in the
// order the codes were first seen.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key reserved by upstream tooling inside word entries; never a language.
pub const RESERVED_TOPIC_KEY: &str = "topic";

/// One concept translated into several languages.
///
/// Keys keep their document order because that order decides which side of
/// a language pair is emitted first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordEntry {
    translations: Vec<(String, String)>,
}

impl WordEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing corpora in code.
    pub fn with(mut self, lang: impl Into<String>, word: impl Into<String>) -> Self {
        self.insert(lang, word);
        self
    }

    /// Set the word for a language, replacing any previous value in place.
    /// The reserved `topic` key is ignored.
    pub fn insert(&mut self, lang: impl Into<String>, word: impl Into<String>) {
        let lang = lang.into();
        if lang == RESERVED_TOPIC_KEY {
            return;
        }
        let word = word.into();
        match self.translations.iter_mut().find(|(l, _)| *l == lang) {
            Some(slot) => slot.1 = word,
            None => self.translations.push((lang, word)),
        }
    }

    /// The word for `lang`, or `None` when absent or empty.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, w)| w.as_str())
            .filter(|w| !w.is_empty())
    }

    /// Language codes advertised by this entry, including ones with empty values.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.translations
            .iter()
            .map(|(l, w)| (l.as_str(), w.as_str()))
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl Serialize for WordEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.translations.len()))?;
        for (lang, word) in &self.translations {
            map.serialize_entry(lang, word)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WordEntryVisitor)
    }
}

struct WordEntryVisitor;

impl<'de> Visitor<'de> for WordEntryVisitor {
    type Value = WordEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of language code to word")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entry = WordEntry::new();
        while let Some((lang, value)) = access.next_entry::<String, serde_json::Value>()? {
            // Non-string values (null, numbers) carry no translation but the
            // language still counts as advertised.
            let word = value.as_str().unwrap_or_default().to_string();
            entry.insert(lang, word);
        }
        Ok(entry)
    }
}

/// All word entries collected for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub topic: String,
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

impl TopicEntry {
    /// Build an entry with its topic name canonicalized (trimmed, lowercase).
    pub fn new(topic: &str, words: Vec<WordEntry>) -> Self {
        Self {
            topic: canonical_topic(topic),
            words,
        }
    }

    /// Union of languages across every word entry, in first-seen order.
    pub fn active_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for entry in &self.words {
            for lang in entry.languages() {
                if !languages.iter().any(|l| l == lang) {
                    languages.push(lang.to_string());
                }
            }
        }
        languages
    }
}

/// Canonical form of a topic name used as a key across every artifact.
pub fn canonical_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// The full multi-language corpus, one entry per topic in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    pub topics: Vec<TopicEntry>,
}

impl Corpus {
    pub fn new(topics: Vec<TopicEntry>) -> Self {
        Self { topics }
    }

    /// Union of languages across the whole corpus, in first-seen order.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for topic in &self.topics {
            for lang in topic.active_languages() {
                if !languages.contains(&lang) {
                    languages.push(lang);
                }
            }
        }
        languages
    }

    pub fn word_count(&self) -> usize {
        self.topics.iter().map(|t| t.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_preserves_key_order() {
        let entry: WordEntry = serde_json::from_str(r#"{"fr":"chat","en":"cat","de":"Katze"}"#)
            .unwrap();
        let langs: Vec<&str> = entry.languages().collect();
        assert_eq!(langs, vec!["fr", "en", "de"]);
    }

    #[test]
    fn test_word_entry_skips_reserved_and_blanks_non_strings() {
        let entry: WordEntry =
            serde_json::from_str(r#"{"topic":"animals","en":"cat","de":null,"fr":3}"#).unwrap();
        let langs: Vec<&str> = entry.languages().collect();
        assert_eq!(langs, vec!["en", "de", "fr"]);
        assert_eq!(entry.get("en"), Some("cat"));
        assert_eq!(entry.get("de"), None);
        assert_eq!(entry.get("fr"), None);
    }

    #[test]
    fn test_active_languages_is_union_not_first_entry() {
        let topic = TopicEntry::new(
            "Animals",
            vec![
                WordEntry::new().with("en", "cat").with("fr", "chat"),
                WordEntry::new().with("en", "dog").with("de", "Hund"),
            ],
        );
        assert_eq!(topic.active_languages(), vec!["en", "fr", "de"]);
        assert_eq!(topic.topic, "animals");
    }

    #[test]
    fn test_corpus_languages_union() {
        let corpus = Corpus::new(vec![
            TopicEntry::new("a", vec![WordEntry::new().with("en", "x")]),
            TopicEntry::new("b", vec![WordEntry::new().with("pl", "y").with("en", "z")]),
        ]);
        assert_eq!(corpus.languages(), vec!["en", "pl"]);
        assert_eq!(corpus.word_count(), 2);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut entry = WordEntry::new();
        assert!(entry.is_empty());
        entry.insert("en", "colour");
        entry.insert("fr", "couleur");
        entry.insert("en", "color");
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.iter().next(), Some(("en", "color")));
    }

    #[test]
    fn test_word_entry_roundtrips_as_map() {
        let entry = WordEntry::new().with("en", "leaves").with("pl", "Liście");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"en":"leaves","pl":"Liście"}"#);
    }
}
