// Corpus — the multi-language word lists every analysis stage reads.

pub mod loader;
pub mod models;

pub use loader::{load_corpus, parse_corpus};
pub use models::{Corpus, TopicEntry, WordEntry};
