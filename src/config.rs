use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analysis::outliers::OutlierParams;

/// Locations of every artifact the analysis writes.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub global_proximity: PathBuf,
    pub topic_proximity: PathBuf,
    pub word_distance: PathBuf,
    pub word_graph: PathBuf,
    pub communities: PathBuf,
    pub outliers: PathBuf,
}

impl ArtifactPaths {
    /// Fixed artifact file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            global_proximity: dir.join("global_proximity.json"),
            topic_proximity: dir.join("topic_proximity.json"),
            word_distance: dir.join("word_distance.json"),
            word_graph: dir.join("word_graph.json"),
            communities: dir.join("communities.json"),
            outliers: dir.join("outliers.json"),
        }
    }

    /// (label, path) for every artifact, in pipeline order.
    pub fn all(&self) -> [(&'static str, &Path); 6] {
        [
            ("Word distances", self.word_distance.as_path()),
            ("Word graphs", self.word_graph.as_path()),
            ("Topic proximity", self.topic_proximity.as_path()),
            ("Global proximity", self.global_proximity.as_path()),
            ("Communities", self.communities.as_path()),
            ("Outliers", self.outliers.as_path()),
        ]
    }
}

/// Central configuration loaded from environment variables.
///
/// Everything has a default, so a bare `langprox analyze` works against
/// `./data/translated.json`. The .env file is loaded automatically at
/// startup via dotenvy.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Translated corpus (LANGPROX_CORPUS, default <data>/translated.json)
    pub corpus_path: PathBuf,
    /// Where artifacts are written (LANGPROX_ANALYSIS_DIR, default <data>/analysis)
    pub analysis_dir: PathBuf,
    pub outlier: OutlierParams,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = lookup("LANGPROX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));
        let corpus_path = lookup("LANGPROX_CORPUS")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("translated.json"));
        let analysis_dir = lookup("LANGPROX_ANALYSIS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("analysis"));

        let defaults = OutlierParams::default();
        let outlier = OutlierParams {
            multiplier: parse_f64(&lookup, "LANGPROX_OUTLIER_MULTIPLIER", defaults.multiplier)?,
            min_topic_distance: parse_f64(
                &lookup,
                "LANGPROX_MIN_TOPIC_DISTANCE",
                defaults.min_topic_distance,
            )?,
        };

        Ok(Self {
            data_dir,
            corpus_path,
            analysis_dir,
            outlier,
        })
    }

    pub fn artifacts(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.analysis_dir)
    }

    /// Check that the corpus file exists.
    /// Call this before any stage that reads the corpus.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.corpus_path.exists() {
            anyhow::bail!(
                "Corpus not found at {}\n\
                 Set LANGPROX_CORPUS (or LANGPROX_DATA_DIR) to point at translated.json.",
                self.corpus_path.display()
            );
        }
        Ok(())
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> Result<f64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}
