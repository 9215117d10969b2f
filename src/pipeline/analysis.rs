// Analysis pipeline — runs each stage and writes its artifact.
//
// Flow:
//   corpus -> word distances -> { topic proximity, global proximity }
//   topic proximity -> communities
//   { word distances, topic proximity } -> outliers
//
// Every stage is a pure transformation followed by one atomic artifact
// write. A stage that fails writes nothing, and later stages do not run.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::global_proximity::{aggregate_global, GlobalProximity};
use crate::analysis::outliers::{detect_outliers, BaselineIndex, Outlier, OutlierParams, OutlierReport};
use crate::analysis::topic_proximity::{aggregate_topics, TopicGraphs};
use crate::analysis::word_distance::{index_word_distances, WordPairDistance};
use crate::analysis::word_graph::{build_word_graphs, WordGraphs};
use crate::community::{Community, CommunityDetector, CommunityReport};
use crate::config::{ArtifactPaths, Config};
use crate::corpus::{load_corpus, Corpus};
use crate::output::terminal::stage_spinner;
use crate::output::{read_json, write_json_atomic};

/// Counts reported after a full run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    pub topics: usize,
    pub words: usize,
    pub languages: usize,
    pub word_pairs: usize,
    pub topic_edges: usize,
    pub communities: usize,
    pub outliers: usize,
}

/// Everything a full run produced, for display.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub summary: AnalysisSummary,
    pub global: GlobalProximity,
    pub communities: Vec<Community>,
    pub outliers: Vec<Outlier>,
}

/// Index word distances and write `word_distance.json`.
pub fn word_distances(corpus: &Corpus, paths: &ArtifactPaths) -> Result<Vec<WordPairDistance>> {
    let records = index_word_distances(corpus);
    write_json_atomic(&paths.word_distance, &records)?;
    Ok(records)
}

/// Build per-word graphs and write `word_graph.json`.
pub fn word_graphs(corpus: &Corpus, paths: &ArtifactPaths) -> Result<WordGraphs> {
    let graphs = build_word_graphs(corpus);
    write_json_atomic(&paths.word_graph, &graphs)?;
    Ok(graphs)
}

/// Aggregate topic graphs and write `topic_proximity.json`.
pub fn topic_proximity(
    corpus: &Corpus,
    records: &[WordPairDistance],
    paths: &ArtifactPaths,
) -> Result<TopicGraphs> {
    let graphs = aggregate_topics(corpus, records);
    write_json_atomic(&paths.topic_proximity, &graphs)?;
    Ok(graphs)
}

/// Aggregate the corpus-wide graph and write `global_proximity.json`.
pub fn global_proximity(
    corpus: &Corpus,
    records: &[WordPairDistance],
    paths: &ArtifactPaths,
) -> Result<GlobalProximity> {
    let global = aggregate_global(corpus, records);
    write_json_atomic(&paths.global_proximity, &global)?;
    Ok(global)
}

/// Cluster topics and write `communities.json`.
pub fn communities(graphs: &TopicGraphs, paths: &ArtifactPaths) -> Result<Vec<Community>> {
    let communities = CommunityDetector::default()
        .detect(graphs)
        .context("Community detection failed")?;
    let report = CommunityReport {
        topic_communities: communities,
    };
    write_json_atomic(&paths.communities, &report)?;
    Ok(report.topic_communities)
}

/// Flag outliers and write `outliers.json`.
pub fn outliers(
    records: &[WordPairDistance],
    graphs: &TopicGraphs,
    params: &OutlierParams,
    paths: &ArtifactPaths,
) -> Result<Vec<Outlier>> {
    let baselines = BaselineIndex::from_topic_graphs(graphs);
    let report = OutlierReport {
        outliers: detect_outliers(records, &baselines, params),
    };
    write_json_atomic(&paths.outliers, &report)?;
    Ok(report.outliers)
}

/// Read `word_distance.json` written by an earlier run.
pub fn load_word_distances(path: &Path) -> Result<Vec<WordPairDistance>> {
    read_json(path)
}

/// Read `topic_proximity.json` written by an earlier run.
pub fn load_topic_graphs(path: &Path) -> Result<TopicGraphs> {
    read_json(path)
}

/// Run every stage from the configured corpus.
///
/// With `show_progress`, each stage gets a terminal spinner.
pub fn run(config: &Config, show_progress: bool) -> Result<AnalysisRun> {
    config.require_corpus()?;
    let corpus = load_corpus(&config.corpus_path)?;
    run_corpus(&corpus, &config.artifacts(), &config.outlier, show_progress)
}

/// Run every stage over an in-memory corpus.
pub fn run_corpus(
    corpus: &Corpus,
    paths: &ArtifactPaths,
    params: &OutlierParams,
    show_progress: bool,
) -> Result<AnalysisRun> {
    let records = stage(show_progress, "Computing word distances...", || {
        word_distances(corpus, paths)
    })?;
    stage(show_progress, "Building word graphs...", || {
        word_graphs(corpus, paths)
    })?;
    let graphs = stage(show_progress, "Computing topic proximity...", || {
        topic_proximity(corpus, &records, paths)
    })?;
    let global = stage(show_progress, "Computing global proximity...", || {
        global_proximity(corpus, &records, paths)
    })?;
    let communities = stage(show_progress, "Detecting communities...", || {
        communities(&graphs, paths)
    })?;
    let outliers = stage(show_progress, "Detecting outliers...", || {
        outliers(&records, &graphs, params, paths)
    })?;

    let summary = AnalysisSummary {
        topics: corpus.topics.len(),
        words: corpus.word_count(),
        languages: corpus.languages().len(),
        word_pairs: records.len(),
        topic_edges: graphs.values().map(|g| g.edges.len()).sum(),
        communities: communities.len(),
        outliers: outliers.len(),
    };
    info!(?summary, "Analysis complete");

    Ok(AnalysisRun {
        summary,
        global,
        communities,
        outliers,
    })
}

fn stage<T>(show_progress: bool, message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if !show_progress {
        return f();
    }
    let pb = stage_spinner(message);
    let result = f();
    pb.finish_and_clear();
    result
}
