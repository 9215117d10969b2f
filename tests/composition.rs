// Composition tests — the full pipeline from corpus file to artifacts.
//
// These tests exercise the data flow between modules:
//   corpus -> word distances -> topic / global proximity -> communities, outliers
// writing into a temporary directory, then reading the artifacts back the
// way the standalone subcommands do.

use std::fs;

use langprox::analysis::outliers::{detect_outliers, BaselineIndex, OutlierParams};
use langprox::analysis::pairs::round4;
use langprox::analysis::word_distance::index_word_distances;
use langprox::config::{ArtifactPaths, Config};
use langprox::corpus::{load_corpus, parse_corpus, Corpus};
use langprox::pipeline::analysis::{
    communities, load_topic_graphs, load_word_distances, outliers, run, run_corpus,
};

const CORPUS: &str = r#"[
    {"topic": "Animals", "words": [
        {"en": "cat", "es": "gato", "fr": "chat", "de": "Katze"},
        {"en": "dog", "es": "perro", "fr": "chien", "de": "Hund"},
        {"en": "mouse", "es": "ratón", "fr": "souris", "de": "Maus"}
    ]},
    {"topic": "Food", "words": [
        {"en": "tomato", "es": "tomate", "fr": "tomate", "de": "Tomate"},
        {"en": "chocolate", "es": "chocolate", "fr": "chocolat", "de": "Schokolade"},
        {"en": "bread", "es": "pan", "fr": "pain", "de": "Brot"}
    ]},
    {"topic": "Body", "words": [
        {"en": "hand", "es": "mano", "fr": "main", "de": "Hand"},
        {"en": "arm", "es": "brazo", "fr": "bras", "de": "Arm"},
        {"en": "nose", "es": "nariz", "fr": "nez", "de": "Nase"}
    ]},
    {"topic": "Science", "words": [
        {"en": "biology", "es": "biología", "fr": "biologie", "de": "Biologie"},
        {"en": "physics", "es": "física", "fr": "physique", "de": "Physik"},
        {"en": "chemistry", "es": "química", "fr": "chimie", "de": "Chemie"}
    ]}
]"#;

fn corpus() -> Corpus {
    parse_corpus(CORPUS).unwrap()
}

// ============================================================
// Chain: corpus -> all artifacts
// ============================================================

#[test]
fn full_run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let run = run_corpus(&corpus(), &paths, &OutlierParams::default(), false).unwrap();

    for (label, path) in paths.all() {
        assert!(path.exists(), "{label} was not written");
        let text = fs::read_to_string(path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }

    assert_eq!(run.summary.topics, 4);
    assert_eq!(run.summary.words, 12);
    assert_eq!(run.summary.languages, 4);
    // 12 entries x 6 pairs, every translation present
    assert_eq!(run.summary.word_pairs, 72);
    assert_eq!(run.summary.topic_edges, 24);
    assert!(run.summary.communities >= 2 && run.summary.communities <= 3);
}

#[test]
fn artifact_documents_have_expected_top_level_keys() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    run_corpus(&corpus(), &paths, &OutlierParams::default(), false).unwrap();

    let read = |p: &std::path::Path| -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap()
    };

    let global = read(&paths.global_proximity);
    assert_eq!(global["language"]["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(global["language"]["edges"].as_array().unwrap().len(), 6);

    let topics = read(&paths.topic_proximity);
    let names: Vec<&String> = topics.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["animals", "body", "food", "science"]);
    assert_eq!(topics["animals"]["nodes"][0]["id"], "animals_en");

    let words = read(&paths.word_distance);
    assert_eq!(words.as_array().unwrap().len(), 72);
    assert_eq!(words[0]["language_pair"], "en-es");

    assert!(read(&paths.communities)["topic_communities"].is_array());
    assert!(read(&paths.outliers)["outliers"].is_array());
    assert!(read(&paths.word_graph)["cat"]["edges"].is_array());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let corpus = corpus();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = ArtifactPaths::in_dir(first.path());
    let b = ArtifactPaths::in_dir(second.path());

    run_corpus(&corpus, &a, &OutlierParams::default(), false).unwrap();
    run_corpus(&corpus, &b, &OutlierParams::default(), false).unwrap();

    for ((label, pa), (_, pb)) in a.all().into_iter().zip(b.all()) {
        assert_eq!(
            fs::read(pa).unwrap(),
            fs::read(pb).unwrap(),
            "{label} differs between runs"
        );
    }
}

// ============================================================
// Chain: stored artifacts -> standalone stages
// ============================================================

#[test]
fn stages_rerun_from_stored_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    let run = run_corpus(&corpus(), &paths, &OutlierParams::default(), false).unwrap();

    let records = load_word_distances(&paths.word_distance).unwrap();
    let graphs = load_topic_graphs(&paths.topic_proximity).unwrap();
    assert_eq!(records.len(), run.summary.word_pairs);

    let again = communities(&graphs, &paths).unwrap();
    assert_eq!(again, run.communities);

    // Stored distances carry 4 decimals; detection on them matches detection
    // on the same values rounded in memory.
    let flagged = outliers(&records, &graphs, &OutlierParams::default(), &paths).unwrap();
    let rounded: Vec<_> = index_word_distances(&corpus())
        .into_iter()
        .map(|mut r| {
            r.distance = round4(r.distance);
            r
        })
        .collect();
    let expected = detect_outliers(
        &rounded,
        &BaselineIndex::from_topic_graphs(&graphs),
        &OutlierParams::default(),
    );
    assert_eq!(flagged, expected);
}

#[test]
fn lower_multiplier_flags_more_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    run_corpus(&corpus(), &paths, &OutlierParams::default(), false).unwrap();

    let records = load_word_distances(&paths.word_distance).unwrap();
    let graphs = load_topic_graphs(&paths.topic_proximity).unwrap();
    let loose = OutlierParams {
        multiplier: 1.0,
        ..OutlierParams::default()
    };
    let strict = outliers(&records, &graphs, &OutlierParams::default(), &paths).unwrap();
    let relaxed = outliers(&records, &graphs, &loose, &paths).unwrap();
    assert!(relaxed.len() >= strict.len());
    assert!(!relaxed.is_empty());
}

#[test]
fn failed_stage_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    let single = parse_corpus(
        r#"[{"topic": "only", "words": [{"en": "cat", "fr": "chat"}]}]"#,
    )
    .unwrap();

    // One topic cannot be clustered
    assert!(run_corpus(&single, &paths, &OutlierParams::default(), false).is_err());
    assert!(paths.topic_proximity.exists());
    assert!(!paths.communities.exists());
    assert!(!paths.outliers.exists());
}

// ============================================================
// Config -> run
// ============================================================

#[test]
fn run_from_config_reads_corpus_file() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("translated.json");
    fs::write(&corpus_path, CORPUS).unwrap();

    let data_dir = dir.path().to_string_lossy().to_string();
    let config = Config::from_lookup(move |key: &str| match key {
        "LANGPROX_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.corpus_path, corpus_path);

    assert_eq!(load_corpus(&config.corpus_path).unwrap(), corpus());
    let run = run(&config, false).unwrap();
    assert_eq!(run.summary.topics, 4);
    assert!(config.artifacts().global_proximity.exists());
}

#[test]
fn missing_corpus_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_string_lossy().to_string();
    let config = Config::from_lookup(move |key: &str| match key {
        "LANGPROX_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
    .unwrap();
    assert!(run(&config, false).is_err());
    assert!(!config.artifacts().word_distance.exists());
}
