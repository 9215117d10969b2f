use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use langprox::config::Config;
use langprox::output::terminal;
use langprox::pipeline::analysis as stages;

/// langprox: lexical proximity between translations of the same concepts.
///
/// Reads a translated corpus (topics -> words -> languages), measures how
/// close each language pair spells the same words, and writes JSON artifacts
/// for the visualization front end.
#[derive(Parser)]
#[command(name = "langprox", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis stage over the corpus
    Analyze {
        /// How many outliers to print (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Compute word-level distances (word_distance.json, word_graph.json)
    Words,

    /// Compute per-topic language proximity (topic_proximity.json)
    Topics,

    /// Compute corpus-wide language proximity (global_proximity.json)
    Global,

    /// Cluster topics from topic_proximity.json (communities.json)
    Communities,

    /// Flag anomalous word pairs from word_distance.json and topic_proximity.json
    Outliers {
        /// Flag pairs farther than this many times the topic baseline
        #[arg(long)]
        multiplier: Option<f64>,

        /// Ignore baselines below this distance
        #[arg(long)]
        min_topic_distance: Option<f64>,

        /// How many outliers to print (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Show corpus location and artifact freshness
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("langprox=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let paths = config.artifacts();

    match cli.command {
        Commands::Analyze { top } => {
            println!("Analyzing corpus: {}", config.corpus_path.display());

            let run = stages::run(&config, true)?;

            terminal::display_global(&run.global);
            terminal::display_communities(&run.communities);
            terminal::display_outliers(&run.outliers, top);

            let s = &run.summary;
            println!("{}", "Analysis complete.".bold());
            println!(
                "  Topics: {}  Words: {}  Languages: {}",
                s.topics, s.words, s.languages
            );
            println!(
                "  Word pairs: {}  Topic edges: {}  Communities: {}  Outliers: {}",
                s.word_pairs, s.topic_edges, s.communities, s.outliers
            );
            println!("  Artifacts: {}", config.analysis_dir.display());
        }

        Commands::Words => {
            let corpus = load_corpus(&config)?;
            let records = stages::word_distances(&corpus, &paths)?;
            let graphs = stages::word_graphs(&corpus, &paths)?;
            println!("Word pairs analyzed: {}", records.len());
            println!("Anchor words: {}", graphs.len());
            println!("  Output: {}", paths.word_distance.display());
        }

        Commands::Topics => {
            let corpus = load_corpus(&config)?;
            let records = langprox::analysis::word_distance::index_word_distances(&corpus);
            let graphs = stages::topic_proximity(&corpus, &records, &paths)?;
            println!("Topic graphs: {}", graphs.len());
            println!("  Output: {}", paths.topic_proximity.display());
        }

        Commands::Global => {
            let corpus = load_corpus(&config)?;
            let records = langprox::analysis::word_distance::index_word_distances(&corpus);
            let global = stages::global_proximity(&corpus, &records, &paths)?;
            terminal::display_global(&global);
            println!("  Output: {}", paths.global_proximity.display());
        }

        Commands::Communities => {
            let graphs = stages::load_topic_graphs(&paths.topic_proximity)?;
            let communities = stages::communities(&graphs, &paths)?;
            terminal::display_communities(&communities);
            println!("  Output: {}", paths.communities.display());
        }

        Commands::Outliers {
            multiplier,
            min_topic_distance,
            top,
        } => {
            let mut params = config.outlier;
            if let Some(m) = multiplier {
                params.multiplier = m;
            }
            if let Some(floor) = min_topic_distance {
                params.min_topic_distance = floor;
            }
            info!(
                multiplier = params.multiplier,
                min_topic_distance = params.min_topic_distance,
                "Outlier parameters"
            );

            let records = stages::load_word_distances(&paths.word_distance)?;
            let graphs = stages::load_topic_graphs(&paths.topic_proximity)?;
            let outliers = stages::outliers(&records, &graphs, &params, &paths)?;
            terminal::display_outliers(&outliers, top);
            println!("  Output: {}", paths.outliers.display());
        }

        Commands::Status => {
            langprox::status::show(&config);
        }
    }

    Ok(())
}

fn load_corpus(config: &Config) -> Result<langprox::corpus::Corpus> {
    config.require_corpus()?;
    langprox::corpus::load_corpus(&config.corpus_path)
}
