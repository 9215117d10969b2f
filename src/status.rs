// System status display — shows corpus location and artifact freshness.

use std::path::Path;

use chrono::{DateTime, Local};
use colored::Colorize;

use crate::config::Config;

/// Display corpus and artifact status to the terminal.
pub fn show(config: &Config) {
    if config.corpus_path.exists() {
        println!(
            "Corpus: {} ({})",
            config.corpus_path.display(),
            describe_file(&config.corpus_path)
        );
    } else {
        println!("Corpus: {} {}", config.corpus_path.display(), "(missing)".red());
        println!("  Set LANGPROX_CORPUS or LANGPROX_DATA_DIR to point at translated.json");
    }

    println!("Analysis directory: {}", config.analysis_dir.display());
    println!();

    let artifacts = config.artifacts();
    let mut missing = 0;
    for (label, path) in artifacts.all() {
        if path.exists() {
            println!("  {:<18} {}", label, describe_file(path));
        } else {
            missing += 1;
            println!("  {:<18} {}", label, "not yet generated".dimmed());
        }
    }

    if missing > 0 {
        println!("\nRun `langprox analyze` to generate all artifacts.");
    }
}

/// "12.3 KB, updated 2026-01-05 14:02"
fn describe_file(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let size = format_bytes(meta.len());
            match meta.modified() {
                Ok(modified) => {
                    let local: DateTime<Local> = modified.into();
                    format!("{size}, updated {}", local.format("%Y-%m-%d %H:%M"))
                }
                Err(_) => size,
            }
        }
        Err(_) => "unknown".to_string(),
    }
}

/// Format bytes into a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
